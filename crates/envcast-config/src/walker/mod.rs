//! Recursive definition walker.
//!
//! Traverses a [`ConfigDefinition`] depth-first, resolves every leaf against
//! the environment, and aggregates issues so a single failed parse reports
//! every missing or invalid variable at once.

mod vendor;


use crate::{ConfigDefinition, ConfigNode, ConfigProperty, EnvError, EnvSource, ValidationError};
use envcast_protocol::{Issue, STANDARD_VERSION, SchemaResult};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Assembled config object, keyed in definition order.
pub type Output = Map<String, Value>;

/// Parse `env` against `config` and return the assembled object.
///
/// Groups are always present in the output, even when all of their leaves
/// are optional and absent. Optional leaves without a value are omitted.
pub fn parse<E>(env: &E, config: &ConfigDefinition) -> Result<Output, EnvError>
where
    E: EnvSource + ?Sized,
{
    config.validate()?;
    info!("parsing environment config (leaves={})", config.leaf_count());
    let mut ctx = WalkContext::default();
    let output = walk(env, config, &mut ctx)?;
    ctx.finish(output)
}

/// Parse `env` against `config` and decode the result into `T`.
pub fn parse_as<T, E>(env: &E, config: &ConfigDefinition) -> Result<T, EnvError>
where
    T: DeserializeOwned,
    E: EnvSource + ?Sized,
{
    let output = parse(env, config)?;
    Ok(serde_json::from_value(Value::Object(output))?)
}

/// Accumulators scoped to a single parse.
#[derive(Debug, Default)]
struct WalkContext {
    issues: Vec<Issue>,
    vendors: Vec<String>,
    resolved: usize,
}

impl WalkContext {
    fn record_vendor(&mut self, vendor: &str) {
        if vendor.is_empty() || self.vendors.iter().any(|seen| seen == vendor) {
            return;
        }
        self.vendors.push(vendor.to_string());
    }

    fn finish(self, output: Output) -> Result<Output, EnvError> {
        if self.issues.is_empty() {
            info!("environment config parsed (resolved={})", self.resolved);
            return Ok(output);
        }
        let vendor = vendor::label(&self.vendors);
        warn!(
            "environment validation failed (issues={}, vendor={vendor})",
            self.issues.len()
        );
        Err(ValidationError::new(self.issues, vendor).into())
    }
}

fn walk<E>(
    env: &E,
    definition: &ConfigDefinition,
    ctx: &mut WalkContext,
) -> Result<Output, EnvError>
where
    E: EnvSource + ?Sized,
{
    let mut output = Output::new();
    for (key, node) in definition.iter() {
        match node {
            ConfigNode::Group(group) => {
                let nested = walk(env, group, ctx)?;
                output.insert(key.to_string(), Value::Object(nested));
            }
            ConfigNode::Leaf(property) => match resolve_leaf(env, property, ctx)? {
                Some(value) => {
                    ctx.resolved += 1;
                    output.insert(key.to_string(), value);
                }
                None if !property.optional => {
                    output.insert(key.to_string(), Value::Null);
                }
                None => {}
            },
        }
    }
    Ok(output)
}

/// Resolve a single leaf, recording any issues in `ctx`.
fn resolve_leaf<E>(
    env: &E,
    property: &ConfigProperty,
    ctx: &mut WalkContext,
) -> Result<Option<Value>, EnvError>
where
    E: EnvSource + ?Sized,
{
    let format = property.format.as_ref();
    if let Some(vendor) = format.vendor() {
        ctx.record_vendor(vendor);
    }

    let name = property.env.as_str();
    let Some(raw) = env.get(name) else {
        if let Some(default) = &property.default {
            debug!("using default value (env={name})");
            return Ok(Some(default.clone()));
        }
        if property.optional {
            debug!("optional variable not set (env={name})");
            return Ok(None);
        }
        debug!("required variable not set (env={name})");
        ctx.issues.push(Issue::at(
            format!("{name}: missing required environment variable"),
            [name],
        ));
        return Ok(None);
    };

    let version = format.version();
    if version != STANDARD_VERSION {
        warn!("validator is not standard schema compliant (env={name}, version={version})");
        ctx.issues.push(Issue::at(
            format!("{name}: validator is not Standard Schema compliant"),
            [name],
        ));
        return Ok(None);
    }

    match format.validate(raw) {
        SchemaResult::Success { value } => {
            debug!("validated variable (env={name})");
            Ok(Some(value))
        }
        SchemaResult::Failure { issues } => {
            debug!("variable failed validation (env={name}, issues={})", issues.len());
            if issues.is_empty() {
                ctx.issues
                    .push(Issue::at(format!("{name}: validation failed"), [name]));
            } else {
                ctx.issues
                    .extend(issues.into_iter().map(|issue| issue.scoped(name)));
            }
            Ok(None)
        }
        SchemaResult::Pending(_) => Err(EnvError::AsyncValidation(name.to_string())),
    }
}
