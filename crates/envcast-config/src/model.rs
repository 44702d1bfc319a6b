//! Definition tree for environment-backed config.

use crate::EnvError;
use envcast_protocol::StandardSchema;
use serde_json::Value;
use std::sync::Arc;

/// A leaf bound to one environment variable.
#[derive(Debug, Clone)]
pub struct ConfigProperty {
    /// Validator applied to the raw string.
    pub format: Arc<dyn StandardSchema>,
    /// Output value used when the variable is absent. Never validated.
    pub default: Option<Value>,
    /// Environment variable name.
    pub env: String,
    /// Omit the key instead of failing when the variable is absent.
    pub optional: bool,
}

impl ConfigProperty {
    /// Bind a validator to an environment variable.
    pub fn new(format: impl StandardSchema + 'static, env: impl Into<String>) -> Self {
        Self::shared(Arc::new(format), env)
    }

    /// Bind an already shared validator to an environment variable.
    pub fn shared(format: Arc<dyn StandardSchema>, env: impl Into<String>) -> Self {
        Self {
            format,
            default: None,
            env: env.into(),
            optional: false,
        }
    }

    /// Use `value` when the variable is absent.
    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Mark the leaf optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// A node in the definition tree.
#[derive(Debug, Clone)]
pub enum ConfigNode {
    /// Terminal node resolved from one variable.
    Leaf(ConfigProperty),
    /// Nested group materialized as an object.
    Group(ConfigDefinition),
}

impl From<ConfigProperty> for ConfigNode {
    fn from(property: ConfigProperty) -> Self {
        Self::Leaf(property)
    }
}

impl From<ConfigDefinition> for ConfigNode {
    fn from(definition: ConfigDefinition) -> Self {
        Self::Group(definition)
    }
}

/// Ordered mapping of keys to nodes.
#[derive(Debug, Clone, Default)]
pub struct ConfigDefinition {
    entries: Vec<(String, ConfigNode)>,
}

impl ConfigDefinition {
    /// Create an empty definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leaf under `key`.
    pub fn leaf(self, key: impl Into<String>, property: ConfigProperty) -> Self {
        self.with(key, ConfigNode::Leaf(property))
    }

    /// Add a nested group under `key`.
    pub fn group(self, key: impl Into<String>, definition: ConfigDefinition) -> Self {
        self.with(key, ConfigNode::Group(definition))
    }

    /// Builder form of [`ConfigDefinition::insert`].
    pub fn with(mut self, key: impl Into<String>, node: impl Into<ConfigNode>) -> Self {
        self.insert(key, node);
        self
    }

    /// Insert a node. An existing key is replaced in place.
    pub fn insert(&mut self, key: impl Into<String>, node: impl Into<ConfigNode>) {
        let key = key.into();
        let node = node.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = node,
            None => self.entries.push((key, node)),
        }
    }

    /// Look up a direct child.
    pub fn get(&self, key: &str) -> Option<&ConfigNode> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, node)| node)
    }

    /// Iterate direct children in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of leaves in the whole tree.
    pub fn leaf_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(_, node)| match node {
                ConfigNode::Leaf(_) => 1,
                ConfigNode::Group(group) => group.leaf_count(),
            })
            .sum()
    }

    /// Check structural invariants that the builder cannot enforce.
    pub fn validate(&self) -> Result<(), EnvError> {
        self.validate_at("")
    }

    fn validate_at(&self, path: &str) -> Result<(), EnvError> {
        for (key, node) in &self.entries {
            let node_path = join_path(path, key);
            match node {
                ConfigNode::Leaf(property) => {
                    if property.env.trim().is_empty() {
                        return Err(EnvError::InvalidDefinition {
                            path: node_path,
                            message: "environment variable name must not be empty".to_string(),
                        });
                    }
                }
                ConfigNode::Group(group) => group.validate_at(&node_path)?,
            }
        }
        Ok(())
    }
}

/// Join nested keys for error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}
