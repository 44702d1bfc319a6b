use anyhow::{Context, Result};
use clap::Parser;
use envcast::{
    ConfigDefinition, ConfigProperty, EnvError, SchemaFn, SchemaResult, init_logging,
    parse_process_env,
};
use log::info;
use serde_json::Value;

const VENDOR: &str = "hello-env";

/// Validate the current environment against a small service definition.
#[derive(Debug, Parser)]
#[command(name = "hello-env", version)]
struct Args {
    /// Pretty-print the resulting JSON.
    #[arg(long)]
    pretty: bool,
    /// Print validation issues as a JSON array instead of a report.
    #[arg(long)]
    issues_json: bool,
}

fn port() -> SchemaFn {
    SchemaFn::new(VENDOR, |raw| match raw.parse::<u16>() {
        Ok(0) => SchemaResult::failure("port must be greater than zero"),
        Ok(port) => SchemaResult::success(port),
        Err(err) => SchemaResult::failure(format!("expected a port number: {err}")),
    })
}

fn url() -> SchemaFn {
    SchemaFn::new(VENDOR, |raw| {
        if raw.contains("://") {
            SchemaResult::success(raw)
        } else {
            SchemaResult::failure("expected a url with a scheme")
        }
    })
}

fn log_level() -> SchemaFn {
    SchemaFn::new(VENDOR, |raw| {
        let level = raw.to_ascii_lowercase();
        if matches!(level.as_str(), "error" | "warn" | "info" | "debug" | "trace") {
            SchemaResult::success(level)
        } else {
            SchemaResult::failure("expected one of error, warn, info, debug, trace")
        }
    })
}

fn definition() -> ConfigDefinition {
    ConfigDefinition::new()
        .group(
            "server",
            ConfigDefinition::new()
                .leaf("host", ConfigProperty::new(url(), "HOST").with_default("http://127.0.0.1"))
                .leaf("port", ConfigProperty::new(port(), "PORT").with_default(8080)),
        )
        .group(
            "db",
            ConfigDefinition::new().leaf("url", ConfigProperty::new(url(), "DATABASE_URL")),
        )
        .leaf("log_level", ConfigProperty::new(log_level(), "LOG_LEVEL").optional())
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let output = match parse_process_env(&definition()) {
        Ok(output) => output,
        Err(EnvError::Validation(err)) if args.issues_json => {
            let issues = serde_json::to_string_pretty(err.issues())
                .context("failed to encode issues")?;
            println!("{issues}");
            std::process::exit(1);
        }
        Err(err) => return Err(err).context("environment is not valid"),
    };

    info!("environment accepted (keys={})", output.len());
    let value = Value::Object(output);
    let rendered = if args.pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .context("failed to encode config")?;
    println!("{rendered}");
    Ok(())
}
