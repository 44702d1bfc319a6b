//! End-to-end parsing scenarios.

use envcast_config::{ConfigDefinition, ConfigProperty, EnvError, parse, parse_as};
use envcast_protocol::{SchemaFn, SchemaResult};
use envcast_test_utils::{NumericString, RegexString, env_map};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::{Value, json};

fn url() -> SchemaFn {
    SchemaFn::new("url", |raw| {
        if raw.is_empty() {
            SchemaResult::failure("expected a non-empty url")
        } else {
            SchemaResult::success(raw)
        }
    })
}

fn service_definition() -> ConfigDefinition {
    ConfigDefinition::new()
        .group(
            "db",
            ConfigDefinition::new().leaf("url", ConfigProperty::new(url(), "DATABASE_URL")),
        )
        .group(
            "server",
            ConfigDefinition::new()
                .leaf("port", ConfigProperty::new(NumericString::new("url"), "PORT"))
                .leaf(
                    "host",
                    ConfigProperty::new(url(), "HOST").optional(),
                ),
        )
}

#[test]
fn parses_numeric_port() {
    let definition = ConfigDefinition::new()
        .leaf("port", ConfigProperty::new(NumericString::default(), "PORT"));
    let output = parse(&env_map([("PORT", "3000")]), &definition).expect("parse");
    assert_eq!(Value::Object(output), json!({ "port": 3000 }));
}

#[test]
fn falls_back_to_default_port() {
    let definition = ConfigDefinition::new().leaf(
        "port",
        ConfigProperty::new(NumericString::default(), "PORT").with_default(8080),
    );
    let output = parse(&env_map([]), &definition).expect("parse");
    assert_eq!(Value::Object(output), json!({ "port": 8080 }));
}

#[test]
fn rejects_non_numeric_port() {
    let definition = ConfigDefinition::new().leaf(
        "port",
        ConfigProperty::new(RegexString::new("zod", r"^\d+$").numeric(), "PORT"),
    );
    let err = parse(&env_map([("PORT", "nope")]), &definition).unwrap_err();
    let validation = err.as_validation().expect("validation error");
    assert_eq!(validation.vendor(), "zod");
    assert_eq!(validation.issues().len(), 1);
    assert!(validation.issues()[0].message.contains("PORT"));
    assert!(validation.mentions("PORT"));
}

#[test]
fn reports_mixed_vendors() {
    let definition = ConfigDefinition::new()
        .leaf(
            "port",
            ConfigProperty::new(RegexString::new("vendorA", r"^\d+$"), "PORT"),
        )
        .leaf(
            "workers",
            ConfigProperty::new(NumericString::new("vendorB"), "WORKERS"),
        );
    let err = parse(&env_map([("PORT", "x"), ("WORKERS", "y")]), &definition).unwrap_err();
    let validation = err.as_validation().expect("validation error");
    assert_eq!(validation.vendor(), "mixed(vendorA,vendorB)");
    assert_eq!(validation.issues().len(), 2);
    assert!(
        err.to_string()
            .starts_with("environment validation failed (mixed(vendorA,vendorB), 2 issues)")
    );
}

#[test]
fn assembles_nested_groups() {
    let env = env_map([("DATABASE_URL", "x"), ("PORT", "3000")]);
    let output = parse(&env, &service_definition()).expect("parse");
    assert_eq!(
        Value::Object(output),
        json!({ "db": { "url": "x" }, "server": { "port": 3000 } })
    );
}

#[derive(Debug, Deserialize, PartialEq)]
struct ServiceConfig {
    db: DbConfig,
    server: ServerConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
struct DbConfig {
    url: String,
}

#[derive(Debug, Deserialize, PartialEq)]
struct ServerConfig {
    port: u16,
    host: Option<String>,
}

#[test]
fn decodes_into_typed_config() {
    let env = env_map([("DATABASE_URL", "postgres://db"), ("PORT", "5432")]);
    let config: ServiceConfig = parse_as(&env, &service_definition()).expect("typed parse");
    assert_eq!(
        config,
        ServiceConfig {
            db: DbConfig {
                url: "postgres://db".to_string(),
            },
            server: ServerConfig {
                port: 5432,
                host: None,
            },
        }
    );
}

#[test]
fn typed_decode_failure_is_distinct() {
    let env = env_map([("DATABASE_URL", "postgres://db"), ("PORT", "70000")]);
    let err = parse_as::<ServiceConfig, _>(&env, &service_definition()).unwrap_err();
    assert!(matches!(err, EnvError::DecodeFailed(_)));
}

#[test]
fn concurrent_parses_do_not_share_issues() {
    let definition = service_definition();
    let good = env_map([("DATABASE_URL", "x"), ("PORT", "1")]);
    let bad = env_map([("PORT", "x")]);

    std::thread::scope(|scope| {
        let ok = scope.spawn(|| parse(&good, &definition));
        let failed = scope.spawn(|| parse(&bad, &definition));

        assert!(ok.join().expect("thread").is_ok());
        let err = failed.join().expect("thread").unwrap_err();
        assert_eq!(err.as_validation().expect("validation").issues().len(), 2);
    });
}
