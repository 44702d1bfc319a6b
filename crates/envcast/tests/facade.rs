//! Tests for the public facade.

use envcast::{ConfigDefinition, ConfigProperty, SchemaFn, SchemaResult, parse_process_env};
use envcast_test_utils::NumericString;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn process_env_feeds_the_walker() {
    let definition = ConfigDefinition::new()
        .leaf(
            "path",
            ConfigProperty::new(SchemaFn::new("plain", |raw| SchemaResult::success(raw)), "PATH")
                .optional(),
        )
        .leaf(
            "missing",
            ConfigProperty::new(NumericString::default(), "ENVCAST_FACADE_TEST_UNSET")
                .with_default(7),
        );

    let output = parse_process_env(&definition).expect("parse");
    assert_eq!(
        output.get("path").and_then(|value| value.as_str()).map(str::to_string),
        std::env::var("PATH").ok()
    );
    assert_eq!(output.get("missing"), Some(&json!(7)));
}

#[test]
fn init_logging_is_idempotent() {
    envcast::init_logging();
    envcast::init_logging();
}
