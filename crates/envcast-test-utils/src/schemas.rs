use envcast_protocol::{Issue, SchemaResult, StandardSchema};
use regex::Regex;
use serde_json::{Number, Value};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Accepts integer or float strings and returns a JSON number.
#[derive(Debug, Clone)]
pub struct NumericString {
    vendor: Option<String>,
}

impl NumericString {
    pub fn new(vendor: impl Into<String>) -> Self {
        Self {
            vendor: Some(vendor.into()),
        }
    }

    pub fn without_vendor() -> Self {
        Self { vendor: None }
    }
}

impl Default for NumericString {
    fn default() -> Self {
        Self::new("numeric")
    }
}

impl StandardSchema for NumericString {
    fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    fn validate(&self, value: &str) -> SchemaResult {
        let trimmed = value.trim();
        if let Ok(int) = trimmed.parse::<i64>() {
            return SchemaResult::success(int);
        }
        match trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
            Some(number) => SchemaResult::success(Value::Number(number)),
            None => SchemaResult::failure("expected a numeric string"),
        }
    }
}

/// Accepts strings matching a pattern, optionally converting them to numbers.
#[derive(Debug, Clone)]
pub struct RegexString {
    vendor: String,
    pattern: Regex,
    numeric: bool,
}

impl RegexString {
    pub fn new(vendor: impl Into<String>, pattern: &str) -> Self {
        Self {
            vendor: vendor.into(),
            pattern: Regex::new(pattern).expect("valid test pattern"),
            numeric: false,
        }
    }

    /// Convert matched values with `str::parse::<i64>`.
    pub fn numeric(mut self) -> Self {
        self.numeric = true;
        self
    }
}

impl StandardSchema for RegexString {
    fn vendor(&self) -> Option<&str> {
        Some(&self.vendor)
    }

    fn validate(&self, value: &str) -> SchemaResult {
        if !self.pattern.is_match(value) {
            return SchemaResult::failure(format!(
                "expected value matching {}",
                self.pattern.as_str()
            ));
        }
        if !self.numeric {
            return SchemaResult::success(value);
        }
        match value.parse::<i64>() {
            Ok(number) => SchemaResult::success(number),
            Err(err) => SchemaResult::failure(format!("expected an integer: {err}")),
        }
    }
}

/// Parses a JSON object and requires the listed fields.
///
/// Missing fields are reported with the field name as the issue path.
#[derive(Debug, Clone)]
pub struct JsonObjectSchema {
    vendor: String,
    required: Vec<String>,
}

impl JsonObjectSchema {
    pub fn new<I, S>(vendor: impl Into<String>, required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vendor: vendor.into(),
            required: required.into_iter().map(Into::into).collect(),
        }
    }
}

impl StandardSchema for JsonObjectSchema {
    fn vendor(&self) -> Option<&str> {
        Some(&self.vendor)
    }

    fn validate(&self, value: &str) -> SchemaResult {
        let Ok(Value::Object(map)) = serde_json::from_str::<Value>(value) else {
            return SchemaResult::failure("expected a JSON object");
        };
        let issues = self
            .required
            .iter()
            .filter(|field| !map.contains_key(field.as_str()))
            .map(|field| Issue::at("required", [field.as_str()]))
            .collect::<Vec<_>>();
        if issues.is_empty() {
            SchemaResult::success(Value::Object(map))
        } else {
            SchemaResult::Failure { issues }
        }
    }
}

/// Always answers with a pending result.
#[derive(Debug, Clone, Default)]
pub struct PendingSchema;

impl StandardSchema for PendingSchema {
    fn vendor(&self) -> Option<&str> {
        Some("async")
    }

    fn validate(&self, value: &str) -> SchemaResult {
        let value = value.to_string();
        SchemaResult::pending(async move { SchemaResult::success(value) })
    }
}

/// Reports an unsupported capability version.
#[derive(Debug, Clone, Default)]
pub struct LegacySchema;

impl StandardSchema for LegacySchema {
    fn version(&self) -> u32 {
        0
    }

    fn vendor(&self) -> Option<&str> {
        Some("legacy")
    }

    fn validate(&self, value: &str) -> SchemaResult {
        SchemaResult::success(value)
    }
}

/// Rejects everything without describing why.
#[derive(Debug, Clone, Default)]
pub struct SilentFailure;

impl StandardSchema for SilentFailure {
    fn vendor(&self) -> Option<&str> {
        None
    }

    fn validate(&self, _value: &str) -> SchemaResult {
        SchemaResult::Failure { issues: Vec::new() }
    }
}

/// Wraps a schema and counts how often it validates.
#[derive(Debug, Clone)]
pub struct CountingSchema<S> {
    inner: S,
    calls: Arc<AtomicUsize>,
}

impl<S: StandardSchema> CountingSchema<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Shared handle to the call counter.
    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl<S: StandardSchema> StandardSchema for CountingSchema<S> {
    fn version(&self) -> u32 {
        self.inner.version()
    }

    fn vendor(&self) -> Option<&str> {
        self.inner.vendor()
    }

    fn validate(&self, value: &str) -> SchemaResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.validate(value)
    }
}
