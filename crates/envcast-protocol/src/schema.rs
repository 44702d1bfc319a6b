//! The standard-schema capability implemented by validator adapters.

use crate::Issue;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// Capability version this crate understands.
pub const STANDARD_VERSION: u32 = 1;

/// Deferred validation handed back by adapters that need async work.
pub type PendingValidation = Pin<Box<dyn Future<Output = SchemaResult> + Send>>;

/// Outcome of validating one raw environment string.
pub enum SchemaResult {
    /// The raw string was accepted and converted to an output value.
    Success { value: Value },
    /// The raw string was rejected.
    Failure { issues: Vec<Issue> },
    /// The validator could only answer asynchronously.
    Pending(PendingValidation),
}

impl SchemaResult {
    /// Build a successful result.
    pub fn success(value: impl Into<Value>) -> Self {
        Self::Success {
            value: value.into(),
        }
    }

    /// Build a failed result with a single unscoped issue.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            issues: vec![Issue::new(message)],
        }
    }

    /// Wrap a future as a pending result.
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = SchemaResult> + Send + 'static,
    {
        Self::Pending(Box::pin(future))
    }

    /// True when the validator accepted the input.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl fmt::Debug for SchemaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { value } => f.debug_struct("Success").field("value", value).finish(),
            Self::Failure { issues } => f.debug_struct("Failure").field("issues", issues).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Validator adapter interface.
///
/// Implementations wrap a concrete validation library. Validation must be
/// synchronous; an adapter that can only answer later returns
/// [`SchemaResult::Pending`], which callers treat as a hard fault.
pub trait StandardSchema: Send + Sync + fmt::Debug {
    /// Capability version exposed by the adapter.
    fn version(&self) -> u32 {
        STANDARD_VERSION
    }

    /// Name of the validation library behind this adapter, if known.
    fn vendor(&self) -> Option<&str>;

    /// Validate a raw environment string.
    fn validate(&self, value: &str) -> SchemaResult;
}

type ValidateFn = dyn Fn(&str) -> SchemaResult + Send + Sync;

/// Adapter built from a closure and an optional vendor name.
pub struct SchemaFn {
    vendor: Option<String>,
    validate: Box<ValidateFn>,
}

impl SchemaFn {
    /// Create an adapter reporting the given vendor.
    pub fn new<F>(vendor: impl Into<String>, validate: F) -> Self
    where
        F: Fn(&str) -> SchemaResult + Send + Sync + 'static,
    {
        Self {
            vendor: Some(vendor.into()),
            validate: Box::new(validate),
        }
    }

    /// Create an adapter that does not expose a vendor name.
    pub fn anonymous<F>(validate: F) -> Self
    where
        F: Fn(&str) -> SchemaResult + Send + Sync + 'static,
    {
        Self {
            vendor: None,
            validate: Box::new(validate),
        }
    }
}

impl fmt::Debug for SchemaFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SchemaFn({})", self.vendor.as_deref().unwrap_or("<none>"))
    }
}

impl StandardSchema for SchemaFn {
    fn vendor(&self) -> Option<&str> {
        self.vendor.as_deref()
    }

    fn validate(&self, value: &str) -> SchemaResult {
        (self.validate)(value)
    }
}
