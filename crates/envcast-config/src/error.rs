//! Error types for environment parsing.

use envcast_protocol::Issue;
use std::fmt;
use thiserror::Error;

/// Errors returned while parsing an environment against a definition.
#[derive(Debug, Error)]
pub enum EnvError {
    /// One or more leaves were missing or failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// A validator answered with a pending result.
    #[error("asynchronous validation is not supported ({0} returned a pending result)")]
    AsyncValidation(String),
    /// The definition itself is malformed.
    #[error("invalid config definition at {path}: {message}")]
    InvalidDefinition { path: String, message: String },
    /// The assembled object did not match the requested output type.
    #[error("failed to decode config: {0}")]
    DecodeFailed(#[from] serde_json::Error),
}

impl EnvError {
    /// Borrow the validation failure, if this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

/// Every issue collected during one parse, plus the vendor label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    issues: Vec<Issue>,
    vendor: String,
}

impl ValidationError {
    pub(crate) fn new(issues: Vec<Issue>, vendor: String) -> Self {
        Self { issues, vendor }
    }

    /// Issues in traversal order.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Vendor label: a single vendor name, `mixed(a,b)` or `unknown`.
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// True when any issue is scoped under the given variable.
    pub fn mentions(&self, env: &str) -> bool {
        self.issues
            .iter()
            .any(|issue| issue.path.first().map(String::as_str) == Some(env))
    }

    /// Consume the error and return the issues.
    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.issues.len();
        write!(
            f,
            "environment validation failed ({}, {count} {})",
            self.vendor,
            if count == 1 { "issue" } else { "issues" }
        )?;
        for issue in &self.issues {
            write!(f, "\n  - {}", issue.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::{EnvError, ValidationError};
    use envcast_protocol::Issue;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_lists_every_issue() {
        let err = ValidationError::new(
            vec![
                Issue::at("PORT: expected number", ["PORT"]),
                Issue::at("HOST: missing required environment variable", ["HOST"]),
            ],
            "zod".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "environment validation failed (zod, 2 issues)\n  - PORT: expected number\n  - HOST: missing required environment variable"
        );
    }

    #[test]
    fn env_error_is_transparent_over_validation() {
        let inner = ValidationError::new(vec![Issue::at("A: bad", ["A"])], "unknown".to_string());
        let err = EnvError::from(inner.clone());
        assert_eq!(err.to_string(), inner.to_string());
        assert_eq!(err.as_validation(), Some(&inner));
        assert!(inner.mentions("A"));
        assert!(!inner.mentions("B"));
    }
}
