use serde::{Deserialize, Serialize};
use std::fmt;

/// A single validation failure reported by a validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Human readable description of the failure.
    pub message: String,
    /// Location of the failure inside the validated value.
    #[serde(default)]
    pub path: Vec<String>,
}

impl Issue {
    /// Create an issue with an empty path.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
        }
    }

    /// Create an issue at an explicit path.
    pub fn at<I, S>(message: impl Into<String>, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            message: message.into(),
            path: path.into_iter().map(Into::into).collect(),
        }
    }

    /// Scope this issue under an environment variable.
    ///
    /// The variable name becomes the first path segment and prefixes the
    /// message, so `["field"]` turns into `["PORT", "field"]`.
    pub fn scoped(self, env: &str) -> Self {
        let mut path = Vec::with_capacity(self.path.len() + 1);
        path.push(env.to_string());
        path.extend(self.path);
        Self {
            message: format!("{env}: {}", self.message),
            path,
        }
    }

    /// Render the path as a dotted string.
    pub fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} (at {})", self.message, self.dotted_path())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Issue;
    use pretty_assertions::assert_eq;

    #[test]
    fn scoped_prepends_env_name() {
        let issue = Issue::at("expected number", ["field"]).scoped("PORT");
        assert_eq!(issue.message, "PORT: expected number");
        assert_eq!(issue.path, vec!["PORT".to_string(), "field".to_string()]);
    }

    #[test]
    fn display_includes_path_when_present() {
        let issue = Issue::at("PORT: expected number", ["PORT"]);
        assert_eq!(issue.to_string(), "PORT: expected number (at PORT)");
        assert_eq!(Issue::new("boom").to_string(), "boom");
    }
}
