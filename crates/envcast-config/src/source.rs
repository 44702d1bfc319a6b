//! Lookup sources for environment variables.

use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Read-only view of environment variables.
pub trait EnvSource {
    /// Return the raw value of `key`, or `None` when it is not set.
    fn get(&self, key: &str) -> Option<&str>;
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn get(&self, key: &str) -> Option<&str> {
        (**self).get(key)
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).map(String::as_str)
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, Option<String>, S> {
    fn get(&self, key: &str) -> Option<&str> {
        HashMap::get(self, key).and_then(|value| value.as_deref())
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<&str> {
        BTreeMap::get(self, key).map(String::as_str)
    }
}

/// Snapshot of the process environment.
#[derive(Debug, Clone, Default)]
pub struct ProcessEnv {
    vars: HashMap<String, String>,
}

impl ProcessEnv {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn capture() -> Self {
        let mut vars = HashMap::new();
        for (key, value) in std::env::vars_os() {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    vars.insert(key, value);
                }
                (Ok(key), Err(_)) => {
                    debug!("skipping non-utf8 environment value (name={key})");
                }
                (Err(_), _) => {
                    debug!("skipping non-utf8 environment variable name");
                }
            }
        }
        debug!("captured process environment (vars={})", vars.len());
        Self { vars }
    }

    /// Number of captured variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ProcessEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}
