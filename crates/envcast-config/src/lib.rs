//! Environment config definitions and the walker that resolves them.
//!
//! A [`ConfigDefinition`] describes the nested shape of the config and, for
//! every leaf, which environment variable feeds it and which validator checks
//! it. [`parse`] walks the definition once against an [`EnvSource`] and either
//! returns the assembled object or a single [`ValidationError`] carrying every
//! problem found.

mod error;
mod model;
mod source;
mod walker;

/// Error types returned by parsing.
pub use error::{EnvError, ValidationError};
/// Definition tree types.
pub use model::{ConfigDefinition, ConfigNode, ConfigProperty};
/// Environment lookup sources.
pub use source::{EnvSource, ProcessEnv};
/// Walker entry points.
pub use walker::{Output, parse, parse_as};
