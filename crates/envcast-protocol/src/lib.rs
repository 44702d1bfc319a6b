//! Validator capability contract shared by envcast crates.
//!
//! Validation libraries are never referenced directly. Anything that can
//! check a raw environment string and report a vendor name implements
//! [`StandardSchema`] and can be plugged into a config definition.

mod issue;
mod schema;

pub use issue::Issue;
pub use schema::{PendingValidation, STANDARD_VERSION, SchemaFn, SchemaResult, StandardSchema};
