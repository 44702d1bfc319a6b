//! Test helpers shared across envcast crates.

pub mod env;
pub mod schemas;

pub use env::env_map;
pub use schemas::{
    CountingSchema, JsonObjectSchema, LegacySchema, NumericString, PendingSchema, RegexString,
    SilentFailure,
};
