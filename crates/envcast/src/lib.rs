//! Public surface for envcast.
//!
//! Re-exports the definition model, the walker and the validator contract,
//! and provides a small logging helper so binaries set up output the same way.

/// Re-export for convenience.
pub use envcast_config as config;
/// Re-export for convenience.
pub use envcast_protocol as protocol;

pub use envcast_config::{
    ConfigDefinition, ConfigNode, ConfigProperty, EnvError, EnvSource, Output, ProcessEnv,
    ValidationError, parse, parse_as,
};
pub use envcast_protocol::{Issue, SchemaFn, SchemaResult, StandardSchema};

/// Parse the current process environment against `config`.
pub fn parse_process_env(config: &ConfigDefinition) -> Result<Output, EnvError> {
    let env = ProcessEnv::capture();
    log::debug!("parsing process environment (vars={})", env.len());
    parse(&env, config)
}

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
///
/// This is a no-op if the feature is not enabled. Binaries are still expected
/// to call this early in startup to ensure log output is wired up.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
