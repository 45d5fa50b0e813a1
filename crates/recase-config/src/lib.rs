//! Configuration and logging setup for recase

pub mod config;
pub mod logging;

pub use config::{
    ConfigError, LimitsConfig, LogFormat, LoggingConfig, RecaseConfig, ScopeConfig, CONFIG_FILE,
    ENV_PREFIX,
};
