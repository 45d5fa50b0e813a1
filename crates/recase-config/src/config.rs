//! Layered configuration for recase.
//!
//! # Configuration Hierarchy
//!
//! Settings are resolved in the following order of precedence (highest to lowest):
//! 1. **Environment Variables**: `RECASE_*` (e.g., `RECASE_LIMITS__MAX_FILE_SIZE=1024`)
//! 2. **Local Configuration**: `.recase.toml` in the working root.
//! 3. **Default Values**: Hardcoded defaults in the configuration structs.
//!
//! # Configuration File Example
//!
//! ```toml
//! # .recase.toml
//! [limits]
//! max_file_size = 1048576
//! max_file_count = 50000
//!
//! [scope]
//! include = ["**/*.rs", "**/*.md"]
//! exclude = ["**/target/**"]
//! include_hidden = false
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variables
//!
//! Use `__` as a separator for nested keys:
//!
//! ```bash
//! # Overrides [limits].max_file_count
//! export RECASE_LIMITS__MAX_FILE_COUNT=1000
//!
//! # Overrides [scope].exclude
//! export RECASE_SCOPE__EXCLUDE='["**/vendor/**"]'
//! ```

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use recase_workspace::{DiscoveryOptions, DEFAULT_MAX_FILE_COUNT, DEFAULT_MAX_FILE_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Name of the configuration file looked up in the working root
pub const CONFIG_FILE: &str = ".recase.toml";

/// Prefix of the environment variables that override configuration keys
pub const ENV_PREFIX: &str = "RECASE_";

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct RecaseConfig {
    /// Size and count ceilings for discovery.
    pub limits: LimitsConfig,
    /// Which files a walk considers.
    pub scope: ScopeConfig,
    pub logging: LoggingConfig,
}

/// Size and count ceilings for discovery.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Files larger than this many bytes are skipped.
    pub max_file_size: u64,
    /// A walk finding more files than this is aborted.
    pub max_file_count: usize,
}

/// Which files a walk considers.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ScopeConfig {
    /// Glob patterns to include (e.g., ["**/*.rs", "**/*.toml"])
    pub include: Vec<String>,
    /// Glob patterns to exclude (e.g., ["**/target/**"])
    pub exclude: Vec<String>,
    pub include_hidden: bool,
    pub recurse: bool,
    pub binary_as_text: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable format for development
    #[default]
    Pretty,
    /// Structured JSON format for tooling
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "human" => Ok(LogFormat::Pretty),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_file_count: DEFAULT_MAX_FILE_COUNT,
        }
    }
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            include: Vec::new(),
            exclude: default_excludes(),
            include_hidden: false,
            recurse: true,
            binary_as_text: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

fn default_excludes() -> Vec<String> {
    vec![
        // Build and cache directories
        "**/target/**".into(),
        "**/node_modules/**".into(),
        "**/.git/**".into(),
        "**/build/**".into(),
        "**/dist/**".into(),
        "**/coverage/**".into(),
        // Lock files (shouldn't be modified by find/replace)
        "**/package-lock.json".into(),
        "**/yarn.lock".into(),
        "**/pnpm-lock.yaml".into(),
        "**/Cargo.lock".into(),
    ]
}

impl RecaseConfig {
    /// Loads configuration from the root's config file, environment, and defaults.
    ///
    /// A missing `.recase.toml` is not an error.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(root).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// The layered sources [`load`](Self::load) extracts from.
    pub fn figment(root: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(root.join(CONFIG_FILE)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.logging
            .level
            .parse::<tracing::Level>()
            .map_err(|_| ConfigError::InvalidLogLevel(self.logging.level.clone()))?;
        Ok(())
    }

    /// Discovery settings equivalent to this configuration.
    ///
    /// `no_limit` is never set from configuration; it is a per-invocation choice.
    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            include: self.scope.include.clone(),
            exclude: self.scope.exclude.clone(),
            include_hidden: self.scope.include_hidden,
            recurse: self.scope.recurse,
            no_limit: false,
            binary_as_text: self.scope.binary_as_text,
            max_file_size: self.limits.max_file_size,
            max_file_count: self.limits.max_file_count,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Figment error: {0}")]
    Figment(#[from] figment::Error),

    #[error("Invalid log level '{0}'. Expected one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format '{0}'. Expected one of: pretty, json")]
    InvalidLogFormat(String),
}

impl From<ConfigError> for figment::Error {
    fn from(err: ConfigError) -> figment::Error {
        match err {
            ConfigError::Figment(e) => e,
            other => figment::Error::from(other.to_string()),
        }
    }
}
