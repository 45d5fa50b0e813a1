//! Centralized logging initialization with environment variable support

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing subscriber with environment variable support
///
/// Environment variables (in priority order):
/// - `RUST_LOG`: Standard Rust log filter (takes precedence over all)
/// - `LOG_LEVEL`: Set log level (trace, debug, info, warn, error)
/// - `LOG_FORMAT`: Override format (json, pretty)
///
/// Calling this more than once keeps the first subscriber.
///
/// # Examples
///
/// ```bash
/// # Show what each engine call replaced
/// LOG_LEVEL=trace recase replace foo bar src/
///
/// # Module-specific filtering
/// RUST_LOG=recase_workspace=debug recase replace foo bar src/
/// ```
pub fn initialize(config: &LoggingConfig) {
    let level = resolve_level(std::env::var("LOG_LEVEL").ok().as_deref(), &config.level);

    // RUST_LOG takes precedence over config
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let format = std::env::var("LOG_FORMAT")
        .ok()
        .and_then(|f| f.parse().ok())
        .unwrap_or(config.format);

    // Always write to stderr so stdout stays clean for diffs and JSON output
    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

/// `LOG_LEVEL` when it names a level, else the configured level, else WARN
fn resolve_level(env_level: Option<&str>, configured: &str) -> tracing::Level {
    env_level
        .and_then(|level| level.parse().ok())
        .or_else(|| configured.parse().ok())
        .unwrap_or(tracing::Level::WARN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_env_level_wins() {
        assert_eq!(resolve_level(Some("debug"), "error"), Level::DEBUG);
    }

    #[test]
    fn test_invalid_env_level_falls_back_to_config() {
        assert_eq!(resolve_level(Some("chatty"), "info"), Level::INFO);
        assert_eq!(resolve_level(None, "TRACE"), Level::TRACE);
    }

    #[test]
    fn test_default_level_is_warn() {
        assert_eq!(resolve_level(None, "nonsense"), Level::WARN);
    }

    #[test]
    fn test_initialize_twice_is_harmless() {
        let config = LoggingConfig::default();
        initialize(&config);
        initialize(&config);
    }
}
