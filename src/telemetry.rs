use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log_level '{value}': not a valid tracing filter")]
    Filter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("could not install log subscriber: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Parse a filter directive the way [`init`] does when `RUST_LOG` is unset.
fn build_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(log_level).map_err(|source| TelemetryError::Filter {
        value: log_level.to_string(),
        source,
    })
}

/// Pick the filter directive: `--verbose` wins over the config file's
/// `log_level`, which wins over the default. `RUST_LOG` overrides all of
/// them inside [`init`].
pub fn resolve_level(verbose: bool, configured: Option<&str>) -> String {
    if verbose {
        "debug".to_string()
    } else {
        configured.unwrap_or(DEFAULT_LOG_LEVEL).to_string()
    }
}

/// Install the global subscriber. Output goes through the stderr buffer so
/// the TUI can hold log lines until the terminal is restored.
pub fn init(log_level: &str) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => build_filter(log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(crate::stderr_buffer::writer)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_overrides_config() {
        assert_eq!(resolve_level(true, Some("error")), "debug");
    }

    #[test]
    fn test_config_level_used() {
        assert_eq!(resolve_level(false, Some("info")), "info");
    }

    #[test]
    fn test_default_level() {
        assert_eq!(resolve_level(false, None), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_bad_filter_reports_value() {
        let err = build_filter("ntc_underwriter=loud").unwrap_err();
        assert!(matches!(err, TelemetryError::Filter { .. }));
        assert!(err.to_string().contains("ntc_underwriter=loud"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_good_filter_builds() {
        assert!(build_filter("ntc_underwriter=debug,warn").is_ok());
    }
}
