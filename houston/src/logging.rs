//! Log subscriber setup for applications embedding Houston.
//!
//! The library itself only emits `tracing` events. Hosting applications that
//! have no subscriber of their own can install one here:
//!
//! ```ignore
//! let config = HoustonConfig::load("houston.toml")?;
//! houston::logging::init_logging(&config.log)?;
//! ```

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::config::{LogConfig, LogFormat};
use crate::error::{HoustonError, Result};

/// Build the filter described by `config.level`.
pub fn build_filter(config: &LogConfig) -> Result<EnvFilter> {
    EnvFilter::try_new(&config.level).map_err(|source| HoustonError::LogFilter {
        directive: config.level.clone(),
        source,
    })
}

/// Install a global subscriber writing to stderr.
///
/// Returns `Ok(false)` when a global subscriber was already installed, in
/// which case nothing changes. Fails only on an unparsable filter.
pub fn init_logging(config: &LogConfig) -> Result<bool> {
    let filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match config.format {
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(config.target)
                    .with_current_span(true),
            )
            .try_init(),
        LogFormat::Compact => registry
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(config.target),
            )
            .try_init(),
    };

    Ok(installed.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_filter_accepts_directives() {
        let config = LogConfig {
            level: "houston=debug,warn".into(),
            ..LogConfig::default()
        };
        assert!(build_filter(&config).is_ok());
    }

    #[test]
    fn build_filter_rejects_garbage() {
        let config = LogConfig {
            level: "houston=verbose".into(),
            ..LogConfig::default()
        };
        match build_filter(&config) {
            Err(HoustonError::LogFilter { directive, .. }) => {
                assert_eq!(directive, "houston=verbose");
            }
            other => panic!("expected LogFilter error, got {other:?}"),
        }
    }

    #[test]
    fn init_logging_is_idempotent() {
        let config = LogConfig::default();
        init_logging(&config).expect("valid config");
        let second = init_logging(&config).expect("valid config");
        assert!(!second, "second call must not replace the subscriber");
    }

    #[test]
    fn init_logging_fails_before_installing_on_bad_filter() {
        let config = LogConfig {
            level: "houston=verbose".into(),
            format: LogFormat::Json,
            target: false,
        };
        assert!(init_logging(&config).is_err());
    }
}
