//! Errors raised by the crate's own setup surfaces.
//!
//! Record builders never fail; only configuration loading and logging
//! initialization can.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading configuration or installing the log subscriber.
#[derive(Debug, Error)]
pub enum HoustonError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has the wrong shape.
    #[error("Invalid configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The log filter directive could not be parsed.
    #[error("Invalid log filter '{directive}': {source}")]
    LogFilter {
        directive: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },
}

/// Result alias for fallible Houston setup calls.
pub type Result<T> = std::result::Result<T, HoustonError>;
