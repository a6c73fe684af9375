//! Configuration for the hosting application's Houston instance.
//!
//! Everything has a default, so an empty file is a valid configuration:
//!
//! ```toml
//! [log]
//! level = "houston=debug,info"
//! format = "json"
//!
//! [channel]
//! name = "weHaveAProblem"
//! stream_capacity = 512
//!
//! [sink]
//! kind = "tracing"
//! ```
//!
//! The library does not read environment variables; the hosting
//! application decides where the TOML comes from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use crate::channel::{
    CHANNEL_NAME, DEFAULT_STREAM_CAPACITY, MAX_STREAM_CAPACITY, MIN_STREAM_CAPACITY,
};
use crate::error::{HoustonError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoustonConfig {
    pub log: LogConfig,
    pub channel: ChannelConfig,
    pub sink: SinkConfig,
}

/// Log subscriber settings, consumed by [`crate::logging::init_logging`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive, e.g. `info` or `houston=debug,warn`.
    pub level: String,
    pub format: LogFormat,
    /// Include the event target in each line.
    pub target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            target: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human-readable output.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

/// Broadcast channel settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub name: String,
    /// Buffer of the async stream feed.
    pub stream_capacity: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            name: CHANNEL_NAME.to_string(),
            stream_capacity: DEFAULT_STREAM_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    pub kind: SinkKind,
}

/// Which [`crate::sink::ErrorSink`] the builders log through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Tracing,
    Noop,
}

/// A non-fatal configuration problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl HoustonConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| HoustonError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Report values that will be adjusted or ignored at runtime.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if let Err(err) = EnvFilter::try_new(&self.log.level) {
            warnings.push(ConfigWarning {
                field: "log.level",
                message: format!("'{}' is not a valid filter directive: {err}", self.log.level),
            });
        }

        if self.channel.name.trim().is_empty() {
            warnings.push(ConfigWarning {
                field: "channel.name",
                message: "channel name is empty".to_string(),
            });
        }

        if self.channel.stream_capacity < MIN_STREAM_CAPACITY {
            warnings.push(ConfigWarning {
                field: "channel.stream_capacity",
                message: format!(
                    "{} is below the minimum; {} will be used",
                    self.channel.stream_capacity, MIN_STREAM_CAPACITY
                ),
            });
        } else if self.channel.stream_capacity > MAX_STREAM_CAPACITY {
            warnings.push(ConfigWarning {
                field: "channel.stream_capacity",
                message: format!(
                    "{} is above the maximum; {} will be used",
                    self.channel.stream_capacity, MAX_STREAM_CAPACITY
                ),
            });
        }

        warnings
    }
}
