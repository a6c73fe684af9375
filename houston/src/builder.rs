//! Error record builders.
//!
//! [`Houston`] composes the pieces of the crate: every produced record is
//! assembled from validated fields, handed to the configured [`ErrorSink`],
//! emitted on the [`ErrorChannel`] and returned cleaned. None of the
//! builders can fail; malformed optional inputs are dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::catalog::CatalogEntry;
use crate::channel::ErrorChannel;
use crate::clean::clean_record;
use crate::config::{HoustonConfig, SinkKind};
use crate::record::{CATEGORY, CODE, DATA, ErrorRecord, FieldValue, MESSAGE, NAME};
use crate::sink::{self, ErrorSink, NoopSink, TracingSink};
use crate::validate::validate_field;

/// Default `code` of an ad hoc error.
pub const DEFAULT_CODE: u16 = 500;
/// Default category (`error` option) of an ad hoc error.
pub const DEFAULT_ERROR: &str = "Internal Server Error";
/// Default `name` of an ad hoc error.
pub const DEFAULT_NAME: &str = "INTERNAL_SERVER_ERROR";

/// Overrides applied on top of a catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogOptions {
    pub message: Option<Value>,
    pub data: Option<Value>,
}

impl CatalogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<Value>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }
}

/// Inputs of an ad hoc error.
///
/// Every field accepts any JSON value and is validated on build. Note that
/// the default `code` is the number `500`, which the validator rejects: an
/// ad hoc record only carries a `code` when the caller supplies a string or
/// structured one, or opts in with [`CustomOptions::numeric_code`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomOptions {
    pub code: Value,
    /// Stored on the record as `category`.
    pub error: Value,
    pub name: Value,
    pub message: Option<Value>,
    pub data: Option<Value>,
    /// Keep numeric codes instead of dropping them.
    pub accept_numeric_code: bool,
}

impl Default for CustomOptions {
    fn default() -> Self {
        Self {
            code: Value::from(DEFAULT_CODE),
            error: Value::from(DEFAULT_ERROR),
            name: Value::from(DEFAULT_NAME),
            message: None,
            data: None,
            accept_numeric_code: false,
        }
    }
}

impl CustomOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn code(mut self, code: impl Into<Value>) -> Self {
        self.code = code.into();
        self
    }

    #[must_use]
    pub fn error(mut self, error: impl Into<Value>) -> Self {
        self.error = error.into();
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<Value>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<Value>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn data(mut self, data: impl Into<Value>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Keep a numeric `code` (including the default `500`).
    #[must_use]
    pub fn numeric_code(mut self) -> Self {
        self.accept_numeric_code = true;
        self
    }
}

/// Builds, logs and broadcasts error records.
#[derive(Clone)]
pub struct Houston {
    sink: Arc<dyn ErrorSink>,
    channel: ErrorChannel,
}

impl Houston {
    /// Builder logging through [`TracingSink`].
    pub fn new(channel: ErrorChannel) -> Self {
        Self::with_sink(channel, Arc::new(TracingSink))
    }

    pub fn with_sink(channel: ErrorChannel, sink: Arc<dyn ErrorSink>) -> Self {
        Self { sink, channel }
    }

    /// Build a channel and sink from configuration.
    pub fn from_config(config: &HoustonConfig) -> Self {
        let channel = ErrorChannel::named(&config.channel.name, config.channel.stream_capacity);
        let sink: Arc<dyn ErrorSink> = match config.sink.kind {
            SinkKind::Tracing => Arc::new(TracingSink),
            SinkKind::Noop => Arc::new(NoopSink),
        };
        Self::with_sink(channel, sink)
    }

    /// The channel records are emitted on.
    pub fn channel(&self) -> &ErrorChannel {
        &self.channel
    }

    /// Build a record from a predefined catalog entry.
    ///
    /// `code`, `category` and `name` come straight from the entry; `data`
    /// and `message` are kept only if they are strings or structured values.
    pub fn from_catalog(&self, entry: &CatalogEntry, options: CatalogOptions) -> ErrorRecord {
        let mut record = ErrorRecord::new();
        if let Some(code) = entry.code {
            record.insert(CODE, code);
        }
        if let Some(string) = &entry.string {
            record.insert(CATEGORY, string.as_str());
        }
        if let Some(name) = &entry.name {
            record.insert(NAME, name.as_str());
        }
        if let Some(data) = options.data.and_then(accepted) {
            record.insert(DATA, data);
        }
        if let Some(message) = options.message.and_then(accepted) {
            record.insert(MESSAGE, message);
        }

        if !entry.is_complete() {
            debug!(entry = ?entry, "Catalog entry is missing code or string");
        }
        self.publish(record)
    }

    /// Build an ad hoc record.
    ///
    /// Each of `code`, `error`, `name`, `data` and `message` is kept only if
    /// it passes validation.
    pub fn custom(&self, options: CustomOptions) -> ErrorRecord {
        let CustomOptions {
            code,
            error,
            name,
            message,
            data,
            accept_numeric_code,
        } = options;

        let code = if accept_numeric_code && code.is_number() {
            Some(code)
        } else {
            accepted(code)
        };
        let fields = [
            (CODE, code),
            (CATEGORY, accepted(error)),
            (NAME, accepted(name)),
            (DATA, data.and_then(accepted)),
            (MESSAGE, message.and_then(accepted)),
        ];

        let mut record = ErrorRecord::new();
        for (key, value) in fields {
            if let Some(value) = value {
                record.insert(key, value);
            }
        }
        self.publish(record)
    }

    /// Log an already-formed record and return it untouched.
    pub fn passthrough(&self, error: ErrorRecord) -> ErrorRecord {
        sink::log_guarded(self.sink.as_ref(), &error);
        error
    }

    fn publish(&self, record: ErrorRecord) -> ErrorRecord {
        sink::log_guarded(self.sink.as_ref(), &record);
        self.channel.emit(&record);
        clean_record(record)
    }
}

impl Default for Houston {
    fn default() -> Self {
        Self::new(ErrorChannel::new())
    }
}

impl fmt::Debug for Houston {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Houston")
            .field("channel", &self.channel)
            .finish_non_exhaustive()
    }
}

/// Run an input through the validator, yielding the value to store.
fn accepted(value: Value) -> Option<Value> {
    if validate_field(&value) {
        FieldValue::from(value).into_value()
    } else {
        None
    }
}
