//! Logging sinks for produced records.
//!
//! The builders hand every record to an [`ErrorSink`] before broadcasting it.
//! A sink owns all console/stream output; the core keeps working when the
//! sink is a [`NoopSink`] or when a sink panics.

use serde_json::Value;
use std::panic::{self, AssertUnwindSafe};
use tracing::{error, warn};

use crate::record::{CATEGORY, ErrorRecord, MESSAGE};

/// Receives each record produced or passed through by [`crate::Houston`].
pub trait ErrorSink: Send + Sync {
    fn log_record(&self, record: &ErrorRecord);
}

/// Emits one `error`-level tracing event per record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn log_record(&self, record: &ErrorRecord) {
        error!(
            code = ?record.code(),
            category = record.category().unwrap_or_default(),
            name = record.name().unwrap_or_default(),
            "{}",
            render_line(record)
        );
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl ErrorSink for NoopSink {
    fn log_record(&self, _record: &ErrorRecord) {}
}

/// Render the human-readable log line for a record.
///
/// Format: `code: <code>, error: <category>`, followed by ` message: <text>`
/// when a non-empty message is present and ` data: \n<json>` when a payload
/// is present.
pub fn render_line(record: &ErrorRecord) -> String {
    let mut line = format!(
        "code: {}, error: {}",
        display_field(record.code()),
        display_field(record.get(CATEGORY)),
    );
    if let Some(message) = record.get(MESSAGE).filter(|m| is_truthy(m)) {
        line.push_str(&format!(" message: {}", display_value(message)));
    }
    if let Some(data) = record.data().filter(|d| is_truthy(d)) {
        line.push_str(&format!(" data: \n{data}"));
    }
    line
}

fn display_field(value: Option<&Value>) -> String {
    value.map_or_else(|| "undefined".to_string(), display_value)
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Hand `record` to `sink`, containing any panic raised by the sink.
pub(crate) fn log_guarded(sink: &dyn ErrorSink, record: &ErrorRecord) {
    if panic::catch_unwind(AssertUnwindSafe(|| sink.log_record(record))).is_err() {
        warn!("Error sink panicked while logging a record; continuing");
    }
}
