//! The error record model.
//!
//! An [`ErrorRecord`] is a flat, string-keyed mapping of JSON-shaped values.
//! The builders in [`crate::builder`] only ever fill the recognized fields
//! listed below, but a record can carry any key (for example one that was
//! deserialized from a foreign payload) and the cleaning contract applies to
//! all of them.
//!
//! | Field      | Value                                                   |
//! |------------|---------------------------------------------------------|
//! | `code`     | numeric status code, or whatever an ad hoc caller set   |
//! | `category` | short machine-oriented kind string                      |
//! | `name`     | symbolic name, usually an uppercase identifier          |
//! | `message`  | human-readable text                                     |
//! | `data`     | auxiliary payload, text or structured                   |

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Key of the status/classification code.
pub const CODE: &str = "code";
/// Key of the machine-oriented category string.
pub const CATEGORY: &str = "category";
/// Key of the symbolic error name.
pub const NAME: &str = "name";
/// Key of the human-readable message.
pub const MESSAGE: &str = "message";
/// Key of the auxiliary payload.
pub const DATA: &str = "data";

/// A normalized error object.
///
/// Serializes as a plain JSON object. Field order follows insertion order
/// for display purposes only; equality ignores it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorRecord {
    fields: Map<String, Value>,
}

impl ErrorRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, returning the previous value if there was one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over field names.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The `code` field, whatever its JSON type.
    pub fn code(&self) -> Option<&Value> {
        self.get(CODE)
    }

    /// The `code` field when it is an unsigned integer.
    pub fn code_number(&self) -> Option<u64> {
        self.code().and_then(Value::as_u64)
    }

    pub fn category(&self) -> Option<&str> {
        self.get(CATEGORY).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.get(NAME).and_then(Value::as_str)
    }

    pub fn message(&self) -> Option<&str> {
        self.get(MESSAGE).and_then(Value::as_str)
    }

    pub fn data(&self) -> Option<&Value> {
        self.get(DATA)
    }

    /// Drop every `null` field. See [`crate::clean::clean_record`].
    #[must_use]
    pub fn clean(self) -> Self {
        crate::clean::clean_record(self)
    }

    /// Borrow the underlying JSON map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub(crate) fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.fields
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    /// Convert into a `serde_json::Value::Object`.
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl From<Map<String, Value>> for ErrorRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl From<ErrorRecord> for Value {
    fn from(record: ErrorRecord) -> Self {
        Value::Object(record.fields)
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Map<String, Value> renders as compact JSON via Value's Display.
        write!(f, "{}", Value::Object(self.fields.clone()))
    }
}

/// A candidate field value, classified at the call site.
///
/// Only text and structured values (objects and arrays) may be placed into
/// an optional record field; every other JSON value is [`FieldValue::Absent`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Structured(Value),
    Absent,
}

impl FieldValue {
    /// Whether `value` would classify as present, without consuming it.
    pub fn accepts(value: &Value) -> bool {
        matches!(value, Value::String(_) | Value::Object(_) | Value::Array(_))
    }

    pub fn is_present(&self) -> bool {
        !matches!(self, Self::Absent)
    }

    /// Turn the classification back into a storable value.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Self::Text(text) => Some(Value::String(text)),
            Self::Structured(value) => Some(value),
            Self::Absent => None,
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            structured @ (Value::Object(_) | Value::Array(_)) => Self::Structured(structured),
            Value::Null | Value::Bool(_) | Value::Number(_) => Self::Absent,
        }
    }
}

impl From<Option<Value>> for FieldValue {
    fn from(value: Option<Value>) -> Self {
        value.map_or(Self::Absent, Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accessors_read_recognized_fields() {
        let record = ErrorRecord::new()
            .with(CODE, 404)
            .with(CATEGORY, "Not Found")
            .with(NAME, "NOT_FOUND")
            .with(MESSAGE, "missing")
            .with(DATA, json!({ "id": 7 }));

        assert_eq!(record.code_number(), Some(404));
        assert_eq!(record.category(), Some("Not Found"));
        assert_eq!(record.name(), Some("NOT_FOUND"));
        assert_eq!(record.message(), Some("missing"));
        assert_eq!(record.data(), Some(&json!({ "id": 7 })));
        assert_eq!(record.len(), 5);
    }

    #[test]
    fn text_accessors_ignore_non_string_values() {
        let record = ErrorRecord::new()
            .with(CATEGORY, json!({ "kind": "x" }))
            .with(CODE, "E42");

        assert_eq!(record.category(), None);
        assert_eq!(record.code_number(), None);
        assert_eq!(record.code(), Some(&json!("E42")));
    }

    #[test]
    fn serializes_as_flat_object() {
        let record = ErrorRecord::new().with(CODE, 500).with(NAME, "BOOM");
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json, json!({ "code": 500, "name": "BOOM" }));

        let parsed: ErrorRecord = serde_json::from_value(json).expect("deserialize");
        assert_eq!(parsed, record);
    }

    #[test]
    fn display_renders_compact_json() {
        let record = ErrorRecord::new().with(CODE, 400).with(CATEGORY, "Bad Request");
        assert_eq!(record.to_string(), r#"{"code":400,"category":"Bad Request"}"#);
    }

    #[test]
    fn field_value_classification() {
        assert_eq!(FieldValue::from(json!("x")), FieldValue::Text("x".into()));
        assert_eq!(
            FieldValue::from(json!({ "a": 1 })),
            FieldValue::Structured(json!({ "a": 1 }))
        );
        assert_eq!(
            FieldValue::from(json!([1, 2])),
            FieldValue::Structured(json!([1, 2]))
        );
        assert_eq!(FieldValue::from(json!(42)), FieldValue::Absent);
        assert_eq!(FieldValue::from(json!(true)), FieldValue::Absent);
        assert_eq!(FieldValue::from(Value::Null), FieldValue::Absent);
        assert_eq!(FieldValue::from(None), FieldValue::Absent);
    }

    #[test]
    fn field_value_round_trips_present_values() {
        assert_eq!(FieldValue::Text("m".into()).into_value(), Some(json!("m")));
        assert_eq!(FieldValue::Absent.into_value(), None);
    }
}
