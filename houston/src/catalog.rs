//! Shape of a predefined error kind, as supplied by an external catalog.
//!
//! The core only reads catalog entries; it never owns or validates a catalog.
//! Entries can be produced in code (see the `houston-catalog` crate) or
//! deserialized from JSON:
//!
//! ```json
//! { "code": 404, "string": "Not Found", "name": "NOT_FOUND" }
//! ```

use serde::{Deserialize, Serialize};

/// One class of predefined error.
///
/// `code` and `string` are expected but not enforced: a missing field simply
/// yields a sparser record from [`crate::Houston::from_catalog`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Numeric status code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Category text, stored as `category` on the produced record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub string: Option<String>,
    /// Symbolic name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CatalogEntry {
    pub fn new(code: u16, string: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            string: Some(string.into()),
            name: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether both required fields are present.
    pub fn is_complete(&self) -> bool {
        self.code.is_some() && self.string.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_partial_entries() {
        let entry: CatalogEntry =
            serde_json::from_str(r#"{ "string": "Gone" }"#).expect("deserialize");
        assert_eq!(entry.code, None);
        assert_eq!(entry.string.as_deref(), Some("Gone"));
        assert!(!entry.is_complete());
    }

    #[test]
    fn serialization_skips_missing_fields() {
        let entry = CatalogEntry::new(404, "Not Found");
        let json = serde_json::to_string(&entry).expect("serialize");
        assert_eq!(json, r#"{"code":404,"string":"Not Found"}"#);
        assert!(entry.is_complete());
    }
}
