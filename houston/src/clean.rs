//! Removal of empty fields.
//!
//! Cleaning is a plain synchronous pass; nothing here suspends or performs
//! I/O apart from the diagnostic emitted for each dropped field.

use serde_json::{Map, Value};
use tracing::warn;

use crate::record::ErrorRecord;

/// Drop every field whose value is `null`, keeping all others untouched.
///
/// Idempotent: cleaning a clean record returns it unchanged.
pub fn clean_record(mut record: ErrorRecord) -> ErrorRecord {
    clean_map(record.as_map_mut());
    record
}

/// In-place variant of [`clean_record`] for an arbitrary JSON map.
///
/// Returns the number of removed fields.
pub fn clean_map(fields: &mut Map<String, Value>) -> usize {
    let before = fields.len();
    fields.retain(|key, value| {
        if value.is_null() {
            warn!(
                field = %key,
                "Ignoring field because it has an undefined, empty or null value"
            );
            false
        } else {
            true
        }
    });
    before - fields.len()
}
