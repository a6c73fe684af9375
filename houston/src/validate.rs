//! Field validation gate.

use serde_json::Value;
use tracing::debug;

use crate::record::FieldValue;

/// Returns true iff `value` may be stored in an optional record field.
///
/// Accepted: strings, objects and arrays. Rejected: `null`, numbers and
/// booleans. Rejections are reported at debug level and never affect the
/// result.
pub fn validate_field(value: &Value) -> bool {
    let accepted = FieldValue::accepts(value);
    if !accepted {
        debug!(
            value = %value,
            "Ignoring field value: must be a string or an object"
        );
    }
    accepted
}
