// crates/horizon-core/src/json.rs
//
// Canonical JSON text for artefacts that are hashed or diffed.

use serde::Serialize;

use crate::error::HorizonError;

/// Serialize with sorted object keys, 2-space indent and a trailing newline.
///
/// Two calls on equal values produce byte-identical text, so the output is
/// safe to hash.
pub fn to_canonical_json<T: Serialize>(value: &T) -> Result<String, HorizonError> {
    // serde_json::Value stores objects in a BTreeMap, which sorts the keys.
    let value = serde_json::to_value(value)?;
    let mut text = serde_json::to_string_pretty(&value)?;
    text.push('\n');
    Ok(text)
}
