//! Structural guards used by format detection.
//!
//! Guards only look at shape. Field-level correctness is left to the rules.

use serde_json::{Map, Value};

/// Returns `true` if the object has an `accepts` field holding an array.
#[must_use]
pub fn has_accepts_array(map: &Map<String, Value>) -> bool {
    map.get("accepts").is_some_and(Value::is_array)
}

fn version_is(map: &Map<String, Value>, version: u64) -> bool {
    map.get("x402Version").and_then(Value::as_u64) == Some(version)
}

/// Returns `true` for an object with an `accepts` array and `x402Version: 2`.
#[must_use]
pub fn is_v2_config(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| has_accepts_array(map) && version_is(map, 2))
}

/// Returns `true` for an object with an `accepts` array and `x402Version: 1`.
#[must_use]
pub fn is_v1_config(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| has_accepts_array(map) && version_is(map, 1))
}

/// Returns `true` if `endpoints` is an object whose every value is an object
/// with an `accepts` array.
///
/// An empty `endpoints` object qualifies. This must be checked before
/// [`is_v2_config`], since a manifest may carry `x402Version: 2` itself.
#[must_use]
pub fn is_manifest_config(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|map| map.get("endpoints"))
        .and_then(Value::as_object)
        .is_some_and(|endpoints| {
            endpoints
                .values()
                .all(|endpoint| endpoint.as_object().is_some_and(has_accepts_array))
        })
}
