use serde_json::Value;

use super::guards::{is_manifest_config, is_v1_config, is_v2_config};
use crate::proto::{AsConfigInput, ConfigFormat};

/// Detects the format of a JSON text or parsed value.
///
/// Unparseable text and non-objects are [`ConfigFormat::Unknown`].
#[must_use]
pub fn detect(input: &(impl AsConfigInput + ?Sized)) -> ConfigFormat {
    input
        .as_config_input()
        .parse()
        .map_or(ConfigFormat::Unknown, |value| detect_value(&value))
}

/// Detects the format of a parsed value.
///
/// Order matters: manifest first, then v2, then v1.
#[must_use]
pub fn detect_value(value: &Value) -> ConfigFormat {
    if is_manifest_config(value) {
        ConfigFormat::Manifest
    } else if is_v2_config(value) {
        ConfigFormat::V2
    } else if is_v1_config(value) {
        ConfigFormat::V1
    } else {
        ConfigFormat::Unknown
    }
}
