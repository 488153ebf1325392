use serde_json::{Map, Value};

use crate::error::{IssueCode, ValidationIssue};
use crate::proto::{CANONICAL_VERSION, CanonicalConfig, ConfigFormat};

/// Checks the version tag of a normalized config.
///
/// The canonical version always passes; version 1 passes only for a document
/// detected as v1. Normalization always emits the canonical version, so this
/// only fires for hand-built configs.
#[must_use]
pub fn validate_version(config: &CanonicalConfig, format: ConfigFormat) -> Vec<ValidationIssue> {
    let version = config.x402_version;
    if version == CANONICAL_VERSION || (version == 1 && format == ConfigFormat::V1) {
        return Vec::new();
    }
    vec![
        ValidationIssue::error(IssueCode::InvalidVersion, "x402Version")
            .with_fix(format!("Set x402Version to {CANONICAL_VERSION}")),
    ]
}

/// Checks the shape of the raw `accepts` field.
///
/// Absent, non-array and empty arrays are distinct errors. Entries are
/// checked individually by the per-entry rules.
#[must_use]
pub fn validate_accepts(raw: &Map<String, Value>) -> Vec<ValidationIssue> {
    match raw.get("accepts") {
        None => vec![
            ValidationIssue::error(IssueCode::MissingAccepts, "accepts")
                .with_fix("Add an accepts array with at least one payment option"),
        ],
        Some(Value::Array(entries)) if entries.is_empty() => vec![
            ValidationIssue::error(IssueCode::EmptyAccepts, "accepts")
                .with_fix("Add at least one payment option to accepts"),
        ],
        Some(Value::Array(_)) => Vec::new(),
        Some(_) => vec![ValidationIssue::error(IssueCode::InvalidAccepts, "accepts")],
    }
}
