use std::borrow::Cow;

use serde_json::Value;

use crate::detection::detect_value;
use crate::error::{IssueCode, ValidationIssue};
use crate::proto::{ConfigFormat, ConfigInput};

/// Field path of the document root.
pub const ROOT_FIELD: &str = "$";

/// Result of the structural checks on a raw input.
#[derive(Debug, Clone)]
pub struct StructureOutcome<'a> {
    /// The parsed object, absent when parsing failed or the input is not an object.
    pub parsed: Option<Cow<'a, Value>>,
    /// Detected format.
    pub format: ConfigFormat,
    /// At most one terminal issue.
    pub issues: Vec<ValidationIssue>,
}

/// Parses the input and detects its format.
///
/// Produces at most one issue, and any issue is terminal for single-config
/// validation: `INVALID_JSON`, `NOT_OBJECT` (arrays and `null` included) or
/// `UNKNOWN_FORMAT`. Manifests are reported as `UNKNOWN_FORMAT` here, since a
/// manifest is a collection of configs rather than one config.
#[must_use]
pub fn validate_structure(input: ConfigInput<'_>) -> StructureOutcome<'_> {
    let Ok(parsed) = input.parse() else {
        return terminal(None, ValidationIssue::error(IssueCode::InvalidJson, ROOT_FIELD));
    };
    if !parsed.is_object() {
        return terminal(None, ValidationIssue::error(IssueCode::NotObject, ROOT_FIELD));
    }

    match detect_value(&parsed) {
        ConfigFormat::Unknown => terminal(
            Some(parsed),
            ValidationIssue::error(IssueCode::UnknownFormat, ROOT_FIELD).with_fix(
                "Use x402Version 2 with an accepts array of payment options",
            ),
        ),
        ConfigFormat::Manifest => StructureOutcome {
            parsed: Some(parsed),
            format: ConfigFormat::Manifest,
            issues: vec![
                ValidationIssue::error(IssueCode::UnknownFormat, ROOT_FIELD)
                    .with_message("Input is a multi-endpoint manifest, not a single config")
                    .with_fix("Validate manifests with validate_manifest or validate_document"),
            ],
        },
        format @ (ConfigFormat::V2 | ConfigFormat::V1) => StructureOutcome {
            parsed: Some(parsed),
            format,
            issues: Vec::new(),
        },
    }
}

fn terminal(parsed: Option<Cow<'_, Value>>, issue: ValidationIssue) -> StructureOutcome<'_> {
    StructureOutcome {
        parsed,
        format: ConfigFormat::Unknown,
        issues: vec![issue],
    }
}
