//! Input/output schema extensions.
//!
//! Two mechanisms let a server describe how an endpoint is called:
//! `extensions.bazaar` on the config, and `outputSchema` on individual
//! `accepts` entries. Both are optional and every finding here is a warning.

use serde_json::{Map, Value};

use super::entry_field;
use crate::error::{IssueCode, ValidationIssue};
use crate::proto::CanonicalConfig;

/// Keys whose presence marks an object as a JSON Schema.
const JSON_SCHEMA_KEYS: &[&str] = &[
    "$schema",
    "$ref",
    "$defs",
    "type",
    "properties",
    "items",
    "required",
    "enum",
    "const",
    "oneOf",
    "anyOf",
    "allOf",
    "additionalProperties",
    "definitions",
];

fn has_type_and_method(input: &Map<String, Value>) -> bool {
    input.contains_key("type") && input.contains_key("method")
}

/// Checks `extensions.bazaar`: an `info` object with `input` (type and method)
/// and `output`, plus a recognizable JSON Schema under `schema`.
#[must_use]
pub fn validate_bazaar(config: &CanonicalConfig) -> Vec<ValidationIssue> {
    let Some(bazaar) = config.bazaar() else {
        return Vec::new();
    };
    let Some(bazaar) = bazaar.as_object() else {
        return vec![
            ValidationIssue::warning(IssueCode::InvalidBazaarInfo, "extensions.bazaar")
                .with_message("extensions.bazaar must be an object"),
        ];
    };

    let mut issues = Vec::new();
    match bazaar.get("info").and_then(Value::as_object) {
        None => issues.push(
            ValidationIssue::warning(IssueCode::InvalidBazaarInfo, "extensions.bazaar.info")
                .with_fix("Add info with input and output descriptions"),
        ),
        Some(info) => {
            if !info
                .get("input")
                .and_then(Value::as_object)
                .is_some_and(has_type_and_method)
            {
                issues.push(
                    ValidationIssue::warning(
                        IssueCode::InvalidBazaarInfoInput,
                        "extensions.bazaar.info.input",
                    )
                    .with_fix("Declare input.type and input.method"),
                );
            }
            if !info.contains_key("output") {
                issues.push(
                    ValidationIssue::warning(IssueCode::InvalidBazaarInfo, "extensions.bazaar.info.output")
                        .with_message("Bazaar info is missing output"),
                );
            }
        }
    }

    let schema_ok = bazaar
        .get("schema")
        .and_then(Value::as_object)
        .is_some_and(|schema| JSON_SCHEMA_KEYS.iter().any(|key| schema.contains_key(*key)));
    if !schema_ok {
        issues.push(
            ValidationIssue::warning(IssueCode::InvalidBazaarSchema, "extensions.bazaar.schema")
                .with_fix("Provide a JSON Schema object, e.g. {\"type\": \"object\", \"properties\": {...}}"),
        );
    }
    issues
}

/// Checks every `accepts[i].outputSchema` in the raw document.
///
/// Returns nothing when `accepts` is not an array.
#[must_use]
pub fn validate_output_schema(raw: &Map<String, Value>) -> Vec<ValidationIssue> {
    let Some(entries) = raw.get("accepts").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    for (index, entry) in entries.iter().enumerate() {
        let Some(schema) = entry.get("outputSchema") else {
            continue;
        };
        let field = entry_field(index, "outputSchema");
        let Some(schema) = schema.as_object() else {
            issues.push(
                ValidationIssue::warning(IssueCode::InvalidOutputSchema, field)
                    .with_message("outputSchema must be an object"),
            );
            continue;
        };
        if !schema
            .get("input")
            .and_then(Value::as_object)
            .is_some_and(has_type_and_method)
        {
            issues.push(
                ValidationIssue::warning(IssueCode::InvalidOutputSchemaInput, format!("{field}.input"))
                    .with_fix("Declare input.type and input.method"),
            );
        }
        if !schema.contains_key("output") {
            issues.push(ValidationIssue::warning(
                IssueCode::InvalidOutputSchema,
                format!("{field}.output"),
            ));
        }
    }
    issues
}

/// Warns when neither `extensions.bazaar` nor any `accepts[].outputSchema` exists.
#[must_use]
pub fn validate_missing_schema(
    config: &CanonicalConfig,
    raw: &Map<String, Value>,
) -> Vec<ValidationIssue> {
    let has_output_schema = raw
        .get("accepts")
        .and_then(Value::as_array)
        .is_some_and(|entries| entries.iter().any(|entry| entry.get("outputSchema").is_some()));
    if config.bazaar().is_some() || has_output_schema {
        return Vec::new();
    }
    vec![
        ValidationIssue::warning(IssueCode::MissingInputSchema, "extensions")
            .with_fix("Add extensions.bazaar with info.input and info.output so agents can call this endpoint"),
    ]
}
