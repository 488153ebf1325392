use crate::error::{IssueCode, ValidationIssue};
use crate::proto::ConfigFormat;

/// Warns when the document uses the legacy v1 wire format.
#[must_use]
pub fn validate_legacy(format: ConfigFormat) -> Vec<ValidationIssue> {
    if format != ConfigFormat::V1 {
        return Vec::new();
    }
    vec![
        ValidationIssue::warning(IssueCode::LegacyFormat, "x402Version").with_fix(
            "Upgrade to x402Version 2: use amount instead of maxAmountRequired and move resource to the top level",
        ),
    ]
}
