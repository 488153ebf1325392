use super::entry_field;
use crate::error::{IssueCode, ValidationIssue};
use crate::proto::PaymentOption;

fn is_unsigned_integer(amount: &str) -> bool {
    !amount.is_empty() && amount.bytes().all(|b| b.is_ascii_digit())
}

/// Checks that the amount is a positive integer in atomic units.
///
/// Only ASCII digits are allowed: no sign, decimal point, exponent or
/// whitespace. All-zero amounts are rejected separately. Empty amounts are
/// left to [`validate_fields`](super::validate_fields).
#[must_use]
pub fn validate_amount(entry: &PaymentOption, index: usize) -> Vec<ValidationIssue> {
    let amount = entry.amount.as_str();
    if amount.is_empty() {
        return Vec::new();
    }
    let field = entry_field(index, "amount");
    if !is_unsigned_integer(amount) {
        return vec![
            ValidationIssue::error(IssueCode::InvalidAmount, field)
                .with_fix("Use a whole number of atomic units, e.g. \"1000000\" for 1 USDC"),
        ];
    }
    if amount.bytes().all(|b| b == b'0') {
        return vec![ValidationIssue::error(IssueCode::ZeroAmount, field)];
    }
    Vec::new()
}

/// Checks `maxTimeoutSeconds`.
///
/// Absent is a warning. Anything present that is not a positive integer
/// (strings, zero, negatives, fractions, `null`) is an error.
#[must_use]
pub fn validate_timeout(entry: &PaymentOption, index: usize) -> Vec<ValidationIssue> {
    let field = entry_field(index, "maxTimeoutSeconds");
    match &entry.max_timeout_seconds {
        None => vec![
            ValidationIssue::warning(IssueCode::MissingMaxTimeout, field)
                .with_fix("Add maxTimeoutSeconds, e.g. 60"),
        ],
        Some(value) if value.as_u64().is_some_and(|seconds| seconds > 0) => Vec::new(),
        Some(_) => vec![
            ValidationIssue::error(IssueCode::InvalidTimeout, field)
                .with_fix("Use a positive whole number of seconds, e.g. 60"),
        ],
    }
}
