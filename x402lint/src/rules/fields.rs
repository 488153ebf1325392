use super::entry_field;
use crate::error::{IssueCode, ValidationIssue};
use crate::proto::PaymentOption;

/// Reports each required field of a payment option that is absent or empty.
#[must_use]
pub fn validate_fields(entry: &PaymentOption, index: usize) -> Vec<ValidationIssue> {
    [
        (&entry.scheme, "scheme", IssueCode::MissingScheme),
        (&entry.network, "network", IssueCode::MissingNetwork),
        (&entry.amount, "amount", IssueCode::MissingAmount),
        (&entry.asset, "asset", IssueCode::MissingAsset),
        (&entry.pay_to, "payTo", IssueCode::MissingPayTo),
    ]
    .into_iter()
    .filter(|(value, _, _)| value.is_empty())
    .map(|(_, name, code)| ValidationIssue::error(code, entry_field(index, name)))
    .collect()
}
