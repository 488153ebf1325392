use super::entry_field;
use crate::address::validate_address;
use crate::assets::is_known_asset;
use crate::chain::is_valid_caip2;
use crate::error::{IssueCode, ValidationIssue};
use crate::networks::{canonical_network, is_known_network};
use crate::proto::PaymentOption;

/// Checks the network identifier.
///
/// Malformed CAIP-2 is an error; when the value is a known legacy name such as
/// `base`, the fix names its canonical identifier. Well-formed identifiers
/// missing from the registry only warn.
#[must_use]
pub fn validate_network(entry: &PaymentOption, index: usize) -> Vec<ValidationIssue> {
    let network = entry.network.as_str();
    if network.is_empty() {
        return Vec::new();
    }
    let field = entry_field(index, "network");
    if !is_valid_caip2(network) {
        let mut issue = ValidationIssue::error(IssueCode::InvalidNetworkFormat, field);
        if let Some(canonical) = canonical_network(network) {
            issue = issue.with_fix(format!("Use {canonical}"));
        }
        return vec![issue];
    }
    if !is_known_network(network) {
        return vec![ValidationIssue::warning(IssueCode::UnknownNetwork, field)];
    }
    Vec::new()
}

/// Warns when the asset is not registered for the entry's network.
///
/// Skipped when the asset is empty or the network is not valid CAIP-2.
#[must_use]
pub fn validate_asset(entry: &PaymentOption, index: usize) -> Vec<ValidationIssue> {
    if entry.asset.is_empty() || !is_valid_caip2(&entry.network) {
        return Vec::new();
    }
    if is_known_asset(&entry.network, &entry.asset) {
        return Vec::new();
    }
    vec![ValidationIssue::warning(
        IssueCode::UnknownAsset,
        entry_field(index, "asset"),
    )]
}

/// Validates the recipient address against the entry's own network.
#[must_use]
pub fn validate_pay_to(entry: &PaymentOption, index: usize) -> Vec<ValidationIssue> {
    if entry.pay_to.is_empty() {
        return Vec::new();
    }
    validate_address(&entry.pay_to, &entry.network, &entry_field(index, "payTo"))
}
