use std::sync::LazyLock;

use regex::Regex;

use crate::crypto::{is_valid_checksum, to_checksum_address};
use crate::error::{IssueCode, ValidationIssue};

static EVM_ADDRESS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0x[0-9a-fA-F]{40}$").expect("static EVM address pattern"));

/// Validates an EVM address: `0x` plus 40 hex digits, then its EIP-55 checksum.
///
/// Format failures are errors. Checksum findings are warnings: an
/// all-lowercase address gets `NO_EVM_CHECKSUM`, a mixed-case address whose
/// casing is wrong gets `BAD_EVM_CHECKSUM`. All-uppercase hex is accepted.
#[must_use]
pub fn validate_evm_address(address: &str, field: &str) -> Vec<ValidationIssue> {
    if !EVM_ADDRESS.is_match(address) {
        return vec![
            ValidationIssue::error(IssueCode::InvalidEvmAddress, field)
                .with_message("EVM address must be 42 hex characters with 0x prefix")
                .with_fix("Format: 0x followed by 40 hex digits (0-9, a-f, A-F)"),
        ];
    }
    let Ok(checksummed) = to_checksum_address(address) else {
        return Vec::new();
    };

    if address == address.to_ascii_lowercase() {
        return vec![
            ValidationIssue::warning(IssueCode::NoEvmChecksum, field)
                .with_fix(format!("Use checksummed address to detect typos: {checksummed}")),
        ];
    }
    if !address[2..].bytes().any(|b| b.is_ascii_lowercase()) {
        return Vec::new();
    }
    if !is_valid_checksum(address) {
        return vec![
            ValidationIssue::warning(IssueCode::BadEvmChecksum, field)
                .with_message("EVM address has invalid checksum (EIP-55)")
                .with_fix(format!("Expected: {checksummed}")),
        ];
    }
    Vec::new()
}
