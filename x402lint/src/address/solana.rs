use std::sync::LazyLock;

use regex::Regex;

use crate::crypto::decode_base58;
use crate::error::{IssueCode, ValidationIssue};

static SOLANA_ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$").expect("static Solana address pattern")
});

/// Validates a Solana public key: 32 to 44 Base58 characters decoding to
/// exactly 32 bytes. Every finding is an error.
#[must_use]
pub fn validate_solana_address(address: &str, field: &str) -> Vec<ValidationIssue> {
    if !SOLANA_ADDRESS.is_match(address) {
        return vec![
            ValidationIssue::error(IssueCode::InvalidSolanaAddress, field)
                .with_message("Solana address must be 32-44 Base58 characters")
                .with_fix("Valid characters: 1-9, A-H, J-N, P-Z, a-k, m-z (no 0, O, I, l)"),
        ];
    }
    match decode_base58(address) {
        Ok(bytes) if bytes.len() == 32 => Vec::new(),
        Ok(bytes) => vec![
            ValidationIssue::error(IssueCode::InvalidSolanaAddress, field)
                .with_message(format!(
                    "Solana address must decode to 32 bytes, got {}",
                    bytes.len()
                ))
                .with_fix("Verify address is a valid Solana public key"),
        ],
        Err(err) => vec![
            ValidationIssue::error(IssueCode::InvalidSolanaAddress, field)
                .with_message("Invalid Base58 encoding")
                .with_fix(err.to_string()),
        ],
    }
}
