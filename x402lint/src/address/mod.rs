//! Payment-recipient address validation.
//!
//! [`validate_address`] dispatches on the CAIP-2 namespace of the network:
//!
//! | Namespace | Validator |
//! |-----------|-----------|
//! | `eip155`  | [`validate_evm_address`] (format + EIP-55 checksum) |
//! | `solana`  | [`validate_solana_address`] (Base58, 32 bytes) |
//! | `stacks`  | [`validate_stacks_address`] (c32check + network version) |
//! | anything else | accepted as-is |
//!
//! Cross-family mistakes (an `0x…` address on a Solana network, say) fail the
//! target family's own format check.

mod evm;
mod solana;
mod stacks;

pub use evm::validate_evm_address;
pub use solana::validate_solana_address;
pub use stacks::validate_stacks_address;

use crate::error::ValidationIssue;
use crate::networks::network_namespace;

/// Validates `address` against the address rules of `network`'s chain family.
///
/// Returns no issues when `network` is not valid CAIP-2 (network rules report
/// that) or when its namespace has no address validator (Stellar, Aptos and
/// unregistered namespaces).
#[must_use]
pub fn validate_address(address: &str, network: &str, field: &str) -> Vec<ValidationIssue> {
    match network_namespace(network) {
        Some("eip155") => validate_evm_address(address, field),
        Some("solana") => validate_solana_address(address, field),
        Some("stacks") => validate_stacks_address(address, network, field),
        _ => Vec::new(),
    }
}
