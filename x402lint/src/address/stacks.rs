use std::sync::LazyLock;

use regex::Regex;

use crate::chain::ChainId;
use crate::crypto::decode_c32_address;
use crate::error::{IssueCode, ValidationIssue};

static STACKS_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^S[PMTN]").expect("static Stacks prefix pattern"));

const MAINNET_P2PKH: u8 = 22;
const MAINNET_P2SH: u8 = 20;
const TESTNET_P2PKH: u8 = 26;
const TESTNET_P2SH: u8 = 21;

const MAINNET_REFERENCE: &str = "1";
const TESTNET_REFERENCE: &str = "2147483648";

/// Validates a Stacks address against the network it is used on.
///
/// A `.contract-name` suffix is ignored. The address must start with `SP`,
/// `SM`, `ST` or `SN` and pass its c32check checksum. On `stacks:1` the
/// version must be a mainnet one (22 or 20); on `stacks:2147483648` a testnet
/// one (26 or 21). Every finding is an error.
#[must_use]
pub fn validate_stacks_address(address: &str, network: &str, field: &str) -> Vec<ValidationIssue> {
    let base = address.split('.').next().unwrap_or(address);

    if !STACKS_PREFIX.is_match(base) {
        return vec![
            ValidationIssue::error(IssueCode::InvalidStacksAddress, field)
                .with_fix("Stacks addresses start with SP, SM, ST, or SN"),
        ];
    }

    let Ok((version, _)) = decode_c32_address(base) else {
        return vec![
            ValidationIssue::error(IssueCode::InvalidStacksAddress, field)
                .with_message("Invalid Stacks address checksum. Double-check the address for typos."),
        ];
    };

    let chain = network.parse::<ChainId>().ok();
    let reference = chain.as_ref().map_or("", ChainId::reference);
    let mainnet = matches!(version, MAINNET_P2PKH | MAINNET_P2SH);
    let testnet = matches!(version, TESTNET_P2PKH | TESTNET_P2SH);

    match reference {
        MAINNET_REFERENCE if !mainnet => vec![
            ValidationIssue::error(IssueCode::StacksNetworkMismatch, field)
                .with_message(
                    "This is a Stacks testnet address but the network is set to mainnet (stacks:1)",
                )
                .with_fix(
                    "Use stacks:2147483648 for testnet addresses, or use a mainnet address (SP/SM prefix)",
                ),
        ],
        TESTNET_REFERENCE if !testnet => vec![
            ValidationIssue::error(IssueCode::StacksNetworkMismatch, field)
                .with_message(
                    "This is a Stacks mainnet address but the network is set to testnet (stacks:2147483648)",
                )
                .with_fix(
                    "Use stacks:1 for mainnet addresses, or use a testnet address (ST/SN prefix)",
                ),
        ],
        _ if !mainnet && !testnet => vec![
            ValidationIssue::error(IssueCode::InvalidStacksAddress, field)
                .with_message("Unrecognized Stacks address version"),
        ],
        _ => Vec::new(),
    }
}
