//! Registry of well-known token deployments.
//!
//! Assets are keyed by CAIP-2 identifier, then by token address. EVM
//! addresses are stored lowercase and looked up case-insensitively; every
//! other family is matched exactly.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;

use crate::networks::network_namespace;

/// Metadata for a known token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssetInfo {
    /// Ticker symbol (e.g. `"USDC"`).
    pub symbol: &'static str,
    /// Full token name.
    pub name: &'static str,
    /// Number of decimal places in one whole token.
    pub decimals: u8,
}

const USDC: AssetInfo = AssetInfo {
    symbol: "USDC",
    name: "USD Coin",
    decimals: 6,
};

/// CAIP-2 identifier → token address → metadata.
pub static KNOWN_ASSETS: LazyLock<HashMap<&'static str, HashMap<&'static str, AssetInfo>>> =
    LazyLock::new(|| {
        HashMap::from([
            (
                "eip155:8453",
                HashMap::from([("0x833589fcd6edb6e08f4c7c32d4f71b54bda02913", USDC)]),
            ),
            (
                "eip155:84532",
                HashMap::from([("0x036cbd53842c5426634e7929541ec2318f3dcf7e", USDC)]),
            ),
            (
                "eip155:43114",
                HashMap::from([("0xb97ef9ef8734c71904d8002f8b6bc66dd9c48a6e", USDC)]),
            ),
            (
                "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp",
                HashMap::from([("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", USDC)]),
            ),
        ])
    });

/// Looks up token metadata for an asset address on a network.
#[must_use]
pub fn asset_info(network: &str, address: &str) -> Option<&'static AssetInfo> {
    let assets = KNOWN_ASSETS.get(network)?;
    if network_namespace(network) == Some("eip155") {
        assets.get(address.to_lowercase().as_str())
    } else {
        assets.get(address)
    }
}

/// Returns `true` if the asset is registered for the network.
#[must_use]
pub fn is_known_asset(network: &str, address: &str) -> bool {
    asset_info(network, address).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evm_lookup_ignores_case() {
        let checksummed = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
        let info = asset_info("eip155:8453", checksummed).unwrap();
        assert_eq!(info.symbol, "USDC");
        assert_eq!(info.decimals, 6);
        assert!(is_known_asset("eip155:8453", &checksummed.to_uppercase().replace("0X", "0x")));
    }

    #[test]
    fn test_solana_lookup_is_exact() {
        let mint = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
        assert!(is_known_asset("solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp", mint));
        assert!(!is_known_asset(
            "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp",
            &mint.to_lowercase()
        ));
    }

    #[test]
    fn test_unknown_network_or_asset() {
        assert!(asset_info("eip155:1", "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913").is_none());
        assert!(asset_info("eip155:8453", "0x0000000000000000000000000000000000000000").is_none());
        // registered on Base, not on Base Sepolia
        assert!(!is_known_asset("eip155:84532", "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913"));
    }

    #[test]
    fn test_registry_keys_are_lowercase_for_evm() {
        for (network, assets) in KNOWN_ASSETS.iter() {
            if network.starts_with("eip155:") {
                for address in assets.keys() {
                    assert_eq!(*address, address.to_lowercase());
                }
            }
        }
    }
}
