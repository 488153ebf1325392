//! Registry of well-known blockchain networks.
//!
//! Two read-only tables, built once on first use:
//!
//! - [`KNOWN_NETWORKS`]: CAIP-2 identifier → display metadata
//! - [`SIMPLE_NAMES`]: legacy simple name (e.g. `"base"`) → CAIP-2 identifier
//!
//! Syntactically valid identifiers missing from the registry are still
//! accepted by the validator; they are only flagged with a warning.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::chain::is_valid_caip2;

/// Chain family of a known network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// EIP-155 chains.
    Evm,
    /// Solana clusters.
    Solana,
    /// Stellar networks.
    Stellar,
    /// Aptos networks.
    Aptos,
    /// Stacks networks.
    Stacks,
}

impl NetworkType {
    /// Returns the lowercase wire name of this family.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Evm => "evm",
            Self::Solana => "solana",
            Self::Stellar => "stellar",
            Self::Aptos => "aptos",
            Self::Stacks => "stacks",
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display metadata for a known network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    /// CAIP-2 identifier (e.g. `eip155:8453`).
    pub caip2: &'static str,
    /// Human-readable name (e.g. `"Base Sepolia"`).
    pub name: &'static str,
    /// Chain family.
    #[serde(rename = "type")]
    pub network_type: NetworkType,
    /// Whether this is a test network.
    pub testnet: bool,
}

const fn network(
    caip2: &'static str,
    name: &'static str,
    network_type: NetworkType,
    testnet: bool,
) -> NetworkInfo {
    NetworkInfo {
        caip2,
        name,
        network_type,
        testnet,
    }
}

/// Every network the registry knows about.
pub static NETWORKS: &[NetworkInfo] = &[
    network("eip155:8453", "Base", NetworkType::Evm, false),
    network("eip155:84532", "Base Sepolia", NetworkType::Evm, true),
    network("eip155:43114", "Avalanche C-Chain", NetworkType::Evm, false),
    network("eip155:43113", "Avalanche Fuji", NetworkType::Evm, true),
    network(
        "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp",
        "Solana",
        NetworkType::Solana,
        false,
    ),
    network(
        "solana:EtWTRABZaYq6iMfeYKouRu166VU2xqa1",
        "Solana Devnet",
        NetworkType::Solana,
        true,
    ),
    network(
        "solana:4uhcVJyU9pJkvQyS88uRDiswHXSCkY3z",
        "Solana Testnet",
        NetworkType::Solana,
        true,
    ),
    network("stacks:1", "Stacks", NetworkType::Stacks, false),
    network("stacks:2147483648", "Stacks Testnet", NetworkType::Stacks, true),
    network("stellar:pubnet", "Stellar", NetworkType::Stellar, false),
    network("stellar:testnet", "Stellar Testnet", NetworkType::Stellar, true),
    // community convention, not an official CAIP namespace
    network("aptos:1", "Aptos", NetworkType::Aptos, false),
    network("aptos:2", "Aptos Testnet", NetworkType::Aptos, true),
];

/// CAIP-2 identifier → network metadata.
pub static KNOWN_NETWORKS: LazyLock<HashMap<&'static str, NetworkInfo>> =
    LazyLock::new(|| NETWORKS.iter().map(|info| (info.caip2, *info)).collect());

/// Lowercase legacy simple name → canonical CAIP-2 identifier.
pub static SIMPLE_NAMES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("base", "eip155:8453"),
        ("base-sepolia", "eip155:84532"),
        ("base_sepolia", "eip155:84532"),
        ("avalanche", "eip155:43114"),
        ("avalanche-fuji", "eip155:43113"),
        ("solana", "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp"),
        ("solana-devnet", "solana:EtWTRABZaYq6iMfeYKouRu166VU2xqa1"),
        ("solana-testnet", "solana:4uhcVJyU9pJkvQyS88uRDiswHXSCkY3z"),
        ("stacks", "stacks:1"),
        ("stacks-mainnet", "stacks:1"),
        ("stacks-testnet", "stacks:2147483648"),
        ("stellar", "stellar:pubnet"),
        ("stellar-testnet", "stellar:testnet"),
        ("aptos", "aptos:1"),
    ])
});

/// Returns `true` if the identifier is in the registry.
#[must_use]
pub fn is_known_network(caip2: &str) -> bool {
    KNOWN_NETWORKS.contains_key(caip2)
}

/// Looks up registry metadata for a CAIP-2 identifier.
#[must_use]
pub fn network_info(caip2: &str) -> Option<&'static NetworkInfo> {
    KNOWN_NETWORKS.get(caip2)
}

/// Extracts the namespace of a syntactically valid CAIP-2 identifier.
///
/// Returns `None` when `caip2` is not valid CAIP-2.
#[must_use]
pub fn network_namespace(caip2: &str) -> Option<&str> {
    if !is_valid_caip2(caip2) {
        return None;
    }
    caip2.split_once(':').map(|(namespace, _)| namespace)
}

/// Resolves a legacy simple name to its canonical CAIP-2 identifier.
///
/// The lookup is case-insensitive.
#[must_use]
pub fn canonical_network(name: &str) -> Option<&'static str> {
    SIMPLE_NAMES.get(name.to_lowercase().as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        let base = network_info("eip155:8453").unwrap();
        assert_eq!(base.name, "Base");
        assert_eq!(base.network_type, NetworkType::Evm);
        assert!(!base.testnet);

        let stacks_testnet = network_info("stacks:2147483648").unwrap();
        assert_eq!(stacks_testnet.network_type, NetworkType::Stacks);
        assert!(stacks_testnet.testnet);

        assert!(network_info("eip155:999999").is_none());
        assert!(!is_known_network("eip155:1"));
    }

    #[test]
    fn test_every_entry_is_valid_caip2() {
        for info in NETWORKS {
            assert!(is_valid_caip2(info.caip2), "{}", info.caip2);
        }
        assert_eq!(KNOWN_NETWORKS.len(), NETWORKS.len());
    }

    #[test]
    fn test_simple_names_resolve_to_known_networks() {
        for (name, caip2) in SIMPLE_NAMES.iter() {
            assert!(is_known_network(caip2), "{name} -> {caip2}");
        }
    }

    #[test]
    fn test_canonical_network_is_case_insensitive() {
        assert_eq!(canonical_network("base"), Some("eip155:8453"));
        assert_eq!(canonical_network("BASE"), Some("eip155:8453"));
        assert_eq!(canonical_network("Base-Sepolia"), Some("eip155:84532"));
        assert_eq!(canonical_network("base_sepolia"), Some("eip155:84532"));
        assert_eq!(canonical_network("stacks-mainnet"), Some("stacks:1"));
        assert_eq!(canonical_network("polygon"), None);
    }

    #[test]
    fn test_network_namespace() {
        assert_eq!(network_namespace("eip155:8453"), Some("eip155"));
        assert_eq!(
            network_namespace("solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp"),
            Some("solana")
        );
        assert_eq!(network_namespace("base"), None);
        assert_eq!(network_namespace("eip155:"), None);
    }

    #[test]
    fn test_network_type_serializes_lowercase() {
        let json = serde_json::to_value(NetworkType::Stellar).unwrap();
        assert_eq!(json, "stellar");
        assert_eq!(NetworkType::Evm.to_string(), "evm");
    }
}
