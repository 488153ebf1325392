//! Keccak-256 hashing and EIP-55 address checksums.
//!
//! Keccak-256 here is the original Keccak padding used by Ethereum, which is
//! not the same function as NIST SHA3-256.

use alloy_primitives::{hex, keccak256};

/// Failure to checksum a string that is not an EVM address.
#[derive(Debug, thiserror::Error)]
#[error("not an EVM address: {0:?}")]
pub struct ChecksumError(String);

/// Hashes `input` with Keccak-256 and returns 64 lowercase hex digits, no `0x`.
#[must_use]
pub fn keccak256_hex(input: impl AsRef<[u8]>) -> String {
    hex::encode(keccak256(input))
}

fn hex_digits(address: &str) -> Option<&str> {
    let digits = address.strip_prefix("0x")?;
    (digits.len() == 40 && digits.bytes().all(|b| b.is_ascii_hexdigit())).then_some(digits)
}

/// Computes the EIP-55 mixed-case form of an EVM address.
///
/// The lowercase hex string (not its bytes) is hashed; each letter whose
/// matching hash nibble is at least 8 is uppercased. Input case is ignored.
///
/// # Errors
///
/// Returns [`ChecksumError`] unless `address` is `0x` followed by 40 hex digits.
pub fn to_checksum_address(address: &str) -> Result<String, ChecksumError> {
    let digits = hex_digits(address).ok_or_else(|| ChecksumError(address.to_owned()))?;
    let lower = digits.to_ascii_lowercase();
    let hash = keccak256(lower.as_bytes()).0;

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

/// Returns `true` only if `address` exactly matches its EIP-55 form.
///
/// All-lowercase and all-uppercase addresses carry no checksum information and
/// return `false` unless they happen to coincide with the checksummed form.
#[must_use]
pub fn is_valid_checksum(address: &str) -> bool {
    to_checksum_address(address).is_ok_and(|expected| expected == address)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use alloy_primitives::Address;

    use super::*;

    const VECTORS: &[(&str, &str)] = &[
        (
            "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359",
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359",
        ),
        (
            "0xdbf03b407c01e7cd3cbea99509d93f8dddc8c6fb",
            "0xdbF03B407c01E7cD3CBea99509d93f8DDDC8C6FB",
        ),
        (
            "0xd1220a0cf47c7b9be7a2e6ba89f429762e7b9adb",
            "0xD1220A0cf47c7B9Be7A2E6BA89F429762e7b9aDb",
        ),
        (
            "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
        ),
    ];

    #[test]
    fn test_keccak_empty_is_not_sha3() {
        let digest = keccak256_hex("");
        assert_eq!(
            digest,
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
        assert_ne!(
            digest,
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn test_keccak_hello_world() {
        assert_eq!(
            keccak256_hex(b"hello world"),
            "47173285a8d7341e5e972fc677286384f802f8ef42a5ec5f03bbfa254cb01fad"
        );
        assert_eq!(keccak256_hex("").len(), 64);
    }

    #[test]
    fn test_checksum_reference_vectors() {
        for (lower, expected) in VECTORS {
            assert_eq!(to_checksum_address(lower).unwrap(), *expected);
            assert!(is_valid_checksum(expected));
        }
    }

    #[test]
    fn test_checksum_agrees_with_alloy() {
        for (lower, _) in VECTORS {
            let address = Address::from_str(lower).unwrap();
            assert_eq!(to_checksum_address(lower).unwrap(), address.to_checksum(None));
        }
    }

    #[test]
    fn test_is_valid_checksum_rejects_wrong_case() {
        assert!(!is_valid_checksum("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAeD"));
        assert!(!is_valid_checksum("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
        assert!(!is_valid_checksum("0x5AAEB6053F3E94C9B9A09F33669435E7EF1BEAED"));
        assert!(!is_valid_checksum("not an address"));
    }

    #[test]
    fn test_checksum_rejects_malformed_input() {
        assert!(to_checksum_address("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").is_err());
        assert!(to_checksum_address("0x5aaeb6053f3e94c9b9a09f33669435e7ef1bea").is_err());
        assert!(to_checksum_address("0xZZaeb6053f3e94c9b9a09f33669435e7ef1beaed").is_err());
    }
}
