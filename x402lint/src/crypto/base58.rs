//! Base58 decoding (Bitcoin alphabet).

/// Failure to decode a Base58 string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid Base58 string: {0}")]
pub struct Base58Error(#[from] bs58::decode::Error);

/// Decodes a Base58 string into bytes.
///
/// Each leading `1` becomes a leading zero byte. The empty string decodes to
/// an empty vector.
///
/// # Errors
///
/// Returns [`Base58Error`] if the input contains a character outside the
/// Base58 alphabet (which excludes `0`, `O`, `I` and `l`).
pub fn decode_base58(input: &str) -> Result<Vec<u8>, Base58Error> {
    Ok(bs58::decode(input).into_vec()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_ones_decode_to_zero_bytes() {
        let decoded = decode_base58("11111111111111111111111111111111").unwrap();
        assert_eq!(decoded, vec![0u8; 32]);
    }

    #[test]
    fn test_preserves_leading_zero_bytes() {
        let decoded = decode_base58("111abc").unwrap();
        assert_eq!(&decoded[..3], &[0, 0, 0]);
        assert!(decoded.len() > 3);
    }

    #[test]
    fn test_solana_usdc_mint_is_32_bytes() {
        let decoded = decode_base58("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v").unwrap();
        assert_eq!(decoded.len(), 32);
    }

    #[test]
    fn test_rejects_excluded_characters() {
        for bad in ["0OIl", "0", "O", "I", "l", "abc0"] {
            assert!(decode_base58(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(decode_base58("").unwrap().is_empty());
    }
}
