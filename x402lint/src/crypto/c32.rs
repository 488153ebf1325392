//! c32check decoding for Stacks addresses.
//!
//! A Stacks address is `S`, one version character, then the c32 (Crockford
//! base-32) encoding of `payload || checksum`, where the checksum is the first
//! four bytes of `sha256(sha256(version || payload))`.

use sha2::{Digest, Sha256};

const C32_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Failure to decode a c32check address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum C32Error {
    /// The address has five characters or fewer.
    #[error("c32 address is too short")]
    TooShort,
    /// A character is outside the c32 alphabet.
    #[error("invalid c32 character {0:?}")]
    InvalidCharacter(char),
    /// The trailing checksum does not match the payload.
    #[error("c32check checksum mismatch")]
    ChecksumMismatch,
}

/// Uppercases and folds the visually ambiguous letters onto digits.
fn normalize(input: &str) -> String {
    input
        .to_uppercase()
        .chars()
        .map(|c| match c {
            'O' => '0',
            'L' | 'I' => '1',
            other => other,
        })
        .collect()
}

fn digit(c: char) -> Result<u8, C32Error> {
    C32_ALPHABET
        .iter()
        .position(|&a| char::from(a) == c)
        .and_then(|p| u8::try_from(p).ok())
        .ok_or(C32Error::InvalidCharacter(c))
}

/// Decodes normalized c32 text into bytes, one zero byte per leading `0`.
fn decode(input: &str) -> Result<Vec<u8>, C32Error> {
    let leading_zeros = input.chars().take_while(|&c| c == '0').count();
    // little-endian while accumulating
    let mut magnitude: Vec<u8> = Vec::with_capacity(input.len() * 5 / 8 + 1);

    for c in input.chars() {
        let mut carry = u32::from(digit(c)?);
        for byte in &mut magnitude {
            let value = u32::from(*byte) * 32 + carry;
            *byte = value.to_le_bytes()[0];
            carry = value >> 8;
        }
        while carry > 0 {
            magnitude.push(carry.to_le_bytes()[0]);
            carry >>= 8;
        }
    }

    let mut bytes = vec![0u8; leading_zeros];
    bytes.extend(magnitude.iter().rev());
    Ok(bytes)
}

/// Decodes a c32check Stacks address into `(version, payload)`.
///
/// The leading `S` is skipped without inspection, and any `.contract-name`
/// suffix must already be stripped. Input is case-insensitive.
///
/// # Errors
///
/// Returns [`C32Error`] if the address is too short, contains a character
/// outside the c32 alphabet, or fails its checksum.
pub fn decode_c32_address(address: &str) -> Result<(u8, Vec<u8>), C32Error> {
    if address.chars().count() <= 5 {
        return Err(C32Error::TooShort);
    }
    let normalized = normalize(&address.chars().skip(1).collect::<String>());
    let mut chars = normalized.chars();
    let version_char = chars.next().ok_or(C32Error::TooShort)?;
    let version = digit(version_char)?;

    let decoded = decode(chars.as_str())?;
    if decoded.len() < 4 {
        return Err(C32Error::ChecksumMismatch);
    }
    let (payload, checksum) = decoded.split_at(decoded.len() - 4);

    let mut preimage = Vec::with_capacity(payload.len() + 1);
    preimage.push(version);
    preimage.extend_from_slice(payload);
    let expected = Sha256::digest(Sha256::digest(&preimage));
    if expected[..4] != *checksum {
        return Err(C32Error::ChecksumMismatch);
    }
    Ok((version, payload.to_vec()))
}
