//! Byte-level codecs used by the address validators.
//!
//! - [`base58`] - Base58 decoding (Solana public keys)
//! - [`keccak`] - Keccak-256 and EIP-55 mixed-case checksums (EVM addresses)
//! - [`c32`] - c32check decoding with version byte (Stacks addresses)
//!
//! All functions are pure and stateless.

pub mod base58;
pub mod c32;
pub mod keccak;

pub use base58::{Base58Error, decode_base58};
pub use c32::{C32Error, decode_c32_address};
pub use keccak::{is_valid_checksum, keccak256_hex, to_checksum_address};
