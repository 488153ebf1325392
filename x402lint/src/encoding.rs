//! Base64 JSON payloads of the `PAYMENT-REQUIRED` header.
//!
//! Servers put the same config they would send as a body into the header,
//! serialized to JSON and encoded as standard base64. [`HeaderPayload`] goes
//! both ways: [`decode`](HeaderPayload::decode) for extraction and
//! [`encode`](HeaderPayload::encode) for building responses.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as b64;
use serde_json::Value;

/// Raw bytes of a header value expected to hold base64-encoded JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderPayload(pub Vec<u8>);

/// A header payload that does not decode to JSON.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// Not standard base64.
    #[error("payload is not base64: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Base64, but the decoded bytes are not JSON.
    #[error("decoded payload is not JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl HeaderPayload {
    /// Decodes the base64 text and parses the result as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Base64`] for text that is not standard base64
    /// and [`PayloadError::Json`] when the decoded bytes are not JSON.
    pub fn decode(&self) -> Result<Value, PayloadError> {
        let json = b64.decode(&self.0)?;
        Ok(serde_json::from_slice(&json)?)
    }

    /// Serializes `value` to compact JSON and encodes it as base64.
    #[must_use]
    pub fn encode(value: &Value) -> Self {
        Self(b64.encode(value.to_string()).into_bytes())
    }
}

impl AsRef<[u8]> for HeaderPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<&[u8]> for HeaderPayload {
    fn from(slice: &[u8]) -> Self {
        Self(slice.to_vec())
    }
}

impl fmt::Display for HeaderPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.0))
    }
}
