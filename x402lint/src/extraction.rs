//! Locating a payment config inside an HTTP 402 response.
//!
//! The body wins when it is a JSON object (or JSON text of one) carrying any
//! of `accepts`, `payTo` or `x402Version`. Otherwise the `PAYMENT-REQUIRED`
//! header is read, first as base64-encoded JSON, then as raw JSON.

use http::header::{HeaderName, InvalidHeaderValue};
use http::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::encoding::HeaderPayload;

/// Header carrying a base64-encoded config.
pub const PAYMENT_REQUIRED_HEADER: &str = "PAYMENT-REQUIRED";

/// Top-level fields whose presence marks a body as a config.
const CONFIG_FIELDS: &[&str] = &["accepts", "payTo", "x402Version"];

/// The parts of an HTTP response a config can be extracted from.
///
/// A string body is treated as unparsed JSON text.
#[derive(Debug, Clone, Default)]
pub struct ResponseLike {
    /// Response body, parsed or as text.
    pub body: Option<Value>,
    /// Response headers; lookups are case-insensitive.
    pub headers: HeaderMap,
}

impl ResponseLike {
    /// A response with only a body.
    #[must_use]
    pub fn from_body(body: impl Into<Value>) -> Self {
        Self {
            body: Some(body.into()),
            headers: HeaderMap::new(),
        }
    }

    /// A response with only headers.
    #[must_use]
    pub const fn from_headers(headers: HeaderMap) -> Self {
        Self {
            body: None,
            headers,
        }
    }

    /// Sets the `PAYMENT-REQUIRED` header to `config`, base64-encoded.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHeaderValue`] if the encoded payload is not a legal
    /// header value.
    pub fn with_payment_required(mut self, config: &Value) -> Result<Self, InvalidHeaderValue> {
        let payload = HeaderPayload::encode(config);
        let value = HeaderValue::from_bytes(payload.as_ref())?;
        self.headers.insert(HeaderName::from_static("payment-required"), value);
        Ok(self)
    }
}

impl From<http::Response<Value>> for ResponseLike {
    fn from(response: http::Response<Value>) -> Self {
        let (parts, body) = response.into_parts();
        Self {
            body: Some(body),
            headers: parts.headers,
        }
    }
}

/// Where a config was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionSource {
    /// The response body.
    Body,
    /// The `PAYMENT-REQUIRED` header.
    Header,
}

/// A config found in a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// The raw config object.
    pub config: Value,
    /// Where it was found.
    pub source: ExtractionSource,
}

/// No config could be extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    /// Neither the body nor the header carries a config.
    #[error("No x402 config found in response body or PAYMENT-REQUIRED header")]
    NotFound,
    /// The header is present but decodes to no JSON object.
    #[error("PAYMENT-REQUIRED header is neither base64-encoded nor raw JSON config")]
    UndecodableHeader,
}

fn is_config_object(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| CONFIG_FIELDS.iter().any(|field| map.contains_key(*field)))
}

fn body_config(body: &Value) -> Option<Value> {
    let parsed = match body {
        Value::String(text) => serde_json::from_str(text).ok()?,
        other => other.clone(),
    };
    is_config_object(&parsed).then_some(parsed)
}

fn header_config(bytes: &[u8]) -> Option<Value> {
    let decoded = HeaderPayload::from(bytes).decode().ok().filter(Value::is_object);
    decoded.or_else(|| serde_json::from_slice::<Value>(bytes).ok().filter(Value::is_object))
}

/// Extracts the raw config from a response.
///
/// # Errors
///
/// Returns [`ExtractionError::NotFound`] when neither the body nor the header
/// is present and usable, and [`ExtractionError::UndecodableHeader`] when the
/// body is unusable and the header does not decode to a JSON object.
pub fn extract_config(response: &ResponseLike) -> Result<Extraction, ExtractionError> {
    if let Some(config) = response.body.as_ref().and_then(body_config) {
        return Ok(Extraction {
            config,
            source: ExtractionSource::Body,
        });
    }

    let header = response
        .headers
        .get(PAYMENT_REQUIRED_HEADER)
        .ok_or(ExtractionError::NotFound)?;
    let config = header_config(header.as_bytes()).ok_or(ExtractionError::UndecodableHeader)?;
    Ok(Extraction {
        config,
        source: ExtractionSource::Header,
    })
}
