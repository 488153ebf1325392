//! Wire and canonical data model for x402 payment configs.
//!
//! Servers publish payment configs in several shapes. This module defines the
//! single canonical shape ([`CanonicalConfig`]) every single-endpoint format is
//! normalized into, plus the [`Manifest`] collection shape.
//!
//! # Formats
//!
//! | Format | Marker | Amount field | Resource |
//! |--------|--------|--------------|----------|
//! | [`ConfigFormat::V2`] | `x402Version: 2` + `accepts` array | `amount` | top-level |
//! | [`ConfigFormat::V1`] | `x402Version: 1` + `accepts` array | `maxAmountRequired` | per entry |
//! | [`ConfigFormat::Manifest`] | `endpoints` object of configs | per endpoint | per endpoint |
//!
//! Entry fields are read leniently: strings are kept verbatim, numbers are
//! stringified, anything else counts as missing. The rules, not the model,
//! decide what is wrong with a config.

mod manifest;

pub use manifest::{Manifest, ServiceContact, ServiceMetadata};

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::InputError;

/// The canonical protocol version every normalized config carries.
pub const CANONICAL_VERSION: u64 = 2;

/// Field names of a v2 payment option that map onto [`PaymentOption`] fields.
const OPTION_FIELDS: &[&str] = &[
    "scheme",
    "network",
    "amount",
    "asset",
    "payTo",
    "maxTimeoutSeconds",
    "extra",
];

/// Detected shape of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigFormat {
    /// Multi-endpoint manifest (`endpoints` object).
    Manifest,
    /// Canonical v2 config.
    V2,
    /// Legacy v1 config.
    V1,
    /// None of the recognized shapes.
    Unknown,
}

impl ConfigFormat {
    /// Returns the wire tag of this format (e.g. `"v2"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manifest => "manifest",
            Self::V2 => "v2",
            Self::V1 => "v1",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw input accepted by every entry point: JSON text or an already-parsed value.
///
/// Both forms are handled identically; text is parsed first.
#[derive(Debug, Clone, Copy)]
pub enum ConfigInput<'a> {
    /// Unparsed JSON text.
    Text(&'a str),
    /// An already-parsed JSON value.
    Value(&'a Value),
}

impl<'a> ConfigInput<'a> {
    /// Parses the input into a JSON value, borrowing when it is already parsed.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidJson`] if text input is not valid JSON.
    pub fn parse(self) -> Result<Cow<'a, Value>, InputError> {
        match self {
            Self::Text(text) => Ok(Cow::Owned(serde_json::from_str(text)?)),
            Self::Value(value) => Ok(Cow::Borrowed(value)),
        }
    }
}

impl<'a> From<&'a str> for ConfigInput<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a String> for ConfigInput<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(value)
    }
}

impl<'a> From<&'a Value> for ConfigInput<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Value(value)
    }
}

/// Anything a config can be read from without copying.
///
/// Implemented for JSON text (`str`, `String`), parsed JSON ([`Value`]) and
/// [`ConfigInput`] itself, so entry points accept `&str`, `&String`,
/// `&Value` and `&ConfigInput` alike.
pub trait AsConfigInput {
    /// Borrows `self` as raw input.
    fn as_config_input(&self) -> ConfigInput<'_>;
}

impl AsConfigInput for str {
    fn as_config_input(&self) -> ConfigInput<'_> {
        ConfigInput::Text(self)
    }
}

impl AsConfigInput for String {
    fn as_config_input(&self) -> ConfigInput<'_> {
        ConfigInput::Text(self)
    }
}

impl AsConfigInput for Value {
    fn as_config_input(&self) -> ConfigInput<'_> {
        ConfigInput::Value(self)
    }
}

impl AsConfigInput for ConfigInput<'_> {
    fn as_config_input(&self) -> ConfigInput<'_> {
        *self
    }
}

/// Reads a field as a string: strings verbatim, numbers stringified, else empty.
pub(crate) fn lenient_string(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

fn optional_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// The HTTP resource a config protects.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Resource URL. Empty when absent.
    #[serde(default)]
    pub url: String,

    /// Optional HTTP method.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Optional request headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Value>,

    /// Optional request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,

    /// Any other descriptor fields (`description`, `mimeType`, ...).
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Resource {
    /// Creates a resource with only a URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Reads a resource descriptor from a raw value.
    ///
    /// Objects are read field by field and a bare string is taken as the URL
    /// (the historical v1 shape). Anything else yields `None`.
    #[must_use]
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(url) => Some(Self::new(url.clone())),
            Value::Object(map) => Some(Self {
                url: lenient_string(map, "url"),
                method: optional_string(map, "method"),
                headers: map.get("headers").cloned(),
                body: map.get("body").cloned(),
                other: map
                    .iter()
                    .filter(|(key, _)| !matches!(key.as_str(), "url" | "method" | "headers" | "body"))
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            }),
            _ => None,
        }
    }
}

/// One canonical entry of the `accepts` array.
///
/// # JSON Format
///
/// ```json
/// {
///   "scheme": "exact",
///   "network": "eip155:8453",
///   "amount": "1000000",
///   "asset": "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
///   "payTo": "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
///   "maxTimeoutSeconds": 300
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentOption {
    /// Payment scheme tag (e.g. `"exact"`).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub scheme: String,

    /// CAIP-2 network identifier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub network: String,

    /// Amount in atomic units, as a decimal string.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub amount: String,

    /// Token address or identifier.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub asset: String,

    /// Recipient address.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pay_to: String,

    /// Timeout exactly as given; validated by the timeout rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_timeout_seconds: Option<Value>,

    /// Scheme-specific extra data, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Value>,

    /// Unrecognized fields of a v2 entry, kept verbatim.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl PaymentOption {
    /// Reads a v2 entry, keeping unknown fields. Non-objects yield an empty option.
    #[must_use]
    pub fn from_v2_entry(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        Self {
            amount: lenient_string(map, "amount"),
            other: map
                .iter()
                .filter(|(key, _)| !OPTION_FIELDS.contains(&key.as_str()))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            ..Self::common_fields(map)
        }
    }

    /// Reads a v1 entry, renaming `maxAmountRequired` to `amount`.
    ///
    /// Only the canonical fields survive; the per-entry resource and any other
    /// v1 fields are dropped here.
    #[must_use]
    pub fn from_v1_entry(value: &Value) -> Self {
        let Some(map) = value.as_object() else {
            return Self::default();
        };
        Self {
            amount: lenient_string(map, "maxAmountRequired"),
            ..Self::common_fields(map)
        }
    }

    fn common_fields(map: &Map<String, Value>) -> Self {
        Self {
            scheme: lenient_string(map, "scheme"),
            network: lenient_string(map, "network"),
            amount: String::new(),
            asset: lenient_string(map, "asset"),
            pay_to: lenient_string(map, "payTo"),
            max_timeout_seconds: map.get("maxTimeoutSeconds").cloned(),
            extra: map.get("extra").cloned(),
            other: Map::new(),
        }
    }
}

/// The single normalized shape of a payment config.
///
/// # JSON Format
///
/// ```json
/// {
///   "x402Version": 2,
///   "accepts": [{ "scheme": "exact", "network": "eip155:8453", ... }],
///   "resource": { "url": "https://api.example.com/data" },
///   "extensions": { "bazaar": { ... } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalConfig {
    /// Protocol version; always [`CANONICAL_VERSION`] after normalization.
    pub x402_version: u64,

    /// Accepted payment options, in document order.
    pub accepts: Vec<PaymentOption>,

    /// The protected resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Resource>,

    /// Optional server error message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Optional extension data (e.g. `bazaar`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}

impl CanonicalConfig {
    /// Creates a config with the canonical version and the given options.
    #[must_use]
    pub const fn new(accepts: Vec<PaymentOption>) -> Self {
        Self {
            x402_version: CANONICAL_VERSION,
            accepts,
            resource: None,
            error: None,
            extensions: None,
        }
    }

    /// Returns `extensions.bazaar`, if present.
    #[must_use]
    pub fn bazaar(&self) -> Option<&Value> {
        self.extensions.as_ref()?.get("bazaar")
    }
}
