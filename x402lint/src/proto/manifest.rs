//! Multi-endpoint manifest documents.
//!
//! Only the envelope is typed; endpoint configs stay raw JSON until they are
//! validated one by one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Contact details for the service behind a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceContact {
    /// Contact name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Service-level metadata of a manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMetadata {
    /// Service name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Service version string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Service homepage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Contact details.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<ServiceContact>,
}

/// A collection of payment configs keyed by endpoint ID.
///
/// Endpoint values are kept as raw JSON: each one is validated as a
/// standalone config, so nothing is coerced while building the collection.
/// Endpoint IDs are opaque and preserved verbatim.
///
/// # JSON Format
///
/// ```json
/// {
///   "service": { "name": "Weather API" },
///   "endpoints": {
///     "forecast": { "x402Version": 2, "accepts": [...], "resource": {...} }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    /// Optional service metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<ServiceMetadata>,

    /// Endpoint ID → endpoint config.
    #[serde(default)]
    pub endpoints: Map<String, Value>,

    /// Optional manifest-level extensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Map<String, Value>>,
}
