//! Best-effort promotion of non-standard manifests.
//!
//! Servers in the wild publish multi-endpoint documents in ad-hoc shapes:
//! endpoint arrays under various field names, or configs nested under
//! grouping keys. [`normalize_wild_manifest`] restructures such documents into
//! a [`Manifest`] and reports each restructuring as a warning.
//!
//! Endpoint configs are moved as-is. Amounts, recipients, networks and assets
//! are never rewritten.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
#[cfg(feature = "telemetry")]
use tracing::instrument;
use url::Url;

use super::guards::has_accepts_array;
use crate::error::{IssueCode, ValidationIssue};
use crate::proto::{Manifest, ServiceContact, ServiceMetadata};

/// Array fields that may hold endpoint lists, in lookup order.
const ARRAY_FIELDS: &[&str] = &["paymentEndpoints", "payments", "configs", "endpoints"];

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("static slug pattern"));

/// A restructured manifest plus the warnings describing what was changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WildManifestResult {
    /// The manifest in canonical shape.
    pub manifest: Manifest,
    /// One warning per restructuring step.
    pub warnings: Vec<ValidationIssue>,
}

/// Derives a stable endpoint ID from the entry's resource URL path.
///
/// `https://api.example.com/v1/weather/` becomes `v1-weather`. Entries without
/// a parseable absolute URL, or with an empty path, fall back to
/// `endpoint-<index>`. Taken IDs get `-2`, `-3`, ... appended.
fn endpoint_id(entry: &Map<String, Value>, index: usize, taken: &mut HashSet<String>) -> String {
    let base = entry
        .get("resource")
        .and_then(|resource| resource.get("url"))
        .and_then(Value::as_str)
        .and_then(|url| Url::parse(url).ok())
        .map(|url| {
            NON_ALPHANUMERIC
                .replace_all(url.path().trim_matches('/'), "-")
                .to_lowercase()
        })
        .filter(|slug| !slug.is_empty())
        .unwrap_or_else(|| format!("endpoint-{index}"));

    let mut id = base.clone();
    let mut suffix = 2;
    while taken.contains(&id) {
        id = format!("{base}-{suffix}");
        suffix += 1;
    }
    taken.insert(id.clone());
    id
}

fn array_style(input: &Map<String, Value>) -> Option<(Map<String, Value>, ValidationIssue)> {
    ARRAY_FIELDS.iter().find_map(|&field| {
        let items = input.get(field)?.as_array()?;
        let mut taken = HashSet::new();
        let endpoints: Map<String, Value> = items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| {
                let entry = item.as_object()?;
                Some((endpoint_id(entry, index, &mut taken), item.clone()))
            })
            .collect();
        (!endpoints.is_empty()).then(|| {
            (
                endpoints,
                ValidationIssue::warning(IssueCode::WildManifestArrayFormat, field),
            )
        })
    })
}

fn looks_like_config(value: &Value) -> bool {
    value.as_object().is_some_and(has_accepts_array)
}

fn nested_style(input: &Map<String, Value>) -> Option<(Map<String, Value>, ValidationIssue)> {
    let groups: Vec<(&String, &Map<String, Value>)> = input
        .iter()
        .filter_map(|(key, value)| Some((key, value.as_object()?)))
        .collect();

    let mut endpoints: Map<String, Value> = groups
        .iter()
        .filter(|(_, group)| has_accepts_array(group))
        .map(|(key, group)| ((*key).clone(), Value::Object((*group).clone())))
        .collect();

    if endpoints.is_empty() {
        endpoints = groups
            .iter()
            .flat_map(|(group_key, group)| {
                group
                    .iter()
                    .filter(|(_, value)| looks_like_config(value))
                    .map(move |(inner_key, value)| (format!("{group_key}-{inner_key}"), value.clone()))
            })
            .collect();
    }

    (!endpoints.is_empty()).then(|| {
        (
            endpoints,
            ValidationIssue::warning(IssueCode::WildManifestNestedFormat, "endpoints"),
        )
    })
}

fn string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn service_metadata(service: &Map<String, Value>) -> ServiceMetadata {
    ServiceMetadata {
        name: string_field(service, "name"),
        description: string_field(service, "description"),
        version: string_field(service, "version"),
        url: string_field(service, "url"),
        contact: service
            .get("contact")
            .and_then(Value::as_object)
            .map(|contact| ServiceContact {
                name: string_field(contact, "name"),
                email: string_field(contact, "email"),
                url: string_field(contact, "url"),
            }),
    }
}

/// Fills `slot` from the top-level field when the service object left it unset.
fn promote(slot: &mut Option<String>, value: Option<String>) -> bool {
    match value {
        Some(value) if slot.as_deref().is_none_or(str::is_empty) => {
            *slot = Some(value);
            true
        }
        _ => false,
    }
}

/// Restructures a non-standard multi-endpoint document into a [`Manifest`].
///
/// Returns `None` when the input is not an object, already has an
/// `endpoints` object, or matches no known pattern. Patterns are tried in
/// order:
///
/// 1. an array of endpoint objects under `paymentEndpoints`, `payments`,
///    `configs` or `endpoints` (first match wins; IDs derived from the
///    resource URL path)
/// 2. top-level objects with an `accepts` array, keyed as-is
/// 3. objects with an `accepts` array nested one level deeper, keyed
///    `<group>-<key>`
///
/// Service metadata is taken from a `service` object, with top-level `name`,
/// `description` and `version` filling any gaps. `extensions` is copied.
#[cfg_attr(feature = "telemetry", instrument(skip_all))]
#[must_use]
pub fn normalize_wild_manifest(input: &Value) -> Option<WildManifestResult> {
    let map = input.as_object()?;
    if map.get("endpoints").is_some_and(Value::is_object) {
        return None;
    }

    let (endpoints, warning) = array_style(map).or_else(|| nested_style(map))?;
    let mut warnings = vec![warning];

    let mut service = map
        .get("service")
        .and_then(Value::as_object)
        .map(service_metadata);

    let name = string_field(map, "name");
    let description = string_field(map, "description");
    let version = string_field(map, "version");
    if name.is_some() || description.is_some() || version.is_some() {
        let service = service.get_or_insert_with(ServiceMetadata::default);
        if promote(&mut service.name, name) {
            warnings.push(ValidationIssue::warning(
                IssueCode::WildManifestNamePromoted,
                "service.name",
            ));
        }
        promote(&mut service.description, description);
        promote(&mut service.version, version);
    }

    #[cfg(feature = "telemetry")]
    tracing::debug!(endpoints = endpoints.len(), warnings = warnings.len(), "Normalized wild manifest");

    Some(WildManifestResult {
        manifest: Manifest {
            service,
            endpoints,
            extensions: map.get("extensions").and_then(Value::as_object).cloned(),
        },
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entry(url: &str, amount: &str) -> Value {
        json!({
            "x402Version": 2,
            "accepts": [{
                "scheme": "exact",
                "network": "eip155:8453",
                "amount": amount,
                "asset": "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
                "payTo": "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"
            }],
            "resource": {"url": url}
        })
    }

    #[test]
    fn test_array_style_generates_ids_from_paths() {
        let input = json!({
            "paymentEndpoints": [
                entry("https://api.example.com/v1/weather/", "1000"),
                entry("https://api.example.com/v1/weather", "2000"),
                entry("https://api.example.com/", "3000"),
                "skipped",
                entry("/relative/path", "4000")
            ]
        });
        let result = normalize_wild_manifest(&input).unwrap();
        let ids: Vec<&String> = result.manifest.endpoints.keys().collect();
        assert_eq!(ids, ["v1-weather", "v1-weather-2", "endpoint-2", "endpoint-4"]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, IssueCode::WildManifestArrayFormat);
        assert_eq!(result.warnings[0].field, "paymentEndpoints");
    }

    #[test]
    fn test_first_array_field_wins() {
        let input = json!({
            "configs": [entry("https://a.example.com/one", "1")],
            "payments": [entry("https://a.example.com/two", "2")]
        });
        let result = normalize_wild_manifest(&input).unwrap();
        assert!(result.manifest.endpoints.contains_key("two"));
        assert_eq!(result.manifest.endpoints.len(), 1);
        assert_eq!(result.warnings[0].field, "payments");
    }

    #[test]
    fn test_endpoints_array_is_wild() {
        let input = json!({"endpoints": [entry("https://a.example.com/x_y", "1")]});
        let result = normalize_wild_manifest(&input).unwrap();
        assert!(result.manifest.endpoints.contains_key("x-y"));
    }

    #[test]
    fn test_nested_depth_one_and_two() {
        let depth_one = json!({"weather": entry("https://a.example.com/w", "1"), "other": {"x": 1}});
        let result = normalize_wild_manifest(&depth_one).unwrap();
        assert_eq!(result.manifest.endpoints.keys().collect::<Vec<_>>(), ["weather"]);
        assert_eq!(result.warnings[0].code, IssueCode::WildManifestNestedFormat);
        assert_eq!(result.warnings[0].field, "endpoints");

        let depth_two = json!({
            "weather": {"today": entry("https://a.example.com/t", "1"), "week": entry("https://a.example.com/w", "2")},
            "maps": {"tile": entry("https://a.example.com/m", "3")}
        });
        let result = normalize_wild_manifest(&depth_two).unwrap();
        assert_eq!(
            result.manifest.endpoints.keys().collect::<Vec<_>>(),
            ["weather-today", "weather-week", "maps-tile"]
        );
    }

    #[test]
    fn test_financial_fields_copied_verbatim() {
        let input = json!({"payments": [entry("https://a.example.com/p", "0001000")]});
        let result = normalize_wild_manifest(&input).unwrap();
        let accepted = &result.manifest.endpoints["p"]["accepts"][0];
        assert_eq!(accepted["amount"], "0001000");
        assert_eq!(accepted["payTo"], "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed");
        assert_eq!(accepted["network"], "eip155:8453");
        assert_eq!(accepted["asset"], "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");
    }

    #[test]
    fn test_service_metadata_and_name_promotion() {
        let input = json!({
            "name": "Top Name",
            "description": "Top description",
            "service": {"version": "1.0", "contact": {"email": "ops@example.com", "phone": 1}},
            "payments": [entry("https://a.example.com/p", "1")],
            "extensions": {"bazaar": {}}
        });
        let result = normalize_wild_manifest(&input).unwrap();
        let service = result.manifest.service.unwrap();
        assert_eq!(service.name.as_deref(), Some("Top Name"));
        assert_eq!(service.description.as_deref(), Some("Top description"));
        assert_eq!(service.version.as_deref(), Some("1.0"));
        assert_eq!(service.contact.unwrap().email.as_deref(), Some("ops@example.com"));
        assert!(result.manifest.extensions.unwrap().contains_key("bazaar"));
        assert_eq!(result.warnings.len(), 2);
        assert_eq!(result.warnings[1].code, IssueCode::WildManifestNamePromoted);
        assert_eq!(result.warnings[1].field, "service.name");
    }

    #[test]
    fn test_existing_service_name_is_kept() {
        let input = json!({
            "name": "Top Name",
            "service": {"name": "Service Name"},
            "payments": [entry("https://a.example.com/p", "1")]
        });
        let result = normalize_wild_manifest(&input).unwrap();
        assert_eq!(result.manifest.service.unwrap().name.as_deref(), Some("Service Name"));
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_unrecognized_inputs() {
        assert!(normalize_wild_manifest(&json!({"endpoints": {}})).is_none());
        assert!(normalize_wild_manifest(&json!({"hello": "world"})).is_none());
        assert!(normalize_wild_manifest(&json!({"payments": ["a", 1]})).is_none());
        assert!(normalize_wild_manifest(&json!([entry("https://a.example.com/p", "1")])).is_none());
    }
}
