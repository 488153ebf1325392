use serde_json::{Map, Value};

use super::detect::detect_value;
use crate::proto::{AsConfigInput, CanonicalConfig, ConfigFormat, PaymentOption, Resource};

/// Normalizes a v2 or v1 config into the canonical shape.
///
/// Returns `None` for manifests (they are collections, see
/// [`validate_manifest`](crate::validate_manifest)), for unknown formats and
/// for unparseable text.
#[must_use]
pub fn normalize(input: &(impl AsConfigInput + ?Sized)) -> Option<CanonicalConfig> {
    let value = input.as_config_input().parse().ok()?;
    normalize_value(&value)
}

/// Normalizes an already-parsed value. See [`normalize`].
#[must_use]
pub fn normalize_value(value: &Value) -> Option<CanonicalConfig> {
    let map = value.as_object()?;
    match detect_value(value) {
        ConfigFormat::V2 => Some(normalize_v2(map)),
        ConfigFormat::V1 => Some(normalize_v1(map)),
        ConfigFormat::Manifest | ConfigFormat::Unknown => None,
    }
}

fn accepts(map: &Map<String, Value>) -> &[Value] {
    map.get("accepts")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn carry_over(map: &Map<String, Value>, config: &mut CanonicalConfig) {
    config.error = map.get("error").and_then(Value::as_str).map(str::to_owned);
    config.extensions = map.get("extensions").and_then(Value::as_object).cloned();
}

fn normalize_v2(map: &Map<String, Value>) -> CanonicalConfig {
    let mut config = CanonicalConfig::new(
        accepts(map)
            .iter()
            .map(PaymentOption::from_v2_entry)
            .collect(),
    );
    config.resource = map.get("resource").and_then(Resource::from_value);
    carry_over(map, &mut config);
    config
}

/// The first entry carrying a resource wins; later per-entry resources are dropped.
fn normalize_v1(map: &Map<String, Value>) -> CanonicalConfig {
    let entries = accepts(map);
    let mut config = CanonicalConfig::new(entries.iter().map(PaymentOption::from_v1_entry).collect());
    config.resource = entries
        .iter()
        .find_map(|entry| entry.get("resource").and_then(Resource::from_value));
    carry_over(map, &mut config);
    config
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::proto::CANONICAL_VERSION;

    fn v1_config() -> Value {
        json!({
            "x402Version": 1,
            "accepts": [
                {
                    "scheme": "exact",
                    "network": "eip155:8453",
                    "maxAmountRequired": "500000",
                    "asset": "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
                    "payTo": "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
                    "maxTimeoutSeconds": 120,
                    "resource": {"url": "https://example.com/api/v1"},
                    "extra": {"name": "USD Coin", "version": "2"}
                },
                {
                    "scheme": "exact",
                    "network": "eip155:84532",
                    "maxAmountRequired": "1",
                    "asset": "0x036CbD53842c5426634e7929541eC2318f3dCF7e",
                    "payTo": "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
                    "resource": {"url": "https://example.com/api/other"}
                }
            ],
            "error": "Payment required",
            "extensions": {"custom": "value"}
        })
    }

    #[test]
    fn test_v2_pass_through() {
        let input = json!({
            "x402Version": 2,
            "accepts": [{
                "scheme": "exact",
                "network": "eip155:8453",
                "amount": "1000000",
                "asset": "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
                "payTo": "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
                "maxTimeoutSeconds": 300,
                "extra": {"foo": "bar"}
            }],
            "resource": {"url": "https://example.com/api/data"},
            "extensions": {"custom": "value"}
        });
        let config = normalize(&input).unwrap();
        assert_eq!(config.x402_version, CANONICAL_VERSION);
        assert_eq!(config.accepts.len(), 1);
        assert_eq!(config.accepts[0].extra, Some(json!({"foo": "bar"})));
        assert_eq!(config.extensions.unwrap()["custom"], "value");

        let round = serde_json::to_value(normalize(&input).unwrap()).unwrap();
        assert_eq!(round, input);
    }

    #[test]
    fn test_v1_maps_amount_and_lifts_first_resource() {
        let config = normalize(&v1_config()).unwrap();
        assert_eq!(config.x402_version, 2);
        assert_eq!(config.accepts[0].amount, "500000");
        assert_eq!(config.accepts[1].amount, "1");
        assert_eq!(config.resource.unwrap().url, "https://example.com/api/v1");
        assert_eq!(config.error.as_deref(), Some("Payment required"));
        assert_eq!(config.accepts[0].extra, Some(json!({"name": "USD Coin", "version": "2"})));
        assert!(config.accepts[1].max_timeout_seconds.is_none());
    }

    #[test]
    fn test_v1_resource_string_is_lifted() {
        let config = normalize(&json!({
            "x402Version": 1,
            "accepts": [{"scheme": "exact", "resource": "https://example.com/legacy"}]
        }))
        .unwrap();
        assert_eq!(config.resource.unwrap().url, "https://example.com/legacy");
    }

    #[test]
    fn test_text_and_value_agree() {
        let value = v1_config();
        assert_eq!(normalize(&value), normalize(value.to_string().as_str()));
    }

    #[test]
    fn test_idempotent_on_canonical_output() {
        let once = normalize(&v1_config()).unwrap();
        let twice = normalize(&serde_json::to_value(&once).unwrap()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_manifest_and_unknown_yield_none() {
        assert!(normalize(&json!({"endpoints": {}})).is_none());
        assert!(normalize(&json!({"payTo": "0xabc"})).is_none());
        assert!(normalize("not json").is_none());
        assert!(normalize(&json!([1, 2, 3])).is_none());
    }
}
