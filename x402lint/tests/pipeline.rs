use serde_json::{Value, json};
use x402lint::{
    ConfigFormat, DocumentResult, IssueCode, ResponseLike, ValidationOptions, check, detect,
    normalize, normalize_wild_manifest, validate, validate_document, validate_manifest,
};

fn v2_config(url: &str) -> Value {
    json!({
        "x402Version": 2,
        "accepts": [{
            "scheme": "exact",
            "network": "eip155:8453",
            "amount": "1000000",
            "asset": "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913",
            "payTo": "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "maxTimeoutSeconds": 60
        }],
        "resource": {"url": url},
        "extensions": {"bazaar": {
            "info": {
                "input": {"type": "http", "method": "POST", "body": {"type": "object"}},
                "output": {"type": "json"}
            },
            "schema": {"type": "object", "properties": {}}
        }}
    })
}

fn v1_config() -> Value {
    json!({
        "x402Version": 1,
        "accepts": [
            {
                "scheme": "exact",
                "network": "solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp",
                "maxAmountRequired": "250000",
                "asset": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
                "payTo": "11111111111111111111111111111111",
                "maxTimeoutSeconds": 30,
                "resource": {"url": "https://api.example.com/first"}
            },
            {
                "scheme": "exact",
                "network": "stacks:1",
                "maxAmountRequired": "100",
                "asset": "STX",
                "payTo": "SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7",
                "resource": {"url": "https://api.example.com/second"}
            }
        ]
    })
}

#[test]
fn test_detect_prefers_manifest_over_version_tag() {
    let manifest = json!({
        "x402Version": 2,
        "accepts": [],
        "endpoints": {"a": v2_config("https://api.example.com/a")}
    });
    assert_eq!(detect(&manifest), ConfigFormat::Manifest);
    assert_eq!(detect(&v2_config("https://x.example.com")), ConfigFormat::V2);
    assert_eq!(detect(&v1_config()), ConfigFormat::V1);
    assert_eq!(detect("not json"), ConfigFormat::Unknown);
    assert_eq!(detect(&json!([])), ConfigFormat::Unknown);
}

#[test]
fn test_normalize_parity_and_idempotence() {
    for input in [v2_config("https://api.example.com/a"), v1_config()] {
        let from_value = normalize(&input).unwrap();
        let from_text = normalize(input.to_string().as_str()).unwrap();
        assert_eq!(from_value, from_text);

        let again = normalize(&serde_json::to_value(&from_value).unwrap()).unwrap();
        assert_eq!(again, from_value);
    }
}

#[test]
fn test_v1_lifts_first_resource() {
    let normalized = normalize(&v1_config()).unwrap();
    assert_eq!(normalized.x402_version, 2);
    assert_eq!(normalized.resource.unwrap().url, "https://api.example.com/first");
    assert_eq!(normalized.accepts[0].amount, "250000");
    assert_eq!(normalized.accepts[1].amount, "100");
}

#[test]
fn test_mixed_chain_v1_config() {
    let result = validate(&v1_config(), false);
    assert!(result.valid, "{:?}", result.errors);
    assert_eq!(result.version, ConfigFormat::V1);
    let warnings: Vec<(IssueCode, &str)> = result
        .warnings
        .iter()
        .map(|w| (w.code, w.field.as_str()))
        .collect();
    assert!(warnings.contains(&(IssueCode::MissingMaxTimeout, "accepts[1].maxTimeoutSeconds")));
    assert!(warnings.contains(&(IssueCode::UnknownAsset, "accepts[1].asset")));
    assert!(warnings.contains(&(IssueCode::LegacyFormat, "x402Version")));
}

#[test]
fn test_address_errors_reach_the_result() {
    let mut config = v2_config("https://api.example.com/a");
    config["accepts"][0]["network"] = json!("stacks:2147483648");
    config["accepts"][0]["payTo"] = json!("SP2J6ZY48GV1EZ5V2V5RB9MP66SW86PYKKNRV9EJ7");
    let result = validate(&config, false);
    assert!(!result.valid);
    assert_eq!(result.errors[0].code, IssueCode::StacksNetworkMismatch);
    assert_eq!(result.errors[0].field, "accepts[0].payTo");

    config["accepts"][0]["network"] = json!("solana:5eykt4UsFv8P8NJdTREpY1vzqKqZKvdp");
    let result = validate(&config, false);
    assert_eq!(result.errors[0].code, IssueCode::InvalidSolanaAddress);
}

#[test]
fn test_strict_never_leaves_warnings() {
    let inputs = [
        v2_config("https://api.example.com/a"),
        v1_config(),
        json!({"x402Version": 2, "accepts": [{"network": "polygon"}]}),
        json!("{}"),
    ];
    for input in &inputs {
        let lenient = validate(input, false);
        let strict = validate(input, true);
        assert!(strict.warnings.is_empty());
        assert!(strict.errors.len() >= lenient.errors.len());
        assert_eq!(strict.valid, strict.errors.is_empty());
    }
}

#[test]
fn test_manifest_end_to_end() {
    let mut broken = v2_config("https://api.example.com/b");
    broken["accepts"][0]["amount"] = json!("");
    let manifest = json!({
        "service": {"name": "Example"},
        "endpoints": {
            "a": v2_config("https://api.example.com/a"),
            "b": broken,
            "c": v2_config("https://api.example.com/a")
        }
    });
    let result = validate_manifest(&manifest);
    assert!(!result.valid);
    assert!(result.errors.is_empty());
    assert_eq!(
        result.endpoint_results["b"].errors[0].field,
        "endpoints[\"b\"].accepts[0].amount"
    );
    let duplicate = result
        .warnings
        .iter()
        .filter(|w| w.code == IssueCode::DuplicateEndpointUrl)
        .count();
    assert_eq!(duplicate, 1);
    assert_eq!(result.exit_code(false), 0);
}

#[test]
fn test_wild_manifest_keeps_financial_fields() {
    let wild = json!({
        "name": "Weather",
        "apis": {
            "forecast": {"x402Version": 2, "accepts": [{
                "scheme": "exact",
                "network": "Base",
                "amount": "0001.50",
                "asset": "usdc",
                "payTo": "0xABC"
            }]}
        }
    });
    let normalized = normalize_wild_manifest(&wild).unwrap();
    let accepts = &normalized.manifest.endpoints["apis-forecast"]["accepts"][0];
    assert_eq!(accepts["amount"], "0001.50");
    assert_eq!(accepts["network"], "Base");
    assert_eq!(accepts["asset"], "usdc");
    assert_eq!(accepts["payTo"], "0xABC");

    let DocumentResult::Manifest(result) = validate_document(&wild, ValidationOptions::default())
    else {
        panic!("expected a manifest result");
    };
    let codes: Vec<IssueCode> = result.warnings.iter().map(|w| w.code).collect();
    assert_eq!(
        &codes[..2],
        [IssueCode::WildManifestNestedFormat, IssueCode::WildManifestNamePromoted]
    );
    assert!(!result.valid);
}

#[test]
fn test_check_empty_response_contract() {
    let result = check(&ResponseLike::default(), false);
    assert!(!result.extracted);
    assert!(result.source.is_none());
    assert!(!result.valid);
    assert_eq!(result.version, ConfigFormat::Unknown);
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
    assert!(result.normalized.is_none());
    assert!(result.summary.is_empty());
}

#[test]
fn test_check_v1_summary() {
    let result = check(&ResponseLike::from_body(v1_config()), false);
    assert!(result.valid);
    assert_eq!(result.summary.len(), 2);
    assert_eq!(result.summary[0].network_name, "Solana");
    assert_eq!(result.summary[0].display_amount.as_deref(), Some("0.25"));
    assert_eq!(result.summary[1].network_name, "Stacks");
    assert_eq!(result.summary[1].display_amount.as_deref(), Some("100"));
}

#[test]
fn test_result_json_shape() {
    let result = validate(&json!({"x402Version": 2, "accepts": [{"amount": "-1"}]}), false);
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["valid"], false);
    assert_eq!(json["version"], "v2");
    let first = &json["errors"][0];
    assert_eq!(first["code"], "MISSING_SCHEME");
    assert_eq!(first["field"], "accepts[0].scheme");
    assert_eq!(first["severity"], "error");
    assert!(first.get("fix").is_none());
    assert_eq!(json["normalized"]["accepts"][0]["amount"], "-1");
}
