//! One-call inspection of an HTTP 402 response.
//!
//! [`check`] extracts the config, validates it, and summarizes each payment
//! option with registry-resolved chain and token names. The summary is built
//! from the normalized config even when validation fails.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::assets::asset_info;
use crate::error::ValidationIssue;
use crate::extraction::{ExtractionSource, ResponseLike, extract_config};
use crate::networks::{NetworkType, network_info};
use crate::proto::{CanonicalConfig, ConfigFormat, PaymentOption};
use crate::validate::{ValidationOptions, validate_with};

/// Amounts above this many atomic units of an unknown token are assumed to be
/// micro-units.
const MICRO_UNIT_THRESHOLD: u64 = 1000;
const MICRO_UNITS_PER_UNIT: u64 = 1_000_000;

/// Human-oriented view of one payment option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSummary {
    /// Position in `accepts`.
    pub index: usize,
    /// Network identifier as given.
    pub network: String,
    /// Registry display name, or the raw identifier when unknown.
    pub network_name: String,
    /// Chain family, when the network is known.
    pub network_type: Option<NetworkType>,
    /// Token address as given.
    pub asset: String,
    /// Token symbol, when the asset is known.
    pub asset_symbol: Option<String>,
    /// Token decimals, when the asset is known.
    pub asset_decimals: Option<u8>,
    /// Amount in atomic units, as given.
    pub amount: String,
    /// Amount in whole tokens, when the amount is numeric.
    pub display_amount: Option<String>,
    /// Recipient address.
    pub pay_to: String,
    /// Payment scheme.
    pub scheme: String,
}

impl PaymentSummary {
    /// Summarizes one option.
    #[must_use]
    pub fn new(index: usize, option: &PaymentOption) -> Self {
        let network = network_info(&option.network);
        let asset = asset_info(&option.network, &option.asset);
        Self {
            index,
            network: option.network.clone(),
            network_name: network.map_or_else(|| option.network.clone(), |info| info.name.to_owned()),
            network_type: network.map(|info| info.network_type),
            asset: option.asset.clone(),
            asset_symbol: asset.map(|info| info.symbol.to_owned()),
            asset_decimals: asset.map(|info| info.decimals),
            amount: option.amount.clone(),
            display_amount: display_amount(&option.amount, asset.map(|info| info.decimals)),
            pay_to: option.pay_to.clone(),
            scheme: option.scheme.clone(),
        }
    }
}

/// Converts atomic units to whole tokens.
///
/// Known decimals are authoritative. Without them, amounts above 1000 are
/// assumed to be micro-units, which is only a guess.
fn display_amount(amount: &str, decimals: Option<u8>) -> Option<String> {
    if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let atomic = Decimal::from_str(amount).ok()?;
    let whole = match decimals {
        Some(decimals) => {
            let mut scaled = atomic;
            scaled.set_scale(u32::from(decimals)).ok()?;
            scaled
        }
        None if atomic > Decimal::from(MICRO_UNIT_THRESHOLD) => {
            atomic.checked_div(Decimal::from(MICRO_UNITS_PER_UNIT))?
        }
        None => atomic,
    };
    Some(whole.normalize().to_string())
}

/// Outcome of [`check`].
///
/// Every field is always present; when nothing was extracted the validation
/// fields hold their empty values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    /// Whether a config was found.
    pub extracted: bool,
    /// Where it was found.
    pub source: Option<ExtractionSource>,
    /// Why nothing was found.
    pub extraction_error: Option<String>,
    /// Whether the config is valid.
    pub valid: bool,
    /// Detected format.
    pub version: ConfigFormat,
    /// Validation errors.
    pub errors: Vec<ValidationIssue>,
    /// Validation warnings.
    pub warnings: Vec<ValidationIssue>,
    /// The canonical config.
    pub normalized: Option<CanonicalConfig>,
    /// One entry per payment option of the canonical config.
    pub summary: Vec<PaymentSummary>,
    /// The extracted config, untouched.
    pub raw: Option<Value>,
}

impl CheckResult {
    fn not_extracted(error: String) -> Self {
        Self {
            extracted: false,
            source: None,
            extraction_error: Some(error),
            valid: false,
            version: ConfigFormat::Unknown,
            errors: Vec::new(),
            warnings: Vec::new(),
            normalized: None,
            summary: Vec::new(),
            raw: None,
        }
    }
}

/// Extracts, validates and summarizes the config carried by a response.
#[must_use]
pub fn check(response: &ResponseLike, strict: bool) -> CheckResult {
    check_with(response, ValidationOptions::strict(strict))
}

/// [`check`] with explicit options.
#[cfg_attr(feature = "telemetry", instrument(skip_all, fields(strict = options.strict)))]
#[must_use]
pub fn check_with(response: &ResponseLike, options: ValidationOptions) -> CheckResult {
    let extraction = match extract_config(response) {
        Ok(extraction) => extraction,
        Err(err) => {
            #[cfg(feature = "telemetry")]
            tracing::debug!(error = %err, "no config extracted");
            return CheckResult::not_extracted(err.to_string());
        }
    };

    let result = validate_with(&extraction.config, options);
    let summary = result.normalized.as_ref().map_or_else(Vec::new, |config| {
        config
            .accepts
            .iter()
            .enumerate()
            .map(|(index, option)| PaymentSummary::new(index, option))
            .collect()
    });

    #[cfg(feature = "telemetry")]
    tracing::debug!(source = ?extraction.source, valid = result.valid, "response checked");

    CheckResult {
        extracted: true,
        source: Some(extraction.source),
        extraction_error: None,
        valid: result.valid,
        version: result.version,
        errors: result.errors,
        warnings: result.warnings,
        normalized: result.normalized,
        summary,
        raw: Some(extraction.config),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::IssueCode;

    fn option(network: &str, asset: &str) -> Value {
        json!({
            "scheme": "exact",
            "network": network,
            "amount": "1000000",
            "asset": asset,
            "payTo": "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed",
            "maxTimeoutSeconds": 60
        })
    }

    fn config(option: Value) -> Value {
        json!({
            "x402Version": 2,
            "accepts": [option],
            "resource": {"url": "https://example.com"}
        })
    }

    const BASE_USDC: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";

    #[test]
    fn test_empty_response() {
        let result = check(&ResponseLike::default(), false);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            json!({
                "extracted": false,
                "source": null,
                "extractionError": "No x402 config found in response body or PAYMENT-REQUIRED header",
                "valid": false,
                "version": "unknown",
                "errors": [],
                "warnings": [],
                "normalized": null,
                "summary": [],
                "raw": null
            })
        );
    }

    #[test]
    fn test_resolves_registry_names() {
        let result = check(&ResponseLike::from_body(config(option("eip155:8453", BASE_USDC))), false);
        assert!(result.extracted);
        assert_eq!(result.source, Some(ExtractionSource::Body));
        assert_eq!(result.version, ConfigFormat::V2);
        assert!(result.raw.is_some());

        let summary = &result.summary[0];
        assert_eq!(summary.index, 0);
        assert_eq!(summary.network_name, "Base");
        assert_eq!(summary.network_type, Some(NetworkType::Evm));
        assert_eq!(summary.asset_symbol.as_deref(), Some("USDC"));
        assert_eq!(summary.asset_decimals, Some(6));
        assert_eq!(summary.amount, "1000000");
        assert_eq!(summary.display_amount.as_deref(), Some("1"));
        assert_eq!(summary.scheme, "exact");
    }

    #[test]
    fn test_unknown_network_and_asset_fall_back() {
        let result = check(
            &ResponseLike::from_body(config(option(
                "eip155:999999",
                "0x0000000000000000000000000000000000000001",
            ))),
            false,
        );
        assert!(result.valid);
        let summary = &result.summary[0];
        assert_eq!(summary.network_name, "eip155:999999");
        assert!(summary.network_type.is_none());
        assert!(summary.asset_symbol.is_none());
        assert!(summary.asset_decimals.is_none());
        // heuristic: above 1000 is micro-units
        assert_eq!(summary.display_amount.as_deref(), Some("1"));
    }

    #[test]
    fn test_summary_survives_invalid_config() {
        let mut bad = option("eip155:8453", BASE_USDC);
        bad["amount"] = json!("not-a-number");
        let result = check(&ResponseLike::from_body(config(bad)), false);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.code == IssueCode::InvalidAmount));
        assert_eq!(result.summary.len(), 1);
        assert!(result.summary[0].display_amount.is_none());
    }

    #[test]
    fn test_unknown_format_has_no_summary() {
        let body = json!({"x402Version": 2, "resource": {"url": "https://example.com"}});
        let result = check(&ResponseLike::from_body(body), false);
        assert!(result.extracted);
        assert!(!result.valid);
        assert!(result.summary.is_empty());
        assert!(result.normalized.is_none());
    }

    #[test]
    fn test_header_source_and_strict() {
        let mut config = config(option("eip155:8453", "0x0000000000000000000000000000000000000001"));
        config.as_object_mut().unwrap().remove("resource");
        let response = ResponseLike::default().with_payment_required(&config).unwrap();

        let lenient = check(&response, false);
        assert_eq!(lenient.source, Some(ExtractionSource::Header));
        assert!(lenient.valid);
        assert!(!lenient.warnings.is_empty());

        let strict = check(&response, true);
        assert!(!strict.valid);
        assert!(strict.warnings.is_empty());
        assert_eq!(strict.errors.len(), lenient.warnings.len());
    }

    #[test]
    fn test_display_amount() {
        assert_eq!(display_amount("1500000", Some(6)).as_deref(), Some("1.5"));
        assert_eq!(display_amount("10000", Some(6)).as_deref(), Some("0.01"));
        assert_eq!(display_amount("1", Some(0)).as_deref(), Some("1"));
        assert_eq!(display_amount("500", None).as_deref(), Some("500"));
        assert_eq!(display_amount("2500000", None).as_deref(), Some("2.5"));
        assert_eq!(display_amount("1.5", Some(6)), None);
        assert_eq!(display_amount("", None), None);
    }
}
