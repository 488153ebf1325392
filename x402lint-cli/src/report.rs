//! Plain-text rendering of results.

use std::io::{self, Write};

use x402lint::extraction::ExtractionSource;
use x402lint::{CheckResult, DocumentResult, ManifestValidationResult, ValidationIssue, ValidationResult};

fn issues(out: &mut impl Write, indent: &str, issues: &[ValidationIssue]) -> io::Result<()> {
    for issue in issues {
        writeln!(out, "{indent}{:<7} {issue}", issue.severity)?;
    }
    Ok(())
}

fn verdict(valid: bool, errors: usize, warnings: usize) -> String {
    let word = if valid { "valid" } else { "invalid" };
    format!("{word} ({errors} errors, {warnings} warnings)")
}

fn config(out: &mut impl Write, indent: &str, result: &ValidationResult) -> io::Result<()> {
    issues(out, indent, &result.errors)?;
    issues(out, indent, &result.warnings)
}

/// Writes a single-config result.
///
/// # Errors
///
/// Fails when the writer does.
pub fn write_config(out: &mut impl Write, result: &ValidationResult) -> io::Result<()> {
    config(out, "", result)?;
    writeln!(
        out,
        "{} config: {}",
        result.version,
        verdict(result.valid, result.errors.len(), result.warnings.len())
    )
}

/// Writes a manifest result, one block per endpoint.
///
/// # Errors
///
/// Fails when the writer does.
pub fn write_manifest(out: &mut impl Write, result: &ManifestValidationResult) -> io::Result<()> {
    issues(out, "", &result.errors)?;
    issues(out, "", &result.warnings)?;
    for (id, endpoint) in &result.endpoint_results {
        writeln!(
            out,
            "endpoint {id}: {}",
            verdict(endpoint.valid, endpoint.errors.len(), endpoint.warnings.len())
        )?;
        config(out, "  ", endpoint)?;
    }
    writeln!(
        out,
        "manifest: {} across {} endpoints",
        verdict(result.valid, result.errors.len(), result.warnings.len()),
        result.endpoint_results.len()
    )
}

/// Writes any document result.
///
/// # Errors
///
/// Fails when the writer does.
pub fn write_document(out: &mut impl Write, result: &DocumentResult) -> io::Result<()> {
    match result {
        DocumentResult::Config(result) => write_config(out, result),
        DocumentResult::Manifest(result) => write_manifest(out, result),
    }
}

/// Writes a response check, with one line per payment option.
///
/// # Errors
///
/// Fails when the writer does.
pub fn write_check(out: &mut impl Write, result: &CheckResult) -> io::Result<()> {
    let Some(source) = result.source else {
        let reason = result.extraction_error.as_deref().unwrap_or("nothing extracted");
        return writeln!(out, "no config extracted: {reason}");
    };
    let source = match source {
        ExtractionSource::Body => "body",
        ExtractionSource::Header => "PAYMENT-REQUIRED header",
    };
    writeln!(out, "config found in {source}")?;
    for option in &result.summary {
        let asset = option.asset_symbol.as_deref().unwrap_or(&option.asset);
        let amount = option.display_amount.as_deref().unwrap_or(&option.amount);
        writeln!(
            out,
            "  [{}] {} {amount} {asset} on {} to {}",
            option.index, option.scheme, option.network_name, option.pay_to
        )?;
    }
    issues(out, "", &result.errors)?;
    issues(out, "", &result.warnings)?;
    writeln!(
        out,
        "{} config: {}",
        result.version,
        verdict(result.valid, result.errors.len(), result.warnings.len())
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use x402lint::{ResponseLike, ValidationOptions, check, validate, validate_document};

    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_config_report() {
        let result = validate(&json!({"x402Version": 2, "accepts": []}), false);
        let text = render(|out| write_config(out, &result));
        assert!(text.contains("EMPTY_ACCEPTS"));
        assert!(text.lines().last().unwrap().starts_with("v2 config: invalid ("));
    }

    #[test]
    fn test_manifest_report_lists_endpoints() {
        let manifest = json!({"endpoints": {"a": {"x402Version": 2, "accepts": []}}});
        let result = validate_document(&manifest, ValidationOptions::default());
        let text = render(|out| write_document(out, &result));
        assert!(text.contains("endpoint a: invalid"));
        assert!(text.contains("  error   endpoints[\"a\"].accepts"));
        assert!(text.ends_with("across 1 endpoints\n"));
    }

    #[test]
    fn test_check_report_without_config() {
        let result = check(&ResponseLike::default(), false);
        let text = render(|out| write_check(out, &result));
        assert_eq!(
            text,
            "no config extracted: No x402 config found in response body or PAYMENT-REQUIRED header\n"
        );
    }
}
