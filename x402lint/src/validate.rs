//! Single-config validation.
//!
//! [`validate`] runs every rule of [`crate::rules`] over one config in a fixed
//! order and folds the findings into a [`ValidationResult`]:
//!
//! 1. structure (parse, object shape, format detection); terminal on failure
//! 2. version tag and `accepts` shape
//! 3. per entry: required fields, amount, timeout, network, asset, `payTo`
//! 4. resource, legacy format, schema extensions
//!
//! Under strict mode every warning is promoted to an error after the rules
//! have run; the rules themselves do not change.

use serde::{Deserialize, Serialize};
use serde_json::Map;
#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::detection::{detect_value, normalize_value, normalize_wild_manifest};
use crate::error::{IssueCode, Severity, ValidationIssue};
use crate::manifest::{ManifestValidationResult, validate_manifest};
use crate::proto::{AsConfigInput, CanonicalConfig, ConfigFormat};
use crate::rules::{
    ROOT_FIELD, StructureOutcome, validate_accepts, validate_amount, validate_asset,
    validate_bazaar, validate_fields, validate_legacy, validate_missing_schema, validate_network,
    validate_output_schema, validate_pay_to, validate_resource, validate_structure,
    validate_timeout, validate_version,
};

/// Knobs of a validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    /// Promote every warning to an error.
    pub strict: bool,
}

impl ValidationOptions {
    /// Options with strict mode set as given.
    #[must_use]
    pub const fn strict(strict: bool) -> Self {
        Self { strict }
    }
}

/// Outcome of validating one config.
///
/// `valid` holds exactly when `errors` is empty. `normalized` is absent only
/// when the structural checks failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Whether no errors were found.
    pub valid: bool,
    /// Detected input format.
    pub version: ConfigFormat,
    /// Error-severity issues, in rule order.
    pub errors: Vec<ValidationIssue>,
    /// Warning-severity issues, in rule order.
    pub warnings: Vec<ValidationIssue>,
    /// The canonical form of the input.
    pub normalized: Option<CanonicalConfig>,
}

impl ValidationResult {
    /// Splits issues by severity into a result.
    #[must_use]
    pub fn from_issues(
        version: ConfigFormat,
        issues: Vec<ValidationIssue>,
        normalized: Option<CanonicalConfig>,
    ) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) =
            issues.into_iter().partition(ValidationIssue::is_error);
        Self {
            valid: errors.is_empty(),
            version,
            errors,
            warnings,
            normalized,
        }
    }

    /// Re-tags every warning as an error and recomputes validity.
    #[must_use]
    pub fn into_strict(mut self) -> Self {
        self.errors.extend(promote(std::mem::take(&mut self.warnings)));
        self.valid = self.errors.is_empty();
        self
    }

    fn finish(self, options: ValidationOptions) -> Self {
        if options.strict { self.into_strict() } else { self }
    }

    /// Process exit code for this result: `0` when valid, `1` otherwise.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        if self.valid { 0 } else { 1 }
    }
}

/// Re-tags issues as errors.
pub(crate) fn promote(issues: Vec<ValidationIssue>) -> impl Iterator<Item = ValidationIssue> {
    issues.into_iter().map(|issue| ValidationIssue {
        severity: Severity::Error,
        ..issue
    })
}

/// Validates one config given as JSON text or a parsed value.
#[must_use]
pub fn validate(input: &(impl AsConfigInput + ?Sized), strict: bool) -> ValidationResult {
    validate_with(input, ValidationOptions::strict(strict))
}

/// Validates one config with explicit options.
#[cfg_attr(feature = "telemetry", instrument(skip_all, fields(strict = options.strict)))]
#[must_use]
pub fn validate_with(
    input: &(impl AsConfigInput + ?Sized),
    options: ValidationOptions,
) -> ValidationResult {
    let StructureOutcome {
        parsed,
        format,
        issues,
    } = validate_structure(input.as_config_input());

    let prepared = parsed.filter(|_| issues.is_empty()).and_then(|parsed| {
        let config = normalize_value(&parsed)?;
        Some((parsed, config))
    });
    let Some((parsed, config)) = prepared else {
        let issues = if issues.is_empty() {
            vec![ValidationIssue::error(IssueCode::UnknownFormat, ROOT_FIELD)]
        } else {
            issues
        };
        return ValidationResult::from_issues(format, issues, None).finish(options);
    };

    let empty = Map::new();
    let raw = parsed.as_object().unwrap_or(&empty);
    let mut issues = validate_version(&config, format);
    issues.extend(validate_accepts(raw));
    for (index, entry) in config.accepts.iter().enumerate() {
        issues.extend(validate_fields(entry, index));
        issues.extend(validate_amount(entry, index));
        issues.extend(validate_timeout(entry, index));
        issues.extend(validate_network(entry, index));
        issues.extend(validate_asset(entry, index));
        issues.extend(validate_pay_to(entry, index));
    }
    issues.extend(validate_resource(&config));
    issues.extend(validate_legacy(format));
    issues.extend(validate_bazaar(&config));
    issues.extend(validate_output_schema(raw));
    issues.extend(validate_missing_schema(&config, raw));

    let result = ValidationResult::from_issues(format, issues, Some(config)).finish(options);
    #[cfg(feature = "telemetry")]
    tracing::debug!(
        format = %result.version,
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "config validated"
    );
    result
}

/// Result of [`validate_document`]: one config or a whole manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DocumentResult {
    /// The document was a single config.
    Config(ValidationResult),
    /// The document was a manifest, possibly recovered from a non-standard shape.
    Manifest(ManifestValidationResult),
}

impl DocumentResult {
    /// Whether the document is valid.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        match self {
            Self::Config(result) => result.valid,
            Self::Manifest(result) => result.valid,
        }
    }

    /// Process exit code; manifests use the majority-pass rule.
    #[must_use]
    pub fn exit_code(&self, strict: bool) -> i32 {
        match self {
            Self::Config(result) => result.exit_code(),
            Self::Manifest(result) => result.exit_code(strict),
        }
    }
}

/// Validates any document, routing by shape.
///
/// Manifests go to [`validate_manifest`]. Documents of no known shape are
/// first offered to [`normalize_wild_manifest`]; if it recognizes them, its
/// warnings lead the manifest-level warnings. Everything else is validated as
/// a single config.
#[must_use]
pub fn validate_document(
    input: &(impl AsConfigInput + ?Sized),
    options: ValidationOptions,
) -> DocumentResult {
    let input = input.as_config_input();
    let Ok(parsed) = input.parse() else {
        return DocumentResult::Config(validate_with(&input, options));
    };

    match detect_value(&parsed) {
        ConfigFormat::Manifest => {
            DocumentResult::Manifest(validate_manifest(&parsed).finish(options))
        }
        ConfigFormat::Unknown => match normalize_wild_manifest(&parsed) {
            Some(wild) => {
                let mut result = match serde_json::to_value(&wild.manifest) {
                    Ok(manifest) => validate_manifest(&manifest),
                    Err(err) => ManifestValidationResult::unserializable(&err),
                };
                let mut warnings = wild.warnings;
                warnings.append(&mut result.warnings);
                result.warnings = warnings;
                DocumentResult::Manifest(result.finish(options))
            }
            None => DocumentResult::Config(validate_with(&*parsed, options)),
        },
        ConfigFormat::V2 | ConfigFormat::V1 => {
            DocumentResult::Config(validate_with(&*parsed, options))
        }
    }
}
