//! Manifest validation.
//!
//! A manifest is validated in three passes:
//!
//! 1. every endpoint config through [`validate_with`], with each issue's field
//!    path re-rooted under `endpoints["<id>"]`
//! 2. cross-endpoint consistency checks (warnings only): duplicate resource
//!    URLs, mixed mainnet/testnet chains, duplicate bazaar routes
//! 3. bazaar method discrimination per endpoint (errors): GET declares query
//!    parameters and no body, POST/PUT/PATCH/DELETE the reverse
//!
//! [`validate_manifest`] never panics outward; an unexpected failure becomes a
//! single `INVALID_ENDPOINTS` error.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::panic::{self, AssertUnwindSafe};
use std::thread;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::error::{IssueCode, ValidationIssue};
use crate::networks::network_info;
use crate::rules::ROOT_FIELD;
use crate::validate::{ValidationOptions, ValidationResult, promote, validate_with};

const BODY_METHODS: &[&str] = &["POST", "PUT", "PATCH", "DELETE"];

/// Outcome of validating a manifest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestValidationResult {
    /// All endpoints valid and no manifest-level errors.
    pub valid: bool,
    /// Manifest-level errors.
    pub errors: Vec<ValidationIssue>,
    /// Manifest-level warnings; these never affect `valid`.
    pub warnings: Vec<ValidationIssue>,
    /// Endpoint ID → result, with field paths already prefixed.
    pub endpoint_results: BTreeMap<String, ValidationResult>,
    /// The manifest that was validated.
    pub normalized: Value,
}

impl ManifestValidationResult {
    fn failure(issue: ValidationIssue, normalized: &Value) -> Self {
        Self {
            valid: false,
            errors: vec![issue],
            warnings: Vec::new(),
            endpoint_results: BTreeMap::new(),
            normalized: normalized.clone(),
        }
    }

    /// Promotes every warning, manifest-level and per endpoint, to an error.
    #[must_use]
    pub fn into_strict(mut self) -> Self {
        self.errors.extend(promote(std::mem::take(&mut self.warnings)));
        self.endpoint_results = self
            .endpoint_results
            .into_iter()
            .map(|(id, result)| (id, result.into_strict()))
            .collect();
        self.valid = self.errors.is_empty() && self.endpoint_results.values().all(|r| r.valid);
        self
    }

    /// A manifest whose canonical form could not be rendered as JSON.
    pub(crate) fn unserializable(err: &serde_json::Error) -> Self {
        Self::failure(
            ValidationIssue::error(IssueCode::InvalidEndpoints, "endpoints")
                .with_message(format!("Manifest could not be serialized: {err}")),
            &Value::Null,
        )
    }

    pub(crate) fn finish(self, options: ValidationOptions) -> Self {
        if options.strict { self.into_strict() } else { self }
    }

    /// Process exit code under the majority-pass rule.
    ///
    /// Manifest-level errors fail the run, as do manifest-level warnings under
    /// strict mode. An empty manifest passes. Otherwise the run passes only if
    /// passing endpoints strictly outnumber failing ones; under strict mode an
    /// endpoint with warnings counts as failing.
    #[must_use]
    pub fn exit_code(&self, strict: bool) -> i32 {
        if !self.errors.is_empty() || (strict && !self.warnings.is_empty()) {
            return 1;
        }
        if self.endpoint_results.is_empty() {
            return 0;
        }
        let passing = self
            .endpoint_results
            .values()
            .filter(|r| r.valid && (!strict || r.warnings.is_empty()))
            .count();
        let failing = self.endpoint_results.len() - passing;
        if passing > failing { 0 } else { 1 }
    }
}

/// Validates a manifest document.
#[must_use]
pub fn validate_manifest(input: &Value) -> ManifestValidationResult {
    validate_manifest_with(input, ValidationOptions::default())
}

/// Validates a manifest document with explicit options.
#[cfg_attr(feature = "telemetry", instrument(skip_all, fields(strict = options.strict)))]
#[must_use]
pub fn validate_manifest_with(input: &Value, options: ValidationOptions) -> ManifestValidationResult {
    let result = contain(panic::catch_unwind(AssertUnwindSafe(|| run(input))), input);

    #[cfg(feature = "telemetry")]
    tracing::debug!(
        endpoints = result.endpoint_results.len(),
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "manifest validated"
    );
    result.finish(options)
}

/// Turns a panicked run into a single `INVALID_ENDPOINTS` error.
fn contain(outcome: thread::Result<ManifestValidationResult>, input: &Value) -> ManifestValidationResult {
    outcome.unwrap_or_else(|_| {
        #[cfg(feature = "telemetry")]
        tracing::error!("manifest validation panicked");
        ManifestValidationResult::failure(
            ValidationIssue::error(IssueCode::InvalidEndpoints, "endpoints")
                .with_message("Unexpected manifest validation error"),
            input,
        )
    })
}

fn run(input: &Value) -> ManifestValidationResult {
    let Some(endpoints) = input.get("endpoints").and_then(Value::as_object) else {
        return ManifestValidationResult::failure(
            ValidationIssue::error(IssueCode::MissingEndpoints, "endpoints")
                .with_fix("Add endpoints object with at least one endpoint configuration"),
            input,
        );
    };

    let endpoint_results: BTreeMap<String, ValidationResult> = endpoints
        .iter()
        .map(|(id, config)| {
            let result = validate_with(config, ValidationOptions::default());
            (id.clone(), prefix_field_paths(result, id))
        })
        .collect();

    let warnings = cross_endpoint_warnings(endpoints);
    let errors: Vec<ValidationIssue> = endpoints
        .iter()
        .flat_map(|(id, config)| method_discrimination(config, id))
        .collect();

    ManifestValidationResult {
        valid: errors.is_empty() && endpoint_results.values().all(|r| r.valid),
        errors,
        warnings,
        endpoint_results,
        normalized: input.clone(),
    }
}

/// `endpoints["<id>"]` with quotes and backslashes in the ID escaped.
fn endpoint_path(id: &str) -> String {
    let escaped = id.replace('\\', "\\\\").replace('"', "\\\"");
    format!("endpoints[\"{escaped}\"]")
}

fn prefix_field_paths(mut result: ValidationResult, id: &str) -> ValidationResult {
    let root = endpoint_path(id);
    for issue in result.errors.iter_mut().chain(result.warnings.iter_mut()) {
        issue.field = if issue.field == ROOT_FIELD {
            root.clone()
        } else {
            format!("{root}.{}", issue.field)
        };
    }
    result
}

fn resource_url(config: &Value) -> Option<&str> {
    config
        .get("resource")?
        .get("url")?
        .as_str()
        .filter(|url| !url.is_empty())
}

fn bazaar_input(config: &Value) -> Option<&Map<String, Value>> {
    config
        .pointer("/extensions/bazaar/info/input")
        .and_then(Value::as_object)
}

/// Counts keys, keeping first-seen order.
fn count_in_order(keys: impl IntoIterator<Item = String>) -> Vec<(String, usize)> {
    let mut order = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for key in keys {
        let count = counts.entry(key.clone()).or_default();
        *count += 1;
        if *count == 1 {
            order.push(key);
        }
    }
    order
        .into_iter()
        .filter_map(|key| {
            let count = counts.get(&key).copied()?;
            Some((key, count))
        })
        .collect()
}

fn cross_endpoint_warnings(endpoints: &Map<String, Value>) -> Vec<ValidationIssue> {
    let mut warnings = Vec::new();

    let urls = endpoints.values().filter_map(resource_url).map(str::to_owned);
    for (url, count) in count_in_order(urls) {
        if count > 1 {
            warnings.push(
                ValidationIssue::warning(IssueCode::DuplicateEndpointUrl, "endpoints")
                    .with_message(format!("{count} endpoints share the same URL: {url}"))
                    .with_fix(
                        "Ensure each endpoint has a unique URL, or use different HTTP methods if intentional",
                    ),
            );
        }
    }

    let networks: HashSet<&str> = endpoints
        .values()
        .filter_map(|config| config.get("accepts")?.as_array())
        .flatten()
        .filter_map(|entry| entry.get("network")?.as_str())
        .collect();
    let known: Vec<bool> = networks
        .iter()
        .filter_map(|network| network_info(network))
        .map(|info| info.testnet)
        .collect();
    if known.contains(&true) && known.contains(&false) {
        warnings.push(
            ValidationIssue::warning(IssueCode::MixedNetworks, "endpoints")
                .with_fix("Consider separating mainnet and testnet manifests for clarity and safety"),
        );
    }

    let routes = endpoints.values().filter_map(|config| {
        let method = bazaar_input(config)?.get("method")?.as_str()?;
        let url = resource_url(config)?;
        Some(format!("{} {url}", method.to_uppercase()))
    });
    for (route, count) in count_in_order(routes) {
        if count > 1 {
            warnings.push(
                ValidationIssue::warning(IssueCode::DuplicateBazaarRoute, "extensions.bazaar")
                    .with_message(format!(
                        "{count} endpoints share the same HTTP method + path: {route}"
                    ))
                    .with_fix("Ensure each bazaar endpoint has a unique method+path combination"),
            );
        }
    }

    warnings
}

fn method_discrimination(config: &Value, id: &str) -> Vec<ValidationIssue> {
    let Some(input) = bazaar_input(config) else {
        return Vec::new();
    };
    let Some(method) = input.get("method").and_then(Value::as_str) else {
        return Vec::new();
    };
    let method = method.to_uppercase();
    let prefix = format!("{}.extensions.bazaar.info.input", endpoint_path(id));
    let has_body = input.contains_key("body");
    let has_query = input.contains_key("queryParams");

    let mut issues = Vec::new();
    if method == "GET" {
        if has_body {
            issues.push(
                ValidationIssue::error(IssueCode::BazaarGetWithBody, format!("{prefix}.body"))
                    .with_fix("Remove body field and use queryParams for GET requests, or change method to POST"),
            );
        }
        if !has_query {
            issues.push(
                ValidationIssue::error(
                    IssueCode::BazaarGetMissingQueryParams,
                    format!("{prefix}.queryParams"),
                )
                .with_fix("Add queryParams field with JSON Schema describing query parameters"),
            );
        }
    } else if BODY_METHODS.contains(&method.as_str()) {
        if has_query {
            issues.push(
                ValidationIssue::error(
                    IssueCode::BazaarPostWithQueryParams,
                    format!("{prefix}.queryParams"),
                )
                .with_fix(format!(
                    "Remove queryParams field and use body for {method} requests, or change method to GET"
                )),
            );
        }
        if !has_body {
            issues.push(
                ValidationIssue::error(IssueCode::BazaarPostMissingBody, format!("{prefix}.body"))
                    .with_fix("Add body field with JSON Schema describing request body"),
            );
        }
    }
    issues
}
