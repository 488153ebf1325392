use url::Url;

use crate::error::{IssueCode, ValidationIssue};
use crate::proto::CanonicalConfig;

/// Checks the top-level resource.
///
/// An absent resource and an empty URL both warn `MISSING_RESOURCE`; a URL
/// that does not parse warns `INVALID_URL`. Never an error.
#[must_use]
pub fn validate_resource(config: &CanonicalConfig) -> Vec<ValidationIssue> {
    let Some(resource) = &config.resource else {
        return vec![
            ValidationIssue::warning(IssueCode::MissingResource, "resource")
                .with_fix("Add a resource object with the URL of the paid endpoint"),
        ];
    };
    if resource.url.is_empty() {
        return vec![
            ValidationIssue::warning(IssueCode::MissingResource, "resource.url")
                .with_fix("Set resource.url to the URL of the paid endpoint"),
        ];
    }
    match Url::parse(&resource.url) {
        Ok(_) => Vec::new(),
        Err(err) => vec![
            ValidationIssue::warning(IssueCode::InvalidUrl, "resource.url")
                .with_message(format!("resource.url is not a valid URL: {err}"))
                .with_fix("Use an absolute URL, e.g. https://api.example.com/data"),
        ],
    }
}
