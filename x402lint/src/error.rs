//! Issue vocabulary for x402 config validation.
//!
//! Every finding produced by the validator is a [`ValidationIssue`] carrying a
//! stable [`IssueCode`]. Codes form a closed vocabulary: each one has a
//! registered human message (see [`IssueCode::message`]) and serializes as its
//! `SCREAMING_SNAKE_CASE` wire string.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable machine-readable code attached to every [`ValidationIssue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    /// Input text is not parseable JSON.
    InvalidJson,
    /// Top-level value is not a JSON object.
    NotObject,
    /// Object matches none of the known config shapes.
    UnknownFormat,

    /// `x402Version` is absent.
    MissingVersion,
    /// `x402Version` holds an unsupported value.
    InvalidVersion,

    /// `accepts` is absent.
    MissingAccepts,
    /// `accepts` is an empty array.
    EmptyAccepts,
    /// `accepts` is not an array.
    InvalidAccepts,

    /// Payment option has no `scheme`.
    MissingScheme,
    /// Payment option has no `network`.
    MissingNetwork,
    /// `network` is not a CAIP-2 identifier.
    InvalidNetworkFormat,
    /// Payment option has no `amount`.
    MissingAmount,
    /// `amount` is not an unsigned decimal integer string.
    InvalidAmount,
    /// `amount` is zero.
    ZeroAmount,
    /// Payment option has no `asset`.
    MissingAsset,
    /// Payment option has no `payTo`.
    MissingPayTo,
    /// Config has no `resource` (or an empty `resource.url`).
    MissingResource,
    /// `maxTimeoutSeconds` is not a positive integer.
    InvalidTimeout,
    /// `resource.url` does not parse as a URL.
    InvalidUrl,

    /// EVM address is not `0x` followed by 40 hex digits.
    InvalidEvmAddress,
    /// Mixed-case EVM address fails its EIP-55 checksum.
    BadEvmChecksum,
    /// EVM address is all lowercase and carries no checksum.
    NoEvmChecksum,
    /// Solana address is not 32 bytes of Base58.
    InvalidSolanaAddress,
    /// Stacks address fails its format or c32check checksum.
    InvalidStacksAddress,
    /// Stacks address version byte belongs to the other network.
    StacksNetworkMismatch,
    /// Address format belongs to another chain family.
    AddressNetworkMismatch,

    /// Network is valid CAIP-2 but not in the registry.
    UnknownNetwork,
    /// Asset is not in the registry for its network.
    UnknownAsset,
    /// Config uses the legacy v1 wire format.
    LegacyFormat,
    /// Payment option omits `maxTimeoutSeconds`.
    MissingMaxTimeout,

    /// `extensions.bazaar` or one of its sub-objects is malformed.
    InvalidBazaarInfo,
    /// `extensions.bazaar.info.input` lacks `type` or `method`.
    InvalidBazaarInfoInput,
    /// `extensions.bazaar.schema` is not a JSON Schema object.
    InvalidBazaarSchema,
    /// `accepts[].outputSchema` or its `output` is malformed.
    InvalidOutputSchema,
    /// `accepts[].outputSchema.input` lacks `type` or `method`.
    InvalidOutputSchemaInput,
    /// Neither schema extension is present.
    MissingInputSchema,

    /// Manifest has no `endpoints` object.
    MissingEndpoints,
    /// Manifest validation failed unexpectedly.
    InvalidEndpoints,
    /// Several endpoints share one resource URL.
    DuplicateEndpointUrl,
    /// Manifest mixes known mainnet and testnet chains.
    MixedNetworks,
    /// Several endpoints declare the same bazaar method and path.
    DuplicateBazaarRoute,
    /// GET endpoint declares a request body.
    BazaarGetWithBody,
    /// GET endpoint declares no query parameters.
    BazaarGetMissingQueryParams,
    /// Body-carrying endpoint declares query parameters.
    BazaarPostWithQueryParams,
    /// Body-carrying endpoint declares no body.
    BazaarPostMissingBody,

    /// Manifest endpoints were found in an array and re-keyed.
    WildManifestArrayFormat,
    /// Manifest endpoints were found in nested groups and flattened.
    WildManifestNestedFormat,
    /// Top-level `name` was moved to `service.name`.
    WildManifestNamePromoted,
}

impl IssueCode {
    /// Every code in the vocabulary, in declaration order.
    pub const ALL: &'static [Self] = &[
        Self::InvalidJson,
        Self::NotObject,
        Self::UnknownFormat,
        Self::MissingVersion,
        Self::InvalidVersion,
        Self::MissingAccepts,
        Self::EmptyAccepts,
        Self::InvalidAccepts,
        Self::MissingScheme,
        Self::MissingNetwork,
        Self::InvalidNetworkFormat,
        Self::MissingAmount,
        Self::InvalidAmount,
        Self::ZeroAmount,
        Self::MissingAsset,
        Self::MissingPayTo,
        Self::MissingResource,
        Self::InvalidTimeout,
        Self::InvalidUrl,
        Self::InvalidEvmAddress,
        Self::BadEvmChecksum,
        Self::NoEvmChecksum,
        Self::InvalidSolanaAddress,
        Self::InvalidStacksAddress,
        Self::StacksNetworkMismatch,
        Self::AddressNetworkMismatch,
        Self::UnknownNetwork,
        Self::UnknownAsset,
        Self::LegacyFormat,
        Self::MissingMaxTimeout,
        Self::InvalidBazaarInfo,
        Self::InvalidBazaarInfoInput,
        Self::InvalidBazaarSchema,
        Self::InvalidOutputSchema,
        Self::InvalidOutputSchemaInput,
        Self::MissingInputSchema,
        Self::MissingEndpoints,
        Self::InvalidEndpoints,
        Self::DuplicateEndpointUrl,
        Self::MixedNetworks,
        Self::DuplicateBazaarRoute,
        Self::BazaarGetWithBody,
        Self::BazaarGetMissingQueryParams,
        Self::BazaarPostWithQueryParams,
        Self::BazaarPostMissingBody,
        Self::WildManifestArrayFormat,
        Self::WildManifestNestedFormat,
        Self::WildManifestNamePromoted,
    ];

    /// Returns the wire string of this code (e.g. `"MISSING_PAY_TO"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidJson => "INVALID_JSON",
            Self::NotObject => "NOT_OBJECT",
            Self::UnknownFormat => "UNKNOWN_FORMAT",
            Self::MissingVersion => "MISSING_VERSION",
            Self::InvalidVersion => "INVALID_VERSION",
            Self::MissingAccepts => "MISSING_ACCEPTS",
            Self::EmptyAccepts => "EMPTY_ACCEPTS",
            Self::InvalidAccepts => "INVALID_ACCEPTS",
            Self::MissingScheme => "MISSING_SCHEME",
            Self::MissingNetwork => "MISSING_NETWORK",
            Self::InvalidNetworkFormat => "INVALID_NETWORK_FORMAT",
            Self::MissingAmount => "MISSING_AMOUNT",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::ZeroAmount => "ZERO_AMOUNT",
            Self::MissingAsset => "MISSING_ASSET",
            Self::MissingPayTo => "MISSING_PAY_TO",
            Self::MissingResource => "MISSING_RESOURCE",
            Self::InvalidTimeout => "INVALID_TIMEOUT",
            Self::InvalidUrl => "INVALID_URL",
            Self::InvalidEvmAddress => "INVALID_EVM_ADDRESS",
            Self::BadEvmChecksum => "BAD_EVM_CHECKSUM",
            Self::NoEvmChecksum => "NO_EVM_CHECKSUM",
            Self::InvalidSolanaAddress => "INVALID_SOLANA_ADDRESS",
            Self::InvalidStacksAddress => "INVALID_STACKS_ADDRESS",
            Self::StacksNetworkMismatch => "STACKS_NETWORK_MISMATCH",
            Self::AddressNetworkMismatch => "ADDRESS_NETWORK_MISMATCH",
            Self::UnknownNetwork => "UNKNOWN_NETWORK",
            Self::UnknownAsset => "UNKNOWN_ASSET",
            Self::LegacyFormat => "LEGACY_FORMAT",
            Self::MissingMaxTimeout => "MISSING_MAX_TIMEOUT",
            Self::InvalidBazaarInfo => "INVALID_BAZAAR_INFO",
            Self::InvalidBazaarInfoInput => "INVALID_BAZAAR_INFO_INPUT",
            Self::InvalidBazaarSchema => "INVALID_BAZAAR_SCHEMA",
            Self::InvalidOutputSchema => "INVALID_OUTPUT_SCHEMA",
            Self::InvalidOutputSchemaInput => "INVALID_OUTPUT_SCHEMA_INPUT",
            Self::MissingInputSchema => "MISSING_INPUT_SCHEMA",
            Self::MissingEndpoints => "MISSING_ENDPOINTS",
            Self::InvalidEndpoints => "INVALID_ENDPOINTS",
            Self::DuplicateEndpointUrl => "DUPLICATE_ENDPOINT_URL",
            Self::MixedNetworks => "MIXED_NETWORKS",
            Self::DuplicateBazaarRoute => "DUPLICATE_BAZAAR_ROUTE",
            Self::BazaarGetWithBody => "BAZAAR_GET_WITH_BODY",
            Self::BazaarGetMissingQueryParams => "BAZAAR_GET_MISSING_QUERY_PARAMS",
            Self::BazaarPostWithQueryParams => "BAZAAR_POST_WITH_QUERY_PARAMS",
            Self::BazaarPostMissingBody => "BAZAAR_POST_MISSING_BODY",
            Self::WildManifestArrayFormat => "WILD_MANIFEST_ARRAY_FORMAT",
            Self::WildManifestNestedFormat => "WILD_MANIFEST_NESTED_FORMAT",
            Self::WildManifestNamePromoted => "WILD_MANIFEST_NAME_PROMOTED",
        }
    }

    /// Returns the registered human message for this code.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidJson => "Input is not valid JSON",
            Self::NotObject => "Input must be an object",
            Self::UnknownFormat => "Config format could not be detected",
            Self::MissingVersion => "Missing required field: x402Version",
            Self::InvalidVersion => "Invalid x402Version value (must be 1 or 2)",
            Self::MissingAccepts => "Missing required field: accepts",
            Self::EmptyAccepts => "accepts array cannot be empty",
            Self::InvalidAccepts => "accepts must be an array",
            Self::MissingScheme => "Missing required field: scheme",
            Self::MissingNetwork => "Missing required field: network",
            Self::InvalidNetworkFormat => {
                "Network must use CAIP-2 format (namespace:reference), e.g. eip155:8453"
            }
            Self::MissingAmount => "Missing required field: amount",
            Self::InvalidAmount => "Amount must be a numeric string in atomic units",
            Self::ZeroAmount => "Amount must be greater than zero",
            Self::MissingAsset => "Missing required field: asset",
            Self::MissingPayTo => "Missing required field: payTo",
            Self::MissingResource => "Missing required field: resource",
            Self::InvalidTimeout => "maxTimeoutSeconds must be a positive integer",
            Self::InvalidUrl => "resource.url is not a valid URL",
            Self::InvalidEvmAddress => "Invalid EVM address format",
            Self::BadEvmChecksum => "EVM address has invalid checksum",
            Self::NoEvmChecksum => "EVM address is all-lowercase with no checksum protection",
            Self::InvalidSolanaAddress => "Invalid Solana address format",
            Self::InvalidStacksAddress => "Invalid Stacks address format",
            Self::StacksNetworkMismatch => "Stacks address version does not match the network",
            Self::AddressNetworkMismatch => "Address format does not match network type",
            Self::UnknownNetwork => {
                "Network is not in the known registry -- config may still work but cannot be fully validated"
            }
            Self::UnknownAsset => {
                "Asset is not in the known registry -- config may still work but cannot be fully validated"
            }
            Self::LegacyFormat => "Config uses legacy x402 v1 format -- consider upgrading to v2",
            Self::MissingMaxTimeout => "Consider adding maxTimeoutSeconds for better security",
            Self::InvalidBazaarInfo => "Bazaar extension info is missing or malformed",
            Self::InvalidBazaarInfoInput => "Bazaar input must declare both type and method",
            Self::InvalidBazaarSchema => "Bazaar schema is not a recognizable JSON Schema",
            Self::InvalidOutputSchema => "outputSchema is missing or malformed",
            Self::InvalidOutputSchemaInput => "outputSchema.input must declare both type and method",
            Self::MissingInputSchema => {
                "No input schema declared -- agents cannot discover how to call this endpoint"
            }
            Self::MissingEndpoints => "Manifest must contain an endpoints object",
            Self::InvalidEndpoints => "Manifest endpoints could not be validated",
            Self::DuplicateEndpointUrl => "Multiple endpoints share the same resource URL",
            Self::MixedNetworks => "Manifest mixes mainnet and testnet networks",
            Self::DuplicateBazaarRoute => "Multiple endpoints declare the same HTTP method and path",
            Self::BazaarGetWithBody => "GET endpoints must not declare a request body",
            Self::BazaarGetMissingQueryParams => "GET endpoints must declare queryParams",
            Self::BazaarPostWithQueryParams => {
                "POST/PUT/PATCH/DELETE endpoints must not declare queryParams"
            }
            Self::BazaarPostMissingBody => "POST/PUT/PATCH/DELETE endpoints must declare a body",
            Self::WildManifestArrayFormat => {
                "Manifest lists endpoints in an array -- converted to an endpoints map"
            }
            Self::WildManifestNestedFormat => {
                "Manifest nests endpoints under grouping keys -- flattened into an endpoints map"
            }
            Self::WildManifestNamePromoted => "Top-level name was promoted to service.name",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an issue invalidates the document or is advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Invalidates the document.
    Error,
    /// Advisory; invalidates only under strict mode.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

/// A single finding located by a field path.
///
/// Field paths are dotted/bracketed strings such as `accepts[0].payTo` or
/// `endpoints["weather"].resource.url`; `$` refers to the document root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Stable issue code.
    pub code: IssueCode,
    /// Path of the offending value.
    pub field: String,
    /// Human-readable description.
    pub message: String,
    /// Error or warning.
    pub severity: Severity,
    /// Concrete remedy, when one can be computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

impl ValidationIssue {
    /// Creates an issue with the code's registered message.
    #[must_use]
    pub fn new(code: IssueCode, field: impl Into<String>, severity: Severity) -> Self {
        Self {
            code,
            field: field.into(),
            message: code.message().to_owned(),
            severity,
            fix: None,
        }
    }

    /// Creates an error-severity issue.
    #[must_use]
    pub fn error(code: IssueCode, field: impl Into<String>) -> Self {
        Self::new(code, field, Severity::Error)
    }

    /// Creates a warning-severity issue.
    #[must_use]
    pub fn warning(code: IssueCode, field: impl Into<String>) -> Self {
        Self::new(code, field, Severity::Warning)
    }

    /// Replaces the registered message with a more specific one.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches a fix suggestion.
    #[must_use]
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    /// Returns `true` for error-severity issues.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.field, self.code, self.message)?;
        if let Some(fix) = &self.fix {
            write!(f, " (fix: {fix})")?;
        }
        Ok(())
    }
}

/// Failure to turn raw input into a JSON object.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    /// The input text is not JSON.
    #[error("input is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    /// The input is JSON but not an object.
    #[error("input must be a JSON object")]
    NotObject,
}
