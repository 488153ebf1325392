#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Detection, normalization and validation of x402 payment configs.
//!
//! A server that answers HTTP 402 advertises the payments it accepts as a JSON
//! config, in the response body or the `PAYMENT-REQUIRED` header. This crate
//! classifies such a config, maps it into one canonical shape, and reports
//! what is wrong with it as structured issues carrying stable codes, precise
//! field paths and, where possible, a fix.
//!
//! # Overview
//!
//! ```text
//! JSON → detect → normalize → rules → ValidationResult
//!                   ↘ manifest → per-endpoint validate + cross checks → ManifestValidationResult
//! response → extract → validate → summary → CheckResult
//! ```
//!
//! Recipient addresses are checked for encoding and checksum correctness
//! only. Nothing here talks to a chain.
//!
//! # Modules
//!
//! - [`address`] - Per-chain recipient address validators
//! - [`assets`] - Registry of well-known tokens
//! - [`chain`] - CAIP-2 chain identifiers
//! - [`check`] - Extract, validate and summarize in one call
//! - [`crypto`] - Base58, Keccak-256/EIP-55 and c32check codecs
//! - [`detection`] - Format detection, normalization, wild-manifest recovery
//! - [`encoding`] - Base64 JSON payloads of the `PAYMENT-REQUIRED` header
//! - [`error`] - Issue codes, severities and issues
//! - [`extraction`] - Config extraction from response body or header
//! - [`manifest`] - Multi-endpoint manifest validation
//! - [`networks`] - Registry of well-known networks
//! - [`proto`] - Wire and canonical data model
//! - [`rules`] - Individual validation rules
//! - [`validate`] - Single-config validation pipeline
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation of the entry points

pub mod address;
pub mod assets;
pub mod chain;
pub mod check;
pub mod crypto;
pub mod detection;
pub mod encoding;
pub mod error;
pub mod extraction;
pub mod manifest;
pub mod networks;
pub mod proto;
pub mod rules;
pub mod validate;

pub use check::{CheckResult, PaymentSummary, check, check_with};
pub use detection::{detect, normalize, normalize_wild_manifest};
pub use error::{IssueCode, Severity, ValidationIssue};
pub use extraction::{ResponseLike, extract_config};
pub use manifest::{ManifestValidationResult, validate_manifest, validate_manifest_with};
pub use proto::{AsConfigInput, CanonicalConfig, ConfigFormat, ConfigInput, Manifest};
pub use validate::{
    DocumentResult, ValidationOptions, ValidationResult, validate, validate_document,
    validate_with,
};
