//! Format detection and normalization.
//!
//! - [`detect`] classifies a document as manifest, v2, v1 or unknown
//! - [`normalize`] maps v2 and v1 configs onto [`CanonicalConfig`](crate::proto::CanonicalConfig)
//! - [`normalize_wild_manifest`] restructures non-standard multi-endpoint
//!   documents into a [`Manifest`](crate::proto::Manifest)
//!
//! The structural checks behind detection live in [`guards`].

mod detect;
pub mod guards;
mod normalize;
mod wild;

pub use detect::{detect, detect_value};
pub use normalize::{normalize, normalize_value};
pub use wild::{WildManifestResult, normalize_wild_manifest};
