//! Validation rules.
//!
//! Each rule inspects one concern and returns the issues it found, empty when
//! the concern is satisfied. Rules never see each other's output; the
//! orchestrator in [`crate::validate`] concatenates them in a fixed order.
//!
//! | Rule | Inspects |
//! |------|----------|
//! | [`validate_structure`] | parseability, object shape, format detection (terminal) |
//! | [`validate_version`], [`validate_accepts`] | version tag and `accepts` shape |
//! | [`validate_fields`] | required per-entry fields |
//! | [`validate_amount`], [`validate_timeout`] | amount and timeout values |
//! | [`validate_network`], [`validate_asset`], [`validate_pay_to`] | chain, token and recipient |
//! | [`validate_resource`] | top-level resource |
//! | [`validate_legacy`] | v1 usage |
//! | [`validate_bazaar`], [`validate_output_schema`], [`validate_missing_schema`] | input/output schema extensions |

mod amount;
mod extensions;
mod fields;
mod legacy;
mod network;
mod resource;
mod structure;
mod version;

pub use amount::{validate_amount, validate_timeout};
pub use extensions::{validate_bazaar, validate_missing_schema, validate_output_schema};
pub use fields::validate_fields;
pub use legacy::validate_legacy;
pub use network::{validate_asset, validate_network, validate_pay_to};
pub use resource::validate_resource;
pub use structure::{ROOT_FIELD, StructureOutcome, validate_structure};
pub use version::{validate_accepts, validate_version};

/// Path of a field inside the `index`-th payment option.
pub(crate) fn entry_field(index: usize, name: &str) -> String {
    format!("accepts[{index}].{name}")
}
