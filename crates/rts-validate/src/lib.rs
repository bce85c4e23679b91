//! Rule-based validation for record type metadata.
//!
//! Validators never return errors: every outcome, including internal
//! failures, is a [`CheckResult`](rts_model::CheckResult) with one of the
//! five statuses.
//!
//! # Features
//!
//! - **Stages**: name, order, required stage and bookend position checks
//! - **Record types**: name, prefix, description, category and order, with optional strict uniqueness
//! - **Record fields**: key, type, term set, placement and flag checks in the context of the whole upload
//! - **Batches**: ignored-row filtering and report aggregation for uploads
//! - **Definitions**: invariants of normalised bundles before export
//!
//! # Example
//!
//! ```ignore
//! use rts_validate::{ValidationConfig, validate_upload};
//!
//! let config = ValidationConfig::default();
//! let report = validate_upload(&record_type_rows, &record_field_rows, &config);
//! println!("overall success: {}", report.overall_success);
//! ```

mod checks;
mod definition;
mod error;
mod record_field;
mod record_type;
mod stage;

pub mod batch;

// === Batch Drivers ===
pub use batch::{
    UNKNOWN_RECORD, ValidationConfig, record_type_names, validate_record_fields,
    validate_record_types, validate_upload,
};

// === Single Entity Validators ===
pub use record_field::{FieldContext, SKIP_VALIDATION_MESSAGE, validate_record_field};
pub use record_type::{
    DESCRIPTION_MAX_LENGTH, PREFIX_MAX_LENGTH, UniquenessScope, validate_record_type,
};
pub use stage::validate_stages;

// === Definition Checks ===
pub use definition::validate_bundle;
