//! Record type metadata model.
//!
//! This crate holds the types shared by every stage of the record type
//! pipeline:
//!
//! - **Definitions**: normalised record types, stages, core/custom fields and roles
//! - **Wire rows**: the flattened partition/row keyed shape used by uploads and exports
//! - **Field type codes**: the canonical 1-10 code table
//! - **Taxonomy**: immutable lookup tables injected into validators and the exporter
//! - **Results**: check results, entity results, batch and upload reports

pub mod definition;
pub mod error;
pub mod field_type;
pub mod result;
pub mod status;
pub mod taxonomy;
pub mod wire;

pub use definition::{
    CoreFieldDef, CustomFieldDef, FieldDef, RecordTypeBundle, RecordTypeDef, RoleDef, StageDef,
    SysCategory, WizardPosition,
};
pub use error::{ModelError, Result};
pub use field_type::FieldTypeCode;
pub use result::{
    BatchReport, CheckResult, EntityResult, UploadReport, ValidationStats, entity_status,
};
pub use status::Status;
pub use taxonomy::Taxonomy;
pub use wire::{FieldRow, RawRow, RecordTypeInput, UNKNOWN_FIELD, WireValue, non_empty};
