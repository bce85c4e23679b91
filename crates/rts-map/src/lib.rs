//! Field mapping between the external flattened schema and internal names.
//!
//! Both directions go through a [`FieldMapping`]: uploads are re-keyed into
//! typed rows for validation, and exports re-key internal values into wire
//! columns.

mod convert;
mod mapping;

pub use convert::{field_row, map_record_type};
pub use mapping::{BOOLEAN_FIELDS, FieldMapping, MappedRow, names};
