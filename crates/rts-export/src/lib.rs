//! Export of record type definitions.
//!
//! Turns a normalised [`RecordTypeBundle`](rts_model::RecordTypeBundle) into
//! the flattened partition/row keyed rows the external table store reads,
//! and writes them as JSON or CSV.
//!
//! # Features
//!
//! - **Record types**: one row per record type under the fixed partition, with the ordered stage list as JSON text
//! - **Fields and roles**: numeric type codes, pinned core data sources, role creation flags
//! - **Writers**: pretty JSON arrays and fixed-column CSV

mod error;
mod export;
mod record;
mod writer;

// === Error Types ===
pub use error::{ExportError, Result};

// === Export ===
pub use export::{RowKeyStyle, export_record_fields, export_record_type};
pub use record::{FIELD_COLUMNS, FieldExportRecord};

// === Writers ===
pub use writer::{ExportFormat, write_fields_csv, write_json, write_rows_csv, write_to_path};
