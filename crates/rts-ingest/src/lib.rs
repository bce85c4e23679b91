//! Upload ingestion for record type metadata.
//!
//! This crate turns uploaded record type and record field files into raw
//! rows keyed by the external column names.
//!
//! # Features
//!
//! - **CSV Parsing**: BOM stripping, `null`/blank cells, boolean coercion,
//!   type annotation columns dropped, required key columns enforced
//! - **JSON Parsing**: arrays of row objects with native values kept
//! - **File Loading**: parser chosen by file extension
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use rts_ingest::{FileKind, load_rows};
//!
//! let rows = load_rows(Path::new("uploads/RecordFields.csv"), FileKind::RecordFields)?;
//! ```

mod csv_upload;
mod error;
mod json_upload;
mod kind;
mod loader;

// === Error Types ===
pub use error::{IngestError, Result};

// === Parsers ===
pub use csv_upload::{TYPE_ANNOTATION_SUFFIX, parse_csv_bytes, parse_csv_rows};
pub use json_upload::parse_json_rows;
pub use kind::FileKind;

// === File Loading ===
pub use loader::load_rows;
