//! Error types for upload ingestion.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort parsing of a whole upload file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is neither `.csv` nor `.json`.
    #[error("unsupported file type for {path}: expected .csv or .json")]
    UnsupportedExtension { path: PathBuf },

    // === Content Errors ===
    /// Input contains no non-blank lines.
    #[error("{format} file appears to be empty")]
    EmptyInput { format: &'static str },

    /// Input parsed but yielded no rows.
    #[error("no records found in {format} file")]
    NoRows { format: &'static str },

    /// Input is not valid UTF-8.
    #[error("failed to decode file: {0}")]
    Decode(#[from] std::str::Utf8Error),

    /// CSV has no header row.
    #[error("no headers detected in CSV file")]
    NoHeaders,

    /// A row lacks a key column required for its file kind.
    #[error("Row {row}: Missing required fields: {}", columns.join(", "))]
    MissingColumns { row: usize, columns: Vec<String> },

    /// Malformed CSV.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON.
    #[error("invalid JSON file: {0}")]
    Json(#[from] serde_json::Error),

    /// JSON document is not an array of rows.
    #[error("JSON upload must be an array of objects")]
    NotAnArray,

    /// JSON array element is not an object.
    #[error("JSON record {row} is not an object")]
    NotAnObject { row: usize },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
