//! Error types for export writers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    /// JSON serialisation failed.
    #[error("failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialisation failed.
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Writing or flushing the output failed.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// Creating an output file failed.
    #[error("failed to create {path}: {source}")]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExportError>;
