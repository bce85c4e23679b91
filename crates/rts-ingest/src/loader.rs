//! File loading by extension.

use std::path::Path;

use rts_model::RawRow;

use crate::csv_upload::parse_csv_bytes;
use crate::error::{IngestError, Result};
use crate::json_upload::parse_json_rows;
use crate::kind::FileKind;

/// Load an upload file, choosing the parser from its extension.
pub fn load_rows(path: &Path, kind: FileKind) -> Result<Vec<RawRow>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), kind = %kind, bytes = bytes.len(), "loading upload");

    match extension.as_deref() {
        Some("csv") => parse_csv_bytes(&bytes, kind),
        Some("json") => {
            let text = std::str::from_utf8(&bytes)?;
            parse_json_rows(text, kind)
        }
        _ => Err(IngestError::UnsupportedExtension {
            path: path.to_path_buf(),
        }),
    }
}
