//! CSV upload parsing.
//!
//! Produces the same row shape as a JSON upload: blank and `null` cells are
//! absent, `true`/`false` become booleans, everything else stays trimmed
//! text for the validators to re-parse.

use csv::{ReaderBuilder, Trim};
use rts_model::RawRow;
use serde_json::Value;

use crate::error::{IngestError, Result};
use crate::kind::FileKind;

/// Header suffix marking type annotation columns exported alongside values.
pub const TYPE_ANNOTATION_SUFFIX: &str = "@type";

/// Parse raw CSV bytes (UTF-8, BOM optional).
pub fn parse_csv_bytes(bytes: &[u8], kind: FileKind) -> Result<Vec<RawRow>> {
    let text = std::str::from_utf8(bytes)?;
    parse_csv_rows(text, kind)
}

/// Parse CSV text into raw rows.
pub fn parse_csv_rows(text: &str, kind: FileKind) -> Result<Vec<RawRow>> {
    tracing::debug!(kind = %kind, bytes = text.len(), "parsing CSV upload");

    let text = text.trim_start_matches('\u{feff}');
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    if lines.is_empty() {
        tracing::error!(kind = %kind, "CSV upload has no non-empty lines");
        return Err(IngestError::EmptyInput { format: "CSV" });
    }
    let content = lines.join("\n");

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|header| header.trim_matches('\u{feff}').to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::NoHeaders);
    }
    tracing::debug!(kind = %kind, columns = headers.len(), "CSV headers detected");

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let row_number = index + 1;

        let mut row = RawRow::new();
        for (idx, header) in headers.iter().enumerate() {
            if header.is_empty() || header.ends_with(TYPE_ANNOTATION_SUFFIX) {
                continue;
            }
            row.insert(header.clone(), cell_value(record.get(idx)));
        }

        let missing: Vec<String> = kind
            .required_columns()
            .iter()
            .filter(|column| !row.contains_key(**column))
            .map(|column| (*column).to_string())
            .collect();
        if !missing.is_empty() {
            tracing::error!(kind = %kind, row = row_number, ?missing, "missing required columns");
            return Err(IngestError::MissingColumns {
                row: row_number,
                columns: missing,
            });
        }

        rows.push(row);
    }

    if rows.is_empty() {
        return Err(IngestError::NoRows { format: "CSV" });
    }
    tracing::info!(kind = %kind, rows = rows.len(), "parsed CSV upload");
    Ok(rows)
}

/// Normalise one cell. Missing trailing cells count as blank.
fn cell_value(raw: Option<&str>) -> Value {
    let value = raw.unwrap_or("").trim();
    if value.is_empty() || value.eq_ignore_ascii_case("null") {
        Value::Null
    } else if value.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if value.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else {
        Value::String(value.to_string())
    }
}
