//! JSON and CSV writers for export rows.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use rts_model::RawRow;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ExportError, Result};
use crate::record::{FIELD_COLUMNS, FieldExportRecord};

/// Output encoding for exports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Write records as a pretty-printed JSON array.
pub fn write_json<T: Serialize, W: Write>(records: &[T], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Write field records as CSV with the fixed column order.
pub fn write_fields_csv<W: Write>(records: &[FieldExportRecord], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(FIELD_COLUMNS)?;
    for record in records {
        csv.write_record(record.csv_row())?;
    }
    csv.flush()?;
    Ok(())
}

/// Write wire rows as CSV. Columns follow the first row's key order;
/// keys first seen in later rows are appended.
pub fn write_rows_csv<W: Write>(rows: &[RawRow], writer: W) -> Result<()> {
    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !columns.contains(&key.as_str()) {
                columns.push(key);
            }
        }
    }

    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(&columns)?;
    for row in rows {
        csv.write_record(columns.iter().map(|column| cell(row.get(*column))))?;
    }
    csv.flush()?;
    Ok(())
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// Create `path` and hand a buffered writer to `write`.
pub fn write_to_path<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(BufWriter<File>) -> Result<()>,
{
    let file = File::create(path).map_err(|source| ExportError::FileCreate {
        path: path.to_path_buf(),
        source,
    })?;
    write(BufWriter::new(file))?;
    tracing::info!(path = %path.display(), "wrote export");
    Ok(())
}
