//! JSON upload parsing.

use rts_model::RawRow;
use serde_json::Value;

use crate::error::{IngestError, Result};
use crate::kind::FileKind;

/// Parse a JSON array of row objects.
pub fn parse_json_rows(text: &str, kind: FileKind) -> Result<Vec<RawRow>> {
    let text = text.trim_start_matches('\u{feff}');
    if text.trim().is_empty() {
        return Err(IngestError::EmptyInput { format: "JSON" });
    }

    let Value::Array(items) = serde_json::from_str::<Value>(text)? else {
        return Err(IngestError::NotAnArray);
    };

    let rows = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(row) => Ok(row),
            _ => Err(IngestError::NotAnObject { row: index + 1 }),
        })
        .collect::<Result<Vec<RawRow>>>()?;

    if rows.is_empty() {
        return Err(IngestError::NoRows { format: "JSON" });
    }
    tracing::info!(kind = %kind, rows = rows.len(), "parsed JSON upload");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_array_documents() {
        let err = parse_json_rows(r#"{"RowKey":"Brief"}"#, FileKind::RecordTypes).unwrap_err();
        assert!(matches!(err, IngestError::NotAnArray));
    }

    #[test]
    fn rejects_scalar_rows() {
        let err = parse_json_rows(r#"[{"RowKey":"Brief"}, 3]"#, FileKind::RecordTypes).unwrap_err();
        assert!(matches!(err, IngestError::NotAnObject { row: 2 }));
    }

    #[test]
    fn keeps_native_types() {
        let rows = parse_json_rows(
            r#"[{"RowKey":"Title","FieldType":1,"IsActive":true}]"#,
            FileKind::RecordFields,
        )
        .unwrap();
        assert_eq!(rows[0]["FieldType"], Value::from(1));
        assert_eq!(rows[0]["IsActive"], Value::Bool(true));
    }
}
