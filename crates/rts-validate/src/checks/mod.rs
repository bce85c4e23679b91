//! Record field check modules.
//!
//! Each module covers one concern of a field row; `record_field` runs them
//! in a fixed order.

pub(crate) mod data_source;
pub(crate) mod display;
pub(crate) mod flags;
pub(crate) mod keys;
pub(crate) mod placement;
pub(crate) mod types;

/// Field rows built from wire JSON for check unit tests.
#[cfg(test)]
pub(crate) fn field_row_from(value: serde_json::Value) -> rts_model::FieldRow {
    match value {
        serde_json::Value::Object(map) => {
            rts_map::field_row(&rts_map::FieldMapping::record_fields(), &map)
        }
        other => panic!("expected object, got {other}"),
    }
}
