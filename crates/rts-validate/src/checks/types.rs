//! `FieldType` and legacy `FiledType` checks.

use rts_model::{CheckResult, FieldTypeCode, Taxonomy, WireValue};

use crate::record_field::RowView;

fn valid_codes() -> String {
    let codes: Vec<String> = FieldTypeCode::valid_codes()
        .iter()
        .map(i64::to_string)
        .collect();
    format!("[{}]", codes.join(", "))
}

/// Both columns must agree when both are present. Values are compared by
/// canonical text, so `2` and `"2"` agree.
pub(crate) fn agreement(view: &RowView<'_>) -> Option<CheckResult> {
    match (&view.row.field_type, &view.row.filed_type) {
        (Some(field_type), Some(filed_type)) if field_type.to_text() == filed_type.to_text() => {
            Some(CheckResult::info(
                "FiledType",
                format!("FiledType present and matches FieldType (value: {field_type})"),
            ))
        }
        (Some(field_type), Some(filed_type)) => Some(CheckResult::failed(
            "Field Types",
            format!("FieldType ({field_type}) does not match FiledType ({filed_type})"),
        )),
        (None, Some(filed_type)) => Some(CheckResult::info(
            "FiledType",
            format!("FiledType present with value: {filed_type}"),
        )),
        _ => None,
    }
}

/// Range checks for both columns, plus pinned core field types.
///
/// The legacy column only reports failures.
pub(crate) fn values(view: &RowView<'_>, taxonomy: &Taxonomy) -> Vec<CheckResult> {
    let mut results = Vec::new();

    if let Some(field_type) = &view.row.field_type {
        results.push(match field_type.as_int() {
            None => CheckResult::failed("FieldType", "FieldType must be a valid integer"),
            Some(code) => match FieldTypeCode::from_code(code) {
                Some(kind) => {
                    CheckResult::success("FieldType", format!("Valid field type: {}", kind.label()))
                }
                None => CheckResult::failed(
                    "FieldType",
                    format!("Invalid field type: {field_type}. Must be one of {}", valid_codes()),
                ),
            },
        });
    }

    if let Some(filed_type) = &view.row.filed_type {
        match filed_type.as_int() {
            None => results.push(CheckResult::failed(
                "FiledType",
                "FiledType must be a valid integer",
            )),
            Some(code) if FieldTypeCode::from_code(code).is_none() => {
                results.push(CheckResult::failed(
                    "FiledType",
                    format!("Invalid filed type: {filed_type}. Must be one of {}", valid_codes()),
                ));
            }
            Some(_) => {}
        }
    }

    if let Some(pinned) = taxonomy.pinned_field_type(&view.name) {
        let actual = view.row.field_type.as_ref().and_then(WireValue::as_int);
        if actual.is_some_and(|code| code != pinned.code()) {
            results.push(CheckResult::warning(
                "FieldType",
                format!(
                    "Core field '{}' is always exported as field type {} ({})",
                    view.name,
                    pinned.code(),
                    pinned.label()
                ),
            ));
        }
    }

    results
}

#[cfg(test)]
mod tests {
    use rts_model::Status;
    use serde_json::json;

    use super::*;
    use crate::checks::field_row_from;

    fn agreement_of(value: serde_json::Value) -> Option<CheckResult> {
        let row = field_row_from(value);
        agreement(&RowView::new(&row, 0))
    }

    fn values_of(value: serde_json::Value) -> Vec<CheckResult> {
        let row = field_row_from(value);
        values(&RowView::new(&row, 0), &Taxonomy::default())
    }

    #[test]
    fn mismatched_type_columns_fail() {
        assert_eq!(
            agreement_of(json!({"RowKey": "Region", "FieldType": 2, "FiledType": 3})),
            Some(CheckResult::failed(
                "Field Types",
                "FieldType (2) does not match FiledType (3)"
            ))
        );
    }

    #[test]
    fn matching_type_columns_compare_as_text() {
        let result = agreement_of(json!({"RowKey": "Region", "FieldType": 2, "FiledType": "2"}))
            .expect("agreement result");
        assert_eq!(result.field, "FiledType");
        assert_eq!(result.status, Status::Info);
    }

    #[test]
    fn legacy_column_alone_is_informational() {
        assert_eq!(
            agreement_of(json!({"RowKey": "Notes", "FiledType": 9})),
            Some(CheckResult::info("FiledType", "FiledType present with value: 9"))
        );
        assert_eq!(agreement_of(json!({"RowKey": "Notes", "FieldType": 9})), None);
    }

    #[test]
    fn invalid_legacy_type_fails() {
        assert_eq!(
            values_of(json!({"RowKey": "Notes", "FiledType": "x"})),
            vec![CheckResult::failed("FiledType", "FiledType must be a valid integer")]
        );
        assert_eq!(
            values_of(json!({"RowKey": "Notes", "FiledType": 12})),
            vec![CheckResult::failed(
                "FiledType",
                "Invalid filed type: 12. Must be one of [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]"
            )]
        );
    }

    #[test]
    fn valid_legacy_type_adds_no_success() {
        assert_eq!(
            values_of(json!({"RowKey": "Notes", "FieldType": 9, "FiledType": 9})),
            vec![CheckResult::success("FieldType", "Valid field type: text area")]
        );
    }

    #[test]
    fn field_type_range_is_checked() {
        let results = values_of(json!({"RowKey": "Notes", "FieldType": 0}));
        assert_eq!(results[0].status, Status::Failed);
        assert!(results[0].message.starts_with("Invalid field type: 0."));
        assert_eq!(
            values_of(json!({"RowKey": "Notes", "FieldType": "abc"})),
            vec![CheckResult::failed("FieldType", "FieldType must be a valid integer")]
        );
    }

    #[test]
    fn retyped_core_field_warns() {
        let results = values_of(json!({"RowKey": "Title", "FieldType": 2}));
        assert_eq!(
            results.last(),
            Some(&CheckResult::warning(
                "FieldType",
                "Core field 'Title' is always exported as field type 1 (text input)"
            ))
        );
    }
}
