//! Creation and editability flags.

use rts_model::{CheckResult, FieldTypeCode, WireValue};

use crate::record_field::RowView;

pub(crate) fn check(view: &RowView<'_>) -> Vec<CheckResult> {
    let mut results = Vec::new();
    let row = view.row;
    // Any integer outside the role codes, valid or not.
    let non_role_type = row
        .field_type
        .as_ref()
        .and_then(WireValue::as_int)
        .is_some_and(|code| FieldTypeCode::from_code(code).is_none_or(|kind| !kind.is_role()));

    if row.optional_on_creation() && non_role_type {
        let raw = row
            .is_not_required_on_creation
            .as_ref()
            .map(|value| value.to_text())
            .unwrap_or_default();
        results.push(CheckResult::info(
            "IsNotRequiredOnCreation",
            format!("IsNotRequiredOnCreation is set to {raw} but field is not a role field"),
        ));
    }

    if row.required() && row.optional_on_creation() && !view.is_role() {
        results.push(CheckResult::failed(
            "Required/Creation",
            "Mandatory fields must be visible on creation wizard",
        ));
    }

    if row.read_only() {
        results.push(CheckResult::info("NotEditable", "Field is not editable"));
    }

    if row.required() && row.read_only() {
        results.push(CheckResult::failed(
            "Required/Editable",
            "Field cannot be both required and not editable",
        ));
    }

    results
}
