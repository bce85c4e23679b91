//! Creation wizard placement.

use rts_model::{CheckResult, WizardPosition};

use crate::record_field::RowView;

pub(crate) fn check(view: &RowView<'_>) -> CheckResult {
    if view.is_role() {
        return CheckResult::info("WizardPosition", "Role field appears on the roles page");
    }

    let default = WizardPosition::default();
    let Some(value) = view
        .row
        .wizard_position
        .as_ref()
        .filter(|value| !value.is_nan_like())
    else {
        return CheckResult::info(
            "WizardPosition",
            format!(
                "WizardPosition not set; field defaults to page {} ({})",
                default.index(),
                default.label()
            ),
        );
    };

    match value.as_int().and_then(WizardPosition::from_index) {
        Some(position) => CheckResult::success(
            "WizardPosition",
            format!(
                "Field appears on page {} ({})",
                position.index(),
                position.label()
            ),
        ),
        None => CheckResult::failed(
            "WizardPosition",
            format!("WizardPosition must be 0 (Record Information) or 1 (Record Response), got {value}"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use rts_model::Status;
    use serde_json::json;

    use super::*;
    use crate::checks::field_row_from;

    fn placement_of(value: serde_json::Value) -> CheckResult {
        let row = field_row_from(value);
        check(&RowView::new(&row, 0))
    }

    #[test]
    fn missing_or_nan_position_defaults_to_first_page() {
        let expected = CheckResult::info(
            "WizardPosition",
            "WizardPosition not set; field defaults to page 0 (Record Information)",
        );
        assert_eq!(placement_of(json!({"RowKey": "Notes", "FieldType": 1})), expected);
        assert_eq!(
            placement_of(json!({"RowKey": "Notes", "FieldType": 1, "WizardPosition": "nan"})),
            expected
        );
    }

    #[test]
    fn valid_positions_name_the_page() {
        assert_eq!(
            placement_of(json!({"RowKey": "Notes", "FieldType": 1, "WizardPosition": "1"})),
            CheckResult::success("WizardPosition", "Field appears on page 1 (Record Response)")
        );
    }

    #[test]
    fn out_of_range_position_fails() {
        let result = placement_of(json!({"RowKey": "Notes", "FieldType": 1, "WizardPosition": 2}));
        assert_eq!(result.status, Status::Failed);
        assert_eq!(
            result.message,
            "WizardPosition must be 0 (Record Information) or 1 (Record Response), got 2"
        );
    }

    #[test]
    fn roles_ignore_position() {
        assert_eq!(
            placement_of(json!({"RowKey": "ABCReviewer", "FieldType": 8, "WizardPosition": 5})),
            CheckResult::info("WizardPosition", "Role field appears on the roles page")
        );
    }
}
