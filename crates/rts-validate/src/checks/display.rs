//! Display name and description.

use rts_model::{CheckResult, non_empty};

use crate::record_field::RowView;

pub(crate) const FIELD_DESCRIPTION_MAX_LENGTH: usize = 300;

pub(crate) fn check(view: &RowView<'_>) -> Vec<CheckResult> {
    let mut results = Vec::new();

    if non_empty(view.row.display_name.as_ref()).is_some() {
        results.push(CheckResult::success("Display Name", "Display name is valid"));
    } else {
        results.push(CheckResult::failed("Display Name", "Display name is required"));
    }

    let too_long = view
        .row
        .description
        .as_ref()
        .is_some_and(|description| description.to_text().chars().count() > FIELD_DESCRIPTION_MAX_LENGTH);
    if too_long {
        results.push(CheckResult::failed(
            "Description",
            format!("Description must be {FIELD_DESCRIPTION_MAX_LENGTH} characters or less"),
        ));
    }

    results
}
