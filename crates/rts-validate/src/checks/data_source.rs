//! Term set requirement for select and radio fields.

use std::sync::LazyLock;

use regex::Regex;
use rts_model::{CheckResult, non_empty};

use crate::record_field::RowView;

static TERM_SET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\s]*$").expect("Invalid term set regex"));

pub(crate) fn check(view: &RowView<'_>) -> Vec<CheckResult> {
    let Some(kind) = view.code.filter(|kind| kind.requires_data_source()) else {
        return Vec::new();
    };

    let Some(source) = non_empty(view.row.data_source_name.as_ref()) else {
        return vec![CheckResult::failed(
            "DataSourceName",
            format!("DataSourceName is required for field type {}", kind.label()),
        )];
    };

    let source = source.to_text();
    let mut results = vec![CheckResult::info(
        "DataSourceName",
        format!("Term set must exactly match: {source}"),
    )];
    if !TERM_SET_REGEX.is_match(&source) {
        results.push(CheckResult::warning(
            "DataSourceName",
            "Term Set can only contain alphanumeric characters and spaces",
        ));
    }
    results
}
