//! Partition key, key uniqueness and row key format.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use rts_model::{CheckResult, FieldRow, WireValue};

use crate::error::{CheckError, Result};
use crate::record_field::RowView;

static ROW_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").expect("Invalid row key regex"));

/// The partition key must name a known record type.
pub(crate) fn partition(view: &RowView<'_>, record_types: &BTreeSet<String>) -> CheckResult {
    let partition_key = view.row.partition();
    if partition_key.is_empty() {
        CheckResult::failed("PartitionKey", "PartitionKey is required")
    } else if !record_types.contains(&partition_key) {
        CheckResult::failed(
            "PartitionKey",
            format!("PartitionKey '{partition_key}' does not match any Record Type"),
        )
    } else {
        CheckResult::success("PartitionKey", format!("Valid Record Type: {partition_key}"))
    }
}

/// No other row may share both partition key and row key. Rows are
/// compared by position, so two identical rows both fail.
pub(crate) fn uniqueness(view: &RowView<'_>, rows: &[FieldRow]) -> CheckResult {
    let partition_key = view.row.partition();
    let key = (Some(partition_key.clone()), Some(view.name.clone()));
    let duplicated = rows
        .iter()
        .enumerate()
        .any(|(index, other)| index != view.index && other.key() == key);

    if duplicated {
        CheckResult::failed(
            "Unique Key",
            format!(
                "Combination of PartitionKey '{partition_key}' and RowKey '{}' is not unique",
                view.name
            ),
        )
    } else {
        CheckResult::success("Unique Key", "Field key is unique")
    }
}

/// Row keys are alphanumeric with no spaces or punctuation.
pub(crate) fn row_key_format(view: &RowView<'_>) -> Result<CheckResult> {
    let row_key = match &view.row.row_key {
        None => view.name.as_str(),
        Some(WireValue::Text(text)) => text.as_str(),
        Some(other) => {
            return Err(CheckError::NotText {
                field: "RowKey",
                value: other.to_text(),
            });
        }
    };

    Ok(if ROW_KEY_REGEX.is_match(row_key) {
        CheckResult::success("RowKey Format", "RowKey format is valid")
    } else {
        CheckResult::failed(
            "RowKey Format",
            "RowKey must contain only alphanumeric characters (no spaces)",
        )
    })
}
