//! Record field and role row validation.
//!
//! One row is checked in the context of the whole upload: the set of
//! record type names it may belong to and every sibling row (for key
//! uniqueness). Checks accumulate; an internal error appends a single
//! `ERROR` and keeps the results gathered so far.

use std::collections::BTreeSet;

use rts_model::{CheckResult, FieldRow, FieldTypeCode, Taxonomy, WireValue, non_empty};

use crate::checks;
use crate::error::{CheckError, Result};

/// Message for rows skipped because they are inactive.
pub const SKIP_VALIDATION_MESSAGE: &str =
    "Record is inactive (IsActive=False) - skipping validation";

/// Shared, read-only context for validating one upload of field rows.
///
/// `rows` is the pre-filtered snapshot used for uniqueness checks; it is
/// never mutated, so rows may be validated in any order.
#[derive(Debug, Clone, Copy)]
pub struct FieldContext<'a> {
    pub record_types: &'a BTreeSet<String>,
    pub rows: &'a [FieldRow],
    pub taxonomy: &'a Taxonomy,
}

/// The row under validation with values every check needs.
pub(crate) struct RowView<'a> {
    pub row: &'a FieldRow,
    pub index: usize,
    pub name: String,
    /// Numeric field type, when `FieldType` is a non-blank valid code.
    pub code: Option<FieldTypeCode>,
}

impl<'a> RowView<'a> {
    pub fn new(row: &'a FieldRow, index: usize) -> Self {
        Self {
            row,
            index,
            name: row.name(),
            code: non_empty(row.field_type.as_ref())
                .and_then(WireValue::as_int)
                .and_then(FieldTypeCode::from_code),
        }
    }

    pub fn is_role(&self) -> bool {
        self.code.is_some_and(FieldTypeCode::is_role)
    }
}

/// Validate the row at `index` of `ctx.rows`.
pub fn validate_record_field(ctx: &FieldContext<'_>, index: usize) -> Vec<CheckResult> {
    let mut results = Vec::new();
    let Some(row) = ctx.rows.get(index) else {
        return vec![unexpected(&CheckError::RowOutOfRange(index))];
    };
    let view = RowView::new(row, index);

    if !row.active() {
        match inactive_notice(&view, ctx.taxonomy) {
            Some(notice) => results.push(notice),
            None => {
                tracing::debug!(field = %view.name, "inactive field skipped");
                return vec![CheckResult::info("IsActive", SKIP_VALIDATION_MESSAGE)];
            }
        }
    }

    if let Err(err) = run_checks(&view, ctx, &mut results) {
        tracing::error!(field = %view.name, error = %err, "field validation aborted");
        results.push(unexpected(&err));
    }

    tracing::debug!(
        field = %view.name,
        partition_key = %row.partition(),
        checks = results.len(),
        "validated field"
    );
    results
}

fn unexpected(err: &CheckError) -> CheckResult {
    CheckResult::error("System", format!("Unexpected error: {err}"))
}

/// Inactive core fields are still validated; everything else is skipped.
fn inactive_notice(view: &RowView<'_>, taxonomy: &Taxonomy) -> Option<CheckResult> {
    let name = &view.name;
    if taxonomy.is_system_mandatory(name) {
        Some(CheckResult::info(
            "IsActive",
            format!("Field '{name}' is inactive but will still show because it is system-mandatory"),
        ))
    } else if taxonomy.is_core_field(name) {
        if view.row.read_only() {
            Some(CheckResult::info(
                "IsActive",
                format!("Core field '{name}' is inactive and marked NotEditable"),
            ))
        } else {
            Some(CheckResult::error(
                "IsActive",
                format!(
                    "Core field '{name}' is inactive but not marked NotEditable; it would disappear from the record view"
                ),
            ))
        }
    } else {
        None
    }
}

fn run_checks(
    view: &RowView<'_>,
    ctx: &FieldContext<'_>,
    results: &mut Vec<CheckResult>,
) -> Result<()> {
    // 1. Keys: partition, uniqueness, row key format
    results.push(checks::keys::partition(view, ctx.record_types));
    results.push(checks::keys::uniqueness(view, ctx.rows));
    results.push(checks::keys::row_key_format(view)?);

    // 2. FieldType / FiledType agreement
    results.extend(checks::types::agreement(view));

    // 3. Term set requirement
    results.extend(checks::data_source::check(view));

    // 4. Display name and description
    results.extend(checks::display::check(view));

    // 5. Field type values
    results.extend(checks::types::values(view, ctx.taxonomy));

    // 6. Wizard placement
    results.push(checks::placement::check(view));

    // 7. Creation and editability flags
    results.extend(checks::flags::check(view));

    Ok(())
}
