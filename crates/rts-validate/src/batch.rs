//! Batch drivers over whole uploads.
//!
//! The record type batch runs first and yields the set of known record
//! type names; the record field batch checks partition keys against it.

use std::collections::BTreeSet;
use std::time::Instant;

use rts_map::{FieldMapping, field_row, map_record_type};
use rts_model::{
    BatchReport, EntityResult, FieldRow, RawRow, RecordTypeInput, Taxonomy, UploadReport,
    WireValue,
};

use crate::record_field::{FieldContext, validate_record_field};
use crate::record_type::{UniquenessScope, validate_record_type};

/// Record name used when a record type row has no `RowKey`.
pub const UNKNOWN_RECORD: &str = "Unknown";

/// Everything a validation run needs besides the rows.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    pub taxonomy: Taxonomy,
    pub record_type_mapping: FieldMapping,
    pub record_field_mapping: FieldMapping,
    /// Check record type names and prefixes against the rest of the upload.
    pub strict_record_type_uniqueness: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            taxonomy: Taxonomy::default(),
            record_type_mapping: FieldMapping::record_types(),
            record_field_mapping: FieldMapping::record_fields(),
            strict_record_type_uniqueness: false,
        }
    }
}

fn row_key(row: &RawRow, mapping: &FieldMapping) -> Option<String> {
    mapping
        .lookup(row, rts_map::names::NAME)
        .filter(|key| !key.is_blank())
        .map(|key| key.to_text())
}

/// Names of every record type in an upload, active or not.
pub fn record_type_names(rows: &[RawRow], mapping: &FieldMapping) -> BTreeSet<String> {
    rows.iter().filter_map(|row| row_key(row, mapping)).collect()
}

/// Validate every record type row.
///
/// Returns the report and the record type names for the field batch.
pub fn validate_record_types(
    rows: &[RawRow],
    config: &ValidationConfig,
) -> (BatchReport, BTreeSet<String>) {
    let span = tracing::info_span!("record_types", rows = rows.len());
    let _guard = span.enter();
    let started = Instant::now();

    let names = record_type_names(rows, &config.record_type_mapping);
    let inputs: Vec<RecordTypeInput> = rows
        .iter()
        .filter(|row| {
            row_key(row, &config.record_type_mapping)
                .is_none_or(|key| !config.taxonomy.is_ignored_record_type(&key))
        })
        .map(|row| map_record_type(&config.record_type_mapping, row))
        .collect();
    let ignored = rows.len() - inputs.len();

    let results: Vec<EntityResult> = inputs
        .iter()
        .enumerate()
        .map(|(current, input)| {
            let scope = config.strict_record_type_uniqueness.then_some(UniquenessScope {
                records: &inputs,
                current,
            });
            let details = validate_record_type(input, scope, &config.taxonomy);
            let record = input
                .name
                .as_ref()
                .map(WireValue::to_text)
                .unwrap_or_else(|| UNKNOWN_RECORD.to_string());
            EntityResult::from_details(record, details).with_active(input.is_enabled)
        })
        .collect();

    let report = BatchReport::from_results(results);
    tracing::info!(
        records = report.results.len(),
        ignored,
        success = report.overall_success,
        duration_ms = started.elapsed().as_millis(),
        "record type validation complete"
    );
    (report, names)
}

/// Validate every record field row against the known record type names.
///
/// Ignored rows are dropped before validation and never reach the
/// uniqueness snapshot.
pub fn validate_record_fields(
    rows: &[RawRow],
    record_types: &BTreeSet<String>,
    config: &ValidationConfig,
) -> BatchReport {
    let span = tracing::info_span!("record_fields", rows = rows.len());
    let _guard = span.enter();
    let started = Instant::now();

    let snapshot: Vec<FieldRow> = rows
        .iter()
        .map(|row| field_row(&config.record_field_mapping, row))
        .filter(|row| !is_ignored(row, &config.taxonomy))
        .collect();
    let ignored = rows.len() - snapshot.len();
    tracing::debug!(ignored, "filtered ignored field rows");

    let ctx = FieldContext {
        record_types,
        rows: &snapshot,
        taxonomy: &config.taxonomy,
    };
    let results: Vec<EntityResult> = snapshot
        .iter()
        .enumerate()
        .map(|(index, row)| {
            let details = validate_record_field(&ctx, index);
            EntityResult::from_details(row.name(), details)
                .with_display_name(row.display_name.as_ref().map(WireValue::to_text))
                .with_active(row.active())
                .with_partition_key(row.partition())
        })
        .collect();

    let report = BatchReport::from_results(results);
    tracing::info!(
        fields = report.results.len(),
        ignored,
        success = report.overall_success,
        duration_ms = started.elapsed().as_millis(),
        "record field validation complete"
    );
    report
}

fn is_ignored(row: &FieldRow, taxonomy: &Taxonomy) -> bool {
    row.row_key
        .as_ref()
        .is_some_and(|key| taxonomy.is_ignored_row_key(&key.to_text()))
}

/// Validate a record type upload and a record field upload together.
pub fn validate_upload(
    record_type_rows: &[RawRow],
    record_field_rows: &[RawRow],
    config: &ValidationConfig,
) -> UploadReport {
    let (record_types, names) = validate_record_types(record_type_rows, config);
    let record_fields = validate_record_fields(record_field_rows, &names, config);
    let report = UploadReport::new(record_types, record_fields);
    tracing::info!(
        record_types = names.len(),
        success = report.overall_success,
        "upload validation complete"
    );
    report
}
