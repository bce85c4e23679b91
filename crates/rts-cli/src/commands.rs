//! Subcommand implementations.

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tracing::{info, info_span, warn};

use rts_export::{
    ExportFormat, RowKeyStyle, export_record_fields, export_record_type, write_fields_csv,
    write_json, write_rows_csv, write_to_path,
};
use rts_ingest::{FileKind, load_rows};
use rts_model::{BatchReport, RecordTypeBundle, Status, UploadReport};
use rts_validate::{
    ValidationConfig, validate_bundle, validate_record_fields, validate_record_types,
};

use crate::cli::{
    ExportArgs, ExportFormatArg, ExportWhatArg, ReportFormatArg, RowKeyStyleArg, ValidateArgs,
};
use crate::config::AppConfig;
use crate::summary::{field_type_table, print_report};

/// Record name used for files that could not be parsed.
pub const FILE_ERROR_RECORD: &str = "File Error";

pub fn run_field_types() -> Result<()> {
    println!("{}", field_type_table());
    Ok(())
}

/// Validate both uploads. Unreadable files become a single `ERROR` entry
/// in their batch rather than aborting the run.
pub fn run_validate(args: &ValidateArgs, config: &AppConfig) -> Result<UploadReport> {
    let span = info_span!("validate");
    let _guard = span.enter();
    let started = Instant::now();

    let mut validation = config.validation_config();
    validation.strict_record_type_uniqueness |= args.strict;
    let report = validate_files(&args.record_types, &args.record_fields, &validation);

    match args.report {
        ReportFormatArg::Table => print_report(&report),
        ReportFormatArg::Json => match &args.output {
            Some(path) => write_to_path(path, |writer| write_report(&report, writer))
                .with_context(|| format!("write report to {}", path.display()))?,
            None => write_report(&report, io::stdout().lock()).context("write report")?,
        },
    }

    info!(
        success = report.overall_success,
        duration_ms = started.elapsed().as_millis(),
        "validation finished"
    );
    Ok(report)
}

fn write_report<W: Write>(report: &UploadReport, mut writer: W) -> rts_export::Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Load and validate a record type file and a record field file.
pub fn validate_files(
    record_types: &Path,
    record_fields: &Path,
    config: &ValidationConfig,
) -> UploadReport {
    let (types_report, names) = match load_rows(record_types, FileKind::RecordTypes) {
        Ok(rows) => validate_record_types(&rows, config),
        Err(error) => {
            warn!(path = %record_types.display(), %error, "record type file rejected");
            (
                BatchReport::file_error(FILE_ERROR_RECORD, "RecordTypes", error.to_string()),
                BTreeSet::new(),
            )
        }
    };

    let fields_report = match load_rows(record_fields, FileKind::RecordFields) {
        Ok(rows) => validate_record_fields(&rows, &names, config),
        Err(error) => {
            warn!(path = %record_fields.display(), %error, "record field file rejected");
            BatchReport::file_error(FILE_ERROR_RECORD, "RecordFields", error.to_string())
        }
    };

    UploadReport::new(types_report, fields_report)
}

/// A bundle file holds one bundle or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum BundleFile {
    Many(Vec<RecordTypeBundle>),
    One(Box<RecordTypeBundle>),
}

pub fn read_bundles(path: &Path) -> Result<Vec<RecordTypeBundle>> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let bundles = match serde_json::from_str(&text)
        .with_context(|| format!("parse bundles from {}", path.display()))?
    {
        BundleFile::Many(bundles) => bundles,
        BundleFile::One(bundle) => vec![*bundle],
    };
    Ok(bundles)
}

/// Export every bundle in the input file.
///
/// Bundles are checked first unless `--no-check` is given; any failed
/// check aborts the export.
pub fn run_export(args: &ExportArgs, config: &AppConfig) -> Result<usize> {
    let span = info_span!("export", input = %args.input.display());
    let _guard = span.enter();

    let bundles = read_bundles(&args.input)?;
    if !args.no_check {
        check_bundles(&bundles, config)?;
    }

    let style = match args.row_key_style {
        Some(RowKeyStyleArg::Name) => RowKeyStyle::Name,
        Some(RowKeyStyleArg::NameWithPrefix) => RowKeyStyle::NameWithPrefix,
        None => config.export.row_key_style,
    };
    if style == RowKeyStyle::NameWithPrefix {
        warn!("the name (prefix) RowKey style is deprecated");
    }
    let format = match args.format {
        ExportFormatArg::Json => ExportFormat::Json,
        ExportFormatArg::Csv => ExportFormat::Csv,
    };

    let written = match args.what {
        ExportWhatArg::Fields => {
            let records: Vec<_> = bundles
                .iter()
                .flat_map(|bundle| export_record_fields(bundle, &config.taxonomy))
                .collect();
            emit(args.output.as_deref(), |writer| match format {
                ExportFormat::Json => write_json(&records, writer),
                ExportFormat::Csv => write_fields_csv(&records, writer),
            })?;
            records.len()
        }
        ExportWhatArg::RecordTypes => {
            let mapping = config.record_type_mapping();
            let rows: Vec<_> = bundles
                .iter()
                .map(|bundle| {
                    export_record_type(&bundle.record_type, &mapping, style, &config.taxonomy)
                })
                .collect();
            emit(args.output.as_deref(), |writer| match format {
                ExportFormat::Json => write_json(&rows, writer),
                ExportFormat::Csv => write_rows_csv(&rows, writer),
            })?;
            rows.len()
        }
    };

    info!(bundles = bundles.len(), rows = written, "export finished");
    Ok(written)
}

fn check_bundles(bundles: &[RecordTypeBundle], config: &AppConfig) -> Result<()> {
    let mut failed = Vec::new();
    for bundle in bundles {
        let result = validate_bundle(bundle, &config.taxonomy);
        for detail in result.details.iter().filter(|d| d.status.is_problem()) {
            eprintln!("{}: {} - {}", result.record, detail.field, detail.message);
        }
        for detail in result.details.iter().filter(|d| d.status == Status::Warning) {
            warn!(record = %result.record, field = %detail.field, "{}", detail.message);
        }
        if !result.is_successful() {
            failed.push(result.record);
        }
    }
    if !failed.is_empty() {
        bail!("definition checks failed for: {}", failed.join(", "));
    }
    Ok(())
}

fn emit<F>(output: Option<&Path>, write: F) -> Result<()>
where
    F: FnOnce(Box<dyn Write>) -> rts_export::Result<()>,
{
    match output {
        Some(path) => write_to_path(path, |file| write(Box::new(file)))
            .with_context(|| format!("write {}", path.display())),
        None => write(Box::new(io::stdout().lock())).context("write export"),
    }
}
