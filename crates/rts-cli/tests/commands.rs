//! End-to-end tests for the `rts` subcommands over files on disk.

use std::fs;
use std::path::{Path, PathBuf};

use rts_cli::cli::{
    ExportArgs, ExportFormatArg, ExportWhatArg, ReportFormatArg, RowKeyStyleArg, ValidateArgs,
};
use rts_cli::commands::{FILE_ERROR_RECORD, read_bundles, run_export, run_validate};
use rts_cli::config::{AppConfig, load_config};
use rts_export::{FIELD_COLUMNS, RowKeyStyle};
use rts_model::{Status, UploadReport};
use tempfile::TempDir;

const RECORD_TYPES_CSV: &str = "\
RowKey,Prefix,Description,Category,Order,IsActive,StagesJson
Brief,BRF,Briefing notes,Corporate,1,true,\"[{\"\"Name\"\":\"\"Initiate\"\",\"\"Order\"\":0},{\"\"Name\"\":\"\"Closed\"\",\"\"Order\"\":1}]\"
";

const RECORD_FIELDS_JSON: &str = r#"[
    {"PartitionKey": "Brief", "RowKey": "Region", "DisplayName": "Region", "FieldType": 1, "IsActive": true},
    {"PartitionKey": "Brief", "RowKey": "Summary", "DisplayName": "Summary", "FieldType": "9"}
]"#;

const BUNDLE_JSON: &str = r#"{
    "record_type": {
        "name": "Brief",
        "prefix": "BRF",
        "category": "Corporate",
        "stages": [
            {"Name": "Initiate", "Order": 0},
            {"Name": "Review", "Order": 1},
            {"Name": "Closed", "Order": 2}
        ]
    },
    "core_fields": [
        {"name": "Title", "display_name": "Title", "field_type": "text", "order": 0}
    ],
    "custom_fields": [
        {"name": "Region", "display_name": "Region", "field_type": "combobox_single", "term_set": "Regions", "order": 1}
    ],
    "roles": [
        {"name": "ABCDecisionMaker", "stage": "Review", "order": 2}
    ]
}"#;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

fn validate_args(record_types: &Path, record_fields: &Path, output: &Path) -> ValidateArgs {
    ValidateArgs {
        record_types: record_types.to_path_buf(),
        record_fields: record_fields.to_path_buf(),
        report: ReportFormatArg::Json,
        output: Some(output.to_path_buf()),
        strict: false,
    }
}

fn export_args(input: &Path, output: &Path) -> ExportArgs {
    ExportArgs {
        input: input.to_path_buf(),
        what: ExportWhatArg::Fields,
        format: ExportFormatArg::Json,
        output: Some(output.to_path_buf()),
        row_key_style: None,
        no_check: false,
    }
}

#[test]
fn validate_clean_upload_writes_json_report() {
    let dir = TempDir::new().expect("temp dir");
    let types = write(&dir, "types.csv", RECORD_TYPES_CSV);
    let fields = write(&dir, "fields.json", RECORD_FIELDS_JSON);
    let output = dir.path().join("report.json");

    let report = run_validate(&validate_args(&types, &fields, &output), &AppConfig::default())
        .expect("validate");

    assert!(report.overall_success, "{report:#?}");
    assert_eq!(report.record_types.results.len(), 1);
    assert_eq!(report.record_fields.results.len(), 2);

    let written: UploadReport =
        serde_json::from_str(&fs::read_to_string(&output).expect("read report")).expect("parse");
    assert_eq!(written, report);
}

#[test]
fn unknown_partition_fails_the_upload() {
    let dir = TempDir::new().expect("temp dir");
    let types = write(&dir, "types.csv", RECORD_TYPES_CSV);
    let fields = write(
        &dir,
        "fields.json",
        r#"[{"PartitionKey": "Memo", "RowKey": "Region", "DisplayName": "Region", "FieldType": 1}]"#,
    );
    let output = dir.path().join("report.json");

    let report = run_validate(&validate_args(&types, &fields, &output), &AppConfig::default())
        .expect("validate");

    assert!(report.record_types.overall_success);
    assert!(!report.record_fields.overall_success);
    assert!(!report.overall_success);
}

#[test]
fn unreadable_files_become_file_errors() {
    let dir = TempDir::new().expect("temp dir");
    let types = write(&dir, "types.txt", "RowKey\nBrief\n");
    let fields = write(&dir, "fields.json", "[]");
    let output = dir.path().join("report.json");

    let report = run_validate(&validate_args(&types, &fields, &output), &AppConfig::default())
        .expect("validate");

    assert!(!report.overall_success);
    for batch in [&report.record_types, &report.record_fields] {
        assert_eq!(batch.results.len(), 1);
        assert_eq!(batch.results[0].record, FILE_ERROR_RECORD);
        assert_eq!(batch.results[0].status, Status::Error);
    }
}

#[test]
fn export_fields_as_csv() {
    let dir = TempDir::new().expect("temp dir");
    let input = write(&dir, "bundle.json", BUNDLE_JSON);
    let output = dir.path().join("fields.csv");
    let args = ExportArgs {
        format: ExportFormatArg::Csv,
        ..export_args(&input, &output)
    };

    let written = run_export(&args, &AppConfig::default()).expect("export");

    assert_eq!(written, 3);
    let text = fs::read_to_string(&output).expect("read export");
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some(FIELD_COLUMNS.join(",").as_str()));
    assert_eq!(lines.count(), 3);
}

#[test]
fn export_record_types_honours_row_key_style() {
    let dir = TempDir::new().expect("temp dir");
    let bundles = format!("[{BUNDLE_JSON}]");
    let input = write(&dir, "bundles.json", &bundles);
    let output = dir.path().join("types.json");
    let args = ExportArgs {
        what: ExportWhatArg::RecordTypes,
        row_key_style: Some(RowKeyStyleArg::NameWithPrefix),
        ..export_args(&input, &output)
    };

    assert_eq!(run_export(&args, &AppConfig::default()).expect("export"), 1);

    let rows: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).expect("read")).expect("parse");
    assert_eq!(rows[0]["RowKey"], "Brief (BRF)");
    assert_eq!(rows[0]["Prefix"], "BRF");
    assert_eq!(rows[0]["PartitionKey"], "V1");
}

#[test]
fn failing_bundles_are_not_exported() {
    let dir = TempDir::new().expect("temp dir");
    let broken = BUNDLE_JSON.replace(r#"{"Name": "Closed", "Order": 2}"#, r#"{"Name": "Done", "Order": 2}"#);
    let input = write(&dir, "bundle.json", &broken);
    let output = dir.path().join("fields.json");

    let error = run_export(&export_args(&input, &output), &AppConfig::default())
        .expect_err("definition checks should fail");
    assert!(error.to_string().contains("Brief"));
    assert!(!output.exists());

    let unchecked = ExportArgs {
        no_check: true,
        ..export_args(&input, &output)
    };
    assert_eq!(run_export(&unchecked, &AppConfig::default()).expect("export"), 3);
}

#[test]
fn bundle_files_accept_one_or_many() {
    let dir = TempDir::new().expect("temp dir");
    let one = write(&dir, "one.json", BUNDLE_JSON);
    let many = write(&dir, "many.json", &format!("[{BUNDLE_JSON}, {BUNDLE_JSON}]"));

    assert_eq!(read_bundles(&one).expect("one").len(), 1);
    assert_eq!(read_bundles(&many).expect("many").len(), 2);
}

#[test]
fn config_file_overrides_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let path = write(
        &dir,
        "rts.toml",
        r#"
[validation]
strict_record_type_uniqueness = true

[export]
row_key_style = "name_with_prefix"

[mapping.record_types]
colour = "Colour"
"#,
    );

    let config = load_config(Some(&path)).expect("load config");
    assert!(config.validation.strict_record_type_uniqueness);
    assert_eq!(config.export.row_key_style, RowKeyStyle::NameWithPrefix);
    assert_eq!(config.record_type_mapping().external("colour"), Some("Colour"));

    let bad = write(&dir, "bad.toml", "[validation]\nunknown = 1\n");
    assert!(load_config(Some(&bad)).is_err());
}
