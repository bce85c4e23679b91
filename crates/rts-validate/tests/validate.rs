//! Batch validation over uploaded rows.

use std::collections::BTreeSet;

use rts_model::{RawRow, Status};
use rts_validate::{
    SKIP_VALIDATION_MESSAGE, ValidationConfig, validate_record_fields, validate_record_types,
    validate_upload,
};
use serde_json::{Value, json};

fn rows(value: Value) -> Vec<RawRow> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        other => panic!("expected array, got {other}"),
    }
}

fn known(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|name| (*name).to_string()).collect()
}

fn statuses_of<'a>(report: &'a rts_model::BatchReport, field: &str) -> Vec<&'a Status> {
    report
        .results
        .iter()
        .flat_map(|result| result.details.iter())
        .filter(|detail| detail.field == field)
        .map(|detail| &detail.status)
        .collect()
}

#[test]
fn punctuated_select_field_fails_format_and_term_set() {
    let report = validate_record_fields(
        &rows(json!([{
            "PartitionKey": "Finance",
            "RowKey": "Budget!",
            "DisplayName": "Budget",
            "FieldType": 2,
            "DataSourceName": ""
        }])),
        &known(&["Finance"]),
        &ValidationConfig::default(),
    );

    assert!(!report.overall_success);
    assert_eq!(report.results[0].status, Status::Failed);
    assert_eq!(statuses_of(&report, "RowKey Format"), vec![&Status::Failed]);
    assert_eq!(statuses_of(&report, "DataSourceName"), vec![&Status::Failed]);
}

#[test]
fn duplicate_keys_fail_on_both_rows() {
    let report = validate_record_fields(
        &rows(json!([
            {"PartitionKey": "Finance", "RowKey": "Title", "DisplayName": "Title", "FieldType": 1},
            {"PartitionKey": "Finance", "RowKey": "Title", "DisplayName": "Title", "FieldType": 1},
            {"PartitionKey": "Legal", "RowKey": "Title", "DisplayName": "Title", "FieldType": 1}
        ])),
        &known(&["Finance", "Legal"]),
        &ValidationConfig::default(),
    );

    assert_eq!(
        statuses_of(&report, "Unique Key"),
        vec![&Status::Failed, &Status::Failed, &Status::Success]
    );
}

#[test]
fn inactive_record_type_gets_a_single_info() {
    let (report, names) = validate_record_types(
        &rows(json!([{"RowKey": "Brief", "Prefix": "TOOLONG", "IsActive": "false"}])),
        &ValidationConfig::default(),
    );

    assert!(report.overall_success);
    let result = &report.results[0];
    assert_eq!(result.status, Status::Info);
    assert_eq!(result.is_active, Some(false));
    assert_eq!(result.details.len(), 1);
    assert_eq!(result.details[0].message, SKIP_VALIDATION_MESSAGE);
    assert!(names.contains("Brief"));
}

#[test]
fn ignored_rows_never_reach_the_report() {
    let report = validate_record_fields(
        &rows(json!([
            {"PartitionKey": "Finance", "RowKey": "Title_0", "FieldType": "bogus"},
            {"PartitionKey": "Finance", "RowKey": "ABCStage"},
            {"PartitionKey": "Finance", "RowKey": "ContentType"},
            {"PartitionKey": "Finance", "RowKey": "Region", "DisplayName": "Region", "FieldType": 1}
        ])),
        &known(&["Finance"]),
        &ValidationConfig::default(),
    );

    let records: Vec<&str> = report.results.iter().map(|r| r.record.as_str()).collect();
    assert_eq!(records, vec!["Region"]);
    assert!(report.overall_success);
}

#[test]
fn inactive_fields_follow_core_rules() {
    let report = validate_record_fields(
        &rows(json!([
            {"PartitionKey": "Finance", "RowKey": "Notes", "IsActive": false, "FieldType": "x"},
            {"PartitionKey": "Finance", "RowKey": "ABCOrgLevel1", "DisplayName": "Division", "IsActive": "False", "FieldType": 1},
            {"PartitionKey": "Finance", "RowKey": "ABCOrgLevel3", "DisplayName": "Branch", "IsActive": false, "NotEditable": true, "FieldType": 1},
            {"PartitionKey": "Finance", "RowKey": "ABCOrgLevel4", "DisplayName": "Team", "IsActive": false, "FieldType": 1}
        ])),
        &known(&["Finance"]),
        &ValidationConfig::default(),
    );

    let statuses: Vec<&Status> = report.results.iter().map(|r| &r.status).collect();
    assert_eq!(
        statuses,
        vec![&Status::Info, &Status::Success, &Status::Success, &Status::Success]
    );
    assert_eq!(report.results[0].details.len(), 1);
    assert!(report.results[1].details.len() > 1);
    assert_eq!(statuses_of(&report, "IsActive")[3], &Status::Error);
    assert!(report.overall_success);
}

#[test]
fn internal_errors_keep_earlier_results() {
    let report = validate_record_fields(
        &rows(json!([{"PartitionKey": "Finance", "RowKey": 42, "DisplayName": "Answer"}])),
        &known(&["Finance"]),
        &ValidationConfig::default(),
    );

    let details = &report.results[0].details;
    assert_eq!(details[0].field, "PartitionKey");
    let last = details.last().expect("details");
    assert_eq!(last.status, Status::Error);
    assert_eq!(last.message, "Unexpected error: RowKey must be text, got 42");
    assert_eq!(report.results[0].status, Status::Success);
    assert!(report.overall_success);
}

#[test]
fn record_type_internal_error_does_not_fail_the_batch() {
    let (report, _) = validate_record_types(
        &rows(json!([{"RowKey": "Brief", "Prefix": 12, "Category": "Corporate", "IsActive": true}])),
        &ValidationConfig::default(),
    );

    let result = &report.results[0];
    assert_eq!(result.details.len(), 1);
    assert_eq!(result.details[0].status, Status::Error);
    assert_eq!(result.status, Status::Success);
    assert!(report.overall_success);
}

#[test]
fn unknown_field_type_still_notes_the_creation_flag() {
    let report = validate_record_fields(
        &rows(json!([{
            "PartitionKey": "Finance",
            "RowKey": "Notes",
            "DisplayName": "Notes",
            "FieldType": 99,
            "IsNotRequiredOnCreation": true
        }])),
        &known(&["Finance"]),
        &ValidationConfig::default(),
    );

    assert_eq!(statuses_of(&report, "FieldType"), vec![&Status::Failed]);
    assert_eq!(statuses_of(&report, "IsNotRequiredOnCreation"), vec![&Status::Info]);
    assert_eq!(report.results[0].status, Status::Failed);
}

#[test]
fn upload_links_fields_to_record_types() {
    let report = validate_upload(
        &rows(json!([
            {"RowKey": "Finance", "Prefix": "FIN", "Category": "Corporate", "IsActive": true},
            {"RowKey": "Archive", "IsActive": false}
        ])),
        &rows(json!([
            {"PartitionKey": "Archive", "RowKey": "Box", "DisplayName": "Box", "FieldType": 1},
            {"PartitionKey": "Missing", "RowKey": "Box", "DisplayName": "Box", "FieldType": 1}
        ])),
        &ValidationConfig::default(),
    );

    assert!(report.record_types.overall_success);
    assert!(!report.record_fields.overall_success);
    assert!(!report.overall_success);
    assert_eq!(
        statuses_of(&report.record_fields, "PartitionKey"),
        vec![&Status::Success, &Status::Failed]
    );
}

#[test]
fn strict_mode_flags_duplicate_prefixes() {
    let config = ValidationConfig {
        strict_record_type_uniqueness: true,
        ..ValidationConfig::default()
    };
    let (report, _) = validate_record_types(
        &rows(json!([
            {"RowKey": "Finance", "Prefix": "FIN", "Category": "Corporate", "IsActive": true},
            {"RowKey": "Facilities", "Prefix": "FIN", "Category": "Corporate", "IsActive": true}
        ])),
        &config,
    );

    assert_eq!(
        statuses_of(&report, "Prefix"),
        vec![&Status::Failed, &Status::Failed]
    );
}

#[test]
fn validation_is_idempotent() {
    let types = rows(json!([
        {"RowKey": "Finance", "Prefix": "FIN", "Category": "Corporate", "IsActive": true,
         "StagesJson": "[{\"Name\":\"Initiate\",\"Order\":0},{\"Name\":\"Closed\",\"Order\":1}]"}
    ]));
    let fields = rows(json!([
        {"PartitionKey": "Finance", "RowKey": "Region", "FieldType": 10, "FiledType": "9"},
        {"PartitionKey": "Finance", "RowKey": "Owner", "FieldType": 4, "IsRequired": true, "NotEditable": true}
    ]));
    let config = ValidationConfig::default();

    assert_eq!(
        validate_upload(&types, &fields, &config),
        validate_upload(&types, &fields, &config)
    );
}

#[test]
fn field_report_shape() {
    let report = validate_record_fields(
        &rows(json!([{
            "PartitionKey": "Finance",
            "RowKey": "Region",
            "DisplayName": "Region",
            "FieldType": 2,
            "DataSourceName": "Regions",
            "WizardPosition": 0
        }])),
        &known(&["Finance"]),
        &ValidationConfig::default(),
    );

    insta::assert_json_snapshot!(report, @r#"
    {
      "overall_success": true,
      "results": [
        {
          "record": "Region",
          "display_name": "Region",
          "status": "SUCCESS",
          "is_active": true,
          "partition_key": "Finance",
          "details": [
            {
              "field": "PartitionKey",
              "status": "SUCCESS",
              "message": "Valid Record Type: Finance"
            },
            {
              "field": "Unique Key",
              "status": "SUCCESS",
              "message": "Field key is unique"
            },
            {
              "field": "RowKey Format",
              "status": "SUCCESS",
              "message": "RowKey format is valid"
            },
            {
              "field": "DataSourceName",
              "status": "INFO",
              "message": "Term set must exactly match: Regions"
            },
            {
              "field": "Display Name",
              "status": "SUCCESS",
              "message": "Display name is valid"
            },
            {
              "field": "FieldType",
              "status": "SUCCESS",
              "message": "Valid field type: single select dropdown"
            },
            {
              "field": "WizardPosition",
              "status": "SUCCESS",
              "message": "Field appears on page 0 (Record Information)"
            }
          ]
        }
      ]
    }
    "#);
}
