//! Property tests for stage lists and field rows.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rts_model::{RawRow, Status, Taxonomy};
use rts_validate::{ValidationConfig, validate_record_fields, validate_stages};
use serde_json::{Value, json};

/// Distinct alphanumeric stage names other than the bookends.
fn middle_stages() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set("[A-Za-z][A-Za-z0-9 ]{0,48}", 0..8).prop_map(|names| {
        names
            .into_iter()
            .filter(|name| name != "Initiate" && name != "Closed")
            .collect()
    })
}

fn stage_json(names: &[String]) -> String {
    let mut stages = vec![json!({"Name": "Initiate", "Order": 0})];
    for (index, name) in names.iter().enumerate() {
        stages.push(json!({"Name": name, "Order": index + 1}));
    }
    stages.push(json!({"Name": "Closed", "Order": names.len() + 1}));
    Value::Array(stages).to_string()
}

fn row(value: Value) -> RawRow {
    match value {
        Value::Object(map) => map,
        _ => RawRow::new(),
    }
}

proptest! {
    #[test]
    fn well_formed_stage_lists_never_fail(names in middle_stages()) {
        let results = validate_stages(Some(&stage_json(&names)), "Brief", &Taxonomy::default());
        prop_assert!(results.iter().all(|r| r.status == Status::Success));
    }

    #[test]
    fn stage_declaration_order_does_not_matter(names in middle_stages()) {
        let json = stage_json(&names);
        let mut stages: Vec<Value> = serde_json::from_str(&json).unwrap();
        stages.reverse();
        let reversed = Value::Array(stages).to_string();
        let results = validate_stages(Some(&reversed), "Brief", &Taxonomy::default());
        prop_assert!(results.iter().all(|r| r.status != Status::Failed));
    }

    #[test]
    fn term_set_is_required_only_for_select_types(code in 1i64..=10) {
        let report = validate_record_fields(
            &[row(json!({
                "PartitionKey": "Finance",
                "RowKey": "Choice",
                "DisplayName": "Choice",
                "FieldType": code
            }))],
            &BTreeSet::from(["Finance".to_string()]),
            &ValidationConfig::default(),
        );
        let term_set_failed = report.results[0]
            .details
            .iter()
            .any(|d| d.field == "DataSourceName" && d.status == Status::Failed);
        prop_assert_eq!(term_set_failed, matches!(code, 2 | 3 | 10));
    }

    #[test]
    fn mandatory_fields_hidden_on_creation_fail(code in prop::sample::select(vec![1i64, 5, 6, 7, 9])) {
        let report = validate_record_fields(
            &[row(json!({
                "PartitionKey": "Finance",
                "RowKey": "Amount",
                "DisplayName": "Amount",
                "FieldType": code,
                "IsRequired": true,
                "IsNotRequiredOnCreation": "true"
            }))],
            &BTreeSet::from(["Finance".to_string()]),
            &ValidationConfig::default(),
        );
        prop_assert_eq!(report.results[0].status, Status::Failed);
    }
}
