//! Workflow stage validation.
//!
//! Checks a `[{"Name", "Order"}]` stage list: names are present, short
//! enough and unique; orders are non-negative unique integers; the required
//! stages exist; the first and last stages sit at the order extremes.

use std::collections::BTreeSet;

use rts_model::{CheckResult, Status, Taxonomy, WireValue};
use serde_json::Value;

use crate::error::{CheckError, Result};

/// Validate a stage list supplied as JSON text.
///
/// `record_name` only labels diagnostics. Never fails: malformed input is
/// reported as `FAILED`, internal errors as a trailing `ERROR`.
pub fn validate_stages(
    stages_json: Option<&str>,
    record_name: &str,
    taxonomy: &Taxonomy,
) -> Vec<CheckResult> {
    let Some(text) = stages_json.filter(|text| !text.is_empty()) else {
        return vec![CheckResult::failed("Stages", "Stages data is required")];
    };

    let parsed: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(record = record_name, error = %err, "stage payload is not JSON");
            return vec![CheckResult::failed(
                "Stages JSON",
                "Invalid stages JSON format",
            )];
        }
    };

    let Value::Array(stages) = parsed else {
        return vec![CheckResult::failed("Stages", "Stages must be a list")];
    };
    if stages.is_empty() {
        return vec![CheckResult::failed(
            "Stages",
            "At least one stage is required",
        )];
    }

    let mut results = Vec::new();
    if let Err(err) = check_stage_list(&stages, taxonomy, &mut results) {
        tracing::warn!(record = record_name, error = %err, "stage validation aborted");
        results.push(CheckResult::error(
            "Stages",
            format!("Error validating stages: {err}"),
        ));
    }

    let failed = results.iter().filter(|r| r.status == Status::Failed).count();
    tracing::debug!(record = record_name, stages = stages.len(), failed, "validated stages");
    results
}

fn check_stage_list(
    stages: &[Value],
    taxonomy: &Taxonomy,
    results: &mut Vec<CheckResult>,
) -> Result<()> {
    let max_len = taxonomy.stage_name_max_length;
    let mut names: BTreeSet<String> = BTreeSet::new();
    let mut orders: BTreeSet<i64> = BTreeSet::new();

    for (index, stage) in stages.iter().enumerate() {
        let Value::Object(stage) = stage else {
            return Err(CheckError::StageNotObject { index });
        };
        let name = stage_name(stage.get("Name"))?;
        let order = stage.get("Order").and_then(WireValue::from_json);

        // Name: required, then length, then uniqueness.
        if name.is_empty() {
            results.push(CheckResult::failed("Stage Name", "Stage name is required"));
        } else if name.chars().count() > max_len {
            results.push(CheckResult::failed(
                format!("Stage '{name}'"),
                format!("Stage name exceeds maximum length of {max_len} characters"),
            ));
        } else if names.contains(&name) {
            results.push(CheckResult::failed(
                format!("Stage '{name}'"),
                "Duplicate stage name",
            ));
        } else {
            results.push(CheckResult::success(
                format!("Stage '{name}'"),
                format!("Stage name is valid (within {max_len} chars)"),
            ));
            names.insert(name.clone());
        }

        // Order: integer, then sign, then uniqueness.
        let order_field = format!("Stage '{name}' Order");
        match order.as_ref().and_then(WireValue::as_int) {
            None => results.push(CheckResult::failed(
                order_field,
                "Stage order must be a valid integer",
            )),
            Some(order) if order < 0 => results.push(CheckResult::failed(
                order_field,
                "Stage order must be a non-negative number",
            )),
            Some(order) if orders.contains(&order) => results.push(CheckResult::failed(
                order_field,
                format!("Duplicate order number: {order}"),
            )),
            Some(order) => {
                orders.insert(order);
                results.push(CheckResult::success(
                    order_field,
                    format!("Stage order {order} is valid"),
                ));
            }
        }
    }

    for required in &taxonomy.required_stages {
        if names.contains(required) {
            results.push(CheckResult::success(
                format!("Required Stage '{required}'"),
                "Required stage is present",
            ));
        } else {
            results.push(CheckResult::failed(
                "Required Stages",
                format!("Required stage '{required}' is missing"),
            ));
        }
    }

    let first = &taxonomy.first_stage;
    if names.contains(first) {
        let order = declared_order(stages, first)?;
        let lowest = orders.first().copied().ok_or(CheckError::NoValidOrders)?;
        results.push(if order == lowest {
            CheckResult::success(
                "Stage Sequence",
                format!("'{first}' stage is correctly positioned as the first stage"),
            )
        } else {
            CheckResult::failed(
                "Stage Sequence",
                format!("'{first}' stage must be the first stage (lowest order number)"),
            )
        });
    }

    let last = &taxonomy.last_stage;
    if names.contains(last) {
        let order = declared_order(stages, last)?;
        let highest = orders.last().copied().ok_or(CheckError::NoValidOrders)?;
        results.push(if order == highest {
            CheckResult::success(
                "Stage Sequence",
                format!("'{last}' stage is correctly positioned as the last stage"),
            )
        } else {
            CheckResult::failed(
                "Stage Sequence",
                format!("'{last}' stage must be the last stage (highest order number)"),
            )
        });
    }

    Ok(())
}

/// Stage names must be text; a missing or null name is empty.
fn stage_name(value: Option<&Value>) -> Result<String> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(name)) => Ok(name.clone()),
        Some(other) => Err(CheckError::NotText {
            field: "Stage name",
            value: other.to_string(),
        }),
    }
}

/// Order of the first stage declared with `name`.
fn declared_order(stages: &[Value], name: &str) -> Result<i64> {
    stages
        .iter()
        .find(|stage| stage.get("Name").and_then(Value::as_str) == Some(name))
        .and_then(|stage| stage.get("Order"))
        .and_then(WireValue::from_json)
        .and_then(|order| order.as_int())
        .ok_or_else(|| CheckError::StageOrder {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(json: &str) -> Vec<CheckResult> {
        validate_stages(Some(json), "Brief", &Taxonomy::default())
    }

    #[test]
    fn minimal_valid_list_is_all_success() {
        let results = run(r#"[{"Name":"Initiate","Order":0},{"Name":"Closed","Order":1}]"#);
        assert!(results.iter().all(|r| r.status == Status::Success));
        assert_eq!(results.len(), 8);
    }

    #[test]
    fn missing_payload_short_circuits() {
        let results = validate_stages(None, "Brief", &Taxonomy::default());
        assert_eq!(results, vec![CheckResult::failed("Stages", "Stages data is required")]);
        assert_eq!(run("{}")[0].message, "Stages must be a list");
        assert_eq!(run("[]")[0].message, "At least one stage is required");
        assert_eq!(run("[{")[0].field, "Stages JSON");
    }

    #[test]
    fn name_rules_are_mutually_exclusive() {
        let long = "x".repeat(51);
        let json = format!(
            r#"[{{"Name":"Initiate","Order":0}},{{"Name":"Initiate","Order":1}},{{"Name":"{long}","Order":2}},{{"Name":"","Order":3}},{{"Name":"Closed","Order":4}}]"#
        );
        let results = run(&json);
        let failures: Vec<&str> = results
            .iter()
            .filter(|r| r.status == Status::Failed)
            .map(|r| r.message.as_str())
            .collect();
        assert_eq!(
            failures,
            vec![
                "Duplicate stage name",
                "Stage name exceeds maximum length of 50 characters",
                "Stage name is required",
            ]
        );
    }

    #[test]
    fn order_rules() {
        let results = run(
            r#"[{"Name":"Initiate","Order":0},{"Name":"Review","Order":"x"},{"Name":"Hold","Order":-1},{"Name":"Check","Order":0},{"Name":"Closed","Order":"5"}]"#,
        );
        let messages: Vec<&str> = results
            .iter()
            .filter(|r| r.field.ends_with("Order"))
            .map(|r| r.message.as_str())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Stage order 0 is valid",
                "Stage order must be a valid integer",
                "Stage order must be a non-negative number",
                "Duplicate order number: 0",
                "Stage order 5 is valid",
            ]
        );
    }

    #[test]
    fn sequence_positions_are_checked() {
        let results = run(
            r#"[{"Name":"Review","Order":0},{"Name":"Initiate","Order":1},{"Name":"Closed","Order":2}]"#,
        );
        let sequence: Vec<(&Status, &str)> = results
            .iter()
            .filter(|r| r.field == "Stage Sequence")
            .map(|r| (&r.status, r.message.as_str()))
            .collect();
        assert_eq!(
            sequence,
            vec![
                (
                    &Status::Failed,
                    "'Initiate' stage must be the first stage (lowest order number)"
                ),
                (
                    &Status::Success,
                    "'Closed' stage is correctly positioned as the last stage"
                ),
            ]
        );
    }

    #[test]
    fn missing_required_stage_fails() {
        let results = run(r#"[{"Name":"Initiate","Order":0}]"#);
        assert!(results.contains(&CheckResult::failed(
            "Required Stages",
            "Required stage 'Closed' is missing"
        )));
    }

    #[test]
    fn internal_errors_are_appended() {
        let results = run(r#"[{"Name":"Initiate","Order":0}, 3]"#);
        let last = results.last().unwrap();
        assert_eq!(last.status, Status::Error);
        assert_eq!(last.message, "Error validating stages: stage 1 is not an object");
        assert_eq!(results[0].status, Status::Success);
    }

    #[test]
    fn unparseable_bookend_order_is_an_error() {
        let results = run(r#"[{"Name":"Initiate","Order":null},{"Name":"Closed","Order":1}]"#);
        let last = results.last().unwrap();
        assert_eq!(last.status, Status::Error);
        assert!(last.message.contains("'Initiate'"));
    }
}
