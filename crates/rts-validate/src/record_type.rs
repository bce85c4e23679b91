//! Record type validation.
//!
//! Unlike record fields, an internal error here is fail-fast: the partial
//! results are discarded and a single `ERROR` takes their place.

use std::sync::LazyLock;

use regex::Regex;
use rts_model::{CheckResult, RecordTypeInput, Taxonomy, WireValue};

use crate::error::{CheckError, Result};
use crate::record_field::SKIP_VALIDATION_MESSAGE;
use crate::stage::validate_stages;

static CATEGORY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]{1,50}$").expect("Invalid category regex"));

pub const PREFIX_MAX_LENGTH: usize = 4;
pub const DESCRIPTION_MAX_LENGTH: usize = 250;

/// The other record types of the same upload, for strict uniqueness.
///
/// `current` is the position of the record under validation and is
/// excluded from the comparison.
#[derive(Debug, Clone, Copy)]
pub struct UniquenessScope<'a> {
    pub records: &'a [RecordTypeInput],
    pub current: usize,
}

impl UniquenessScope<'_> {
    fn others(&self) -> impl Iterator<Item = &RecordTypeInput> {
        self.records
            .iter()
            .enumerate()
            .filter(move |(index, _)| *index != self.current)
            .map(|(_, record)| record)
    }

    fn name_taken(&self, name: &str) -> bool {
        self.others()
            .any(|other| other.name.as_ref().map(WireValue::to_text).as_deref() == Some(name))
    }

    fn prefix_taken(&self, prefix: &str) -> bool {
        self.others()
            .any(|other| other.prefix.as_ref().map(WireValue::to_text).as_deref() == Some(prefix))
    }
}

/// Validate one mapped record type.
///
/// With a `scope`, name and prefix must also be unique within it.
pub fn validate_record_type(
    input: &RecordTypeInput,
    scope: Option<UniquenessScope<'_>>,
    taxonomy: &Taxonomy,
) -> Vec<CheckResult> {
    if !input.is_enabled {
        return vec![CheckResult::info("IsActive", SKIP_VALIDATION_MESSAGE)];
    }

    let name = input.display_name();
    match run_checks(input, scope.as_ref(), taxonomy) {
        Ok(results) => {
            tracing::info!(record = %name, checks = results.len(), "validated record type");
            results
        }
        Err(err) => {
            tracing::error!(record = %name, error = %err, "record type validation aborted");
            vec![CheckResult::error(
                "System",
                format!("Unexpected error validating RecordType: {err}"),
            )]
        }
    }
}

fn run_checks(
    input: &RecordTypeInput,
    scope: Option<&UniquenessScope<'_>>,
    taxonomy: &Taxonomy,
) -> Result<Vec<CheckResult>> {
    let mut results = Vec::new();
    let name = input
        .name
        .as_ref()
        .filter(|name| !name.is_blank())
        .map(WireValue::to_text);

    // Name
    results.push(match (&name, scope) {
        (None, _) => CheckResult::failed("Name", "Record type name is required"),
        (Some(name), Some(scope)) if scope.name_taken(name) => CheckResult::failed(
            "Name",
            format!("Record type with name '{name}' already exists"),
        ),
        (Some(_), Some(_)) => CheckResult::success("Name", "Name is valid and unique"),
        (Some(_), None) => CheckResult::success("Name", "Name is valid"),
    });

    // Prefix: required, length and uniqueness may all fire together
    let prefix = match input.prefix.as_ref().filter(|prefix| !prefix.is_blank()) {
        None => None,
        Some(prefix) => Some(text_of("Prefix", prefix)?),
    };
    let mut prefix_valid = true;
    match &prefix {
        None => {
            results.push(CheckResult::failed("Prefix", "Prefix is required"));
            prefix_valid = false;
        }
        Some(prefix) => {
            if prefix.chars().count() > PREFIX_MAX_LENGTH {
                results.push(CheckResult::failed(
                    "Prefix",
                    format!("Prefix must be {PREFIX_MAX_LENGTH} characters or less"),
                ));
                prefix_valid = false;
            }
            if scope.is_some_and(|scope| scope.prefix_taken(prefix)) {
                results.push(CheckResult::failed(
                    "Prefix",
                    format!("Record type with prefix '{prefix}' already exists"),
                ));
                prefix_valid = false;
            }
        }
    }
    if prefix_valid {
        results.push(CheckResult::success(
            "Prefix",
            if scope.is_some() {
                "Prefix is valid, unique, and correct length"
            } else {
                "Prefix is valid and correct length"
            },
        ));
    }

    // Description
    let description_len = input
        .description
        .char_len()
        .ok_or_else(|| CheckError::NotText {
            field: "Description",
            value: input.description.to_text(),
        })?;
    results.push(if description_len > DESCRIPTION_MAX_LENGTH {
        CheckResult::failed(
            "Description",
            format!("Description must be {DESCRIPTION_MAX_LENGTH} characters or less"),
        )
    } else {
        CheckResult::success("Description", "Description length is valid")
    });

    // Category
    match input.category.as_ref().filter(|category| !category.is_blank()) {
        None => results.push(CheckResult::failed("Category", "Category is required")),
        Some(category) => {
            let category = text_of("Category", category)?;
            results.push(if CATEGORY_REGEX.is_match(&category) {
                CheckResult::success("Category", "Category format is valid")
            } else {
                CheckResult::failed(
                    "Category",
                    "Category must contain only letters and spaces (max 50 characters)",
                )
            });
        }
    }

    // Order
    results.push(match input.order.as_int() {
        Some(_) => CheckResult::success("Order", "Order is a valid number"),
        None => CheckResult::failed("Order", "Order must be a valid number"),
    });

    if let Some(stages_json) = input.stages_json.as_deref() {
        results.extend(validate_stages(
            Some(stages_json),
            name.as_deref().unwrap_or_default(),
            taxonomy,
        ));
    }

    Ok(results)
}

fn text_of(field: &'static str, value: &WireValue) -> Result<String> {
    value
        .as_text()
        .map(str::to_string)
        .ok_or_else(|| CheckError::NotText {
            field,
            value: value.to_text(),
        })
}
