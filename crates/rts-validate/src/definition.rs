//! Invariants of normalised definitions, checked before export.

use std::sync::LazyLock;

use regex::Regex;
use rts_model::{CheckResult, EntityResult, FieldDef, RecordTypeBundle, RoleDef, Taxonomy};

use crate::checks::display::FIELD_DESCRIPTION_MAX_LENGTH;
use crate::stage::validate_stages;

static TERM_SET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\s]*$").expect("Invalid term set regex"));

/// Check a record type bundle: its stages, every field and every role.
pub fn validate_bundle(bundle: &RecordTypeBundle, taxonomy: &Taxonomy) -> EntityResult {
    let record_type = &bundle.record_type;
    let mut details = validate_stages(
        Some(&record_type.stages_json()),
        &record_type.name,
        taxonomy,
    );

    for field in bundle.fields() {
        details.extend(field_checks(field, taxonomy));
    }
    for role in &bundle.roles {
        details.extend(role_checks(role, bundle, taxonomy));
    }

    let result = EntityResult::from_details(record_type.name.clone(), details)
        .with_active(record_type.is_enabled);
    tracing::debug!(
        record = %record_type.name,
        status = %result.status,
        fields = bundle.core_fields.len() + bundle.custom_fields.len(),
        roles = bundle.roles.len(),
        "checked definition"
    );
    result
}

fn field_checks(field: FieldDef<'_>, taxonomy: &Taxonomy) -> Vec<CheckResult> {
    let label = format!("Field '{}'", field.name());
    let mut results = Vec::new();

    if field.is_mandatory() && !field.visible_on_create() {
        results.push(CheckResult::failed(
            &label,
            "Mandatory fields must be visible on creation wizard",
        ));
    }

    // Pinned core data sources are supplied on export.
    let term_set = field.term_set();
    let pinned_source = taxonomy.core_data_source(field.name()).is_some();
    if field.field_type().requires_data_source() && term_set.is_empty() && !pinned_source {
        results.push(CheckResult::failed(
            &label,
            "Term Set is required for this field type",
        ));
    }
    if !TERM_SET_REGEX.is_match(term_set) {
        results.push(CheckResult::failed(
            &label,
            "Term Set can only contain alphanumeric characters and spaces",
        ));
    }

    if field.description().chars().count() > FIELD_DESCRIPTION_MAX_LENGTH {
        results.push(CheckResult::failed(
            &label,
            format!("Description must be {FIELD_DESCRIPTION_MAX_LENGTH} characters or less"),
        ));
    }

    if let FieldDef::Core(core) = field
        && let Some(pinned) = taxonomy.pinned_field_type(&core.name)
        && pinned != core.field_type_code()
    {
        results.push(CheckResult::warning(
            &label,
            format!(
                "Core field type '{}' is exported as {} ({})",
                core.field_type,
                pinned.code(),
                pinned.label()
            ),
        ));
    }

    results
}

fn role_checks(role: &RoleDef, bundle: &RecordTypeBundle, taxonomy: &Taxonomy) -> Vec<CheckResult> {
    let label = format!("Role '{}'", role.name);
    if role.stage == taxonomy.last_stage {
        vec![CheckResult::failed(
            label,
            format!("Roles cannot be assigned to the {} stage.", taxonomy.last_stage),
        )]
    } else if bundle.record_type.stage(&role.stage).is_none() {
        vec![CheckResult::failed(
            label,
            format!(
                "Stage '{}' does not exist on record type '{}'",
                role.stage, bundle.record_type.name
            ),
        )]
    } else {
        Vec::new()
    }
}
