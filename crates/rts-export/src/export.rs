//! Normalised definitions to flattened export rows.

use rts_map::{FieldMapping, names};
use rts_model::{
    CoreFieldDef, CustomFieldDef, RawRow, RecordTypeBundle, RecordTypeDef, RoleDef, SysCategory,
    Taxonomy, WizardPosition,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::record::FieldExportRecord;

/// How the record type `RowKey` is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKeyStyle {
    /// The record type name.
    #[default]
    Name,
    /// `"name (prefix)"`. Deprecated; kept for stores populated by older exports.
    NameWithPrefix,
}

impl RowKeyStyle {
    pub fn row_key(self, record_type: &RecordTypeDef) -> String {
        match self {
            RowKeyStyle::Name => record_type.name.clone(),
            RowKeyStyle::NameWithPrefix => {
                format!("{} ({})", record_type.name, record_type.prefix)
            }
        }
    }
}

/// Export one record type as a wire row keyed by `mapping`'s columns.
pub fn export_record_type(
    record_type: &RecordTypeDef,
    mapping: &FieldMapping,
    style: RowKeyStyle,
    taxonomy: &Taxonomy,
) -> RawRow {
    let mut row = RawRow::new();
    row.insert(
        "PartitionKey".to_string(),
        Value::String(taxonomy.record_type_partition.clone()),
    );
    row.extend(mapping.to_external([
        (names::NAME, json!(style.row_key(record_type))),
        (names::CATEGORY, json!(record_type.category)),
        (names::COLOUR, json!(record_type.colour)),
        (names::IS_ENABLED, json!(record_type.is_enabled)),
        (names::ENABLE_CORRESPONDENCE, json!(record_type.enable_correspondence)),
        (names::ORDER, json!(record_type.order)),
        (names::PREFIX, json!(record_type.prefix)),
        (names::STAGES_JSON, json!(record_type.stages_json())),
    ]));
    tracing::debug!(
        record = %record_type.name,
        stages = record_type.stages.len(),
        "exported record type"
    );
    row
}

/// Export every core field, custom field and role of a bundle, in that
/// order.
pub fn export_record_fields(bundle: &RecordTypeBundle, taxonomy: &Taxonomy) -> Vec<FieldExportRecord> {
    let partition = &bundle.record_type.name;
    let mut records: Vec<FieldExportRecord> = Vec::new();
    records.extend(
        bundle
            .core_fields
            .iter()
            .map(|field| core_record(partition, field, taxonomy)),
    );
    records.extend(
        bundle
            .custom_fields
            .iter()
            .map(|field| custom_record(partition, field)),
    );
    records.extend(
        bundle
            .roles
            .iter()
            .map(|role| role_record(partition, role, taxonomy)),
    );

    tracing::info!(
        record = %partition,
        core = bundle.core_fields.len(),
        custom = bundle.custom_fields.len(),
        roles = bundle.roles.len(),
        "exported record fields"
    );
    records
}

/// Core fields use their pinned type and data source when the taxonomy
/// has one. They are never read-only unless inactive.
fn core_record(partition: &str, field: &CoreFieldDef, taxonomy: &Taxonomy) -> FieldExportRecord {
    let field_type = taxonomy
        .pinned_field_type(&field.name)
        .unwrap_or_else(|| field.field_type_code());
    let data_source = taxonomy
        .core_data_source(&field.name)
        .map(str::to_string)
        .or_else(|| field.term_set.clone())
        .unwrap_or_default();

    FieldExportRecord {
        partition_key: partition.to_string(),
        row_key: field.name.clone(),
        display_name: field.display_name.clone(),
        description: field.description.clone().unwrap_or_default(),
        field_type,
        filed_type: field_type,
        is_active: field.is_active,
        is_required: field.is_mandatory,
        is_not_required_on_creation: !field.visible_on_create,
        not_editable: !field.is_active,
        order: field.order,
        show_in_header: false,
        wizard_position: Some(WizardPosition::RecordInformation.index()),
        data_source_name: Some(data_source),
        sys_category: Some(SysCategory::Core),
        stages: None,
    }
}

/// Custom fields only carry a term set when their type needs one.
fn custom_record(partition: &str, field: &CustomFieldDef) -> FieldExportRecord {
    let data_source = if field.field_type.requires_data_source() {
        field.term_set.clone()
    } else {
        String::new()
    };

    FieldExportRecord {
        partition_key: partition.to_string(),
        row_key: field.name.clone(),
        display_name: field.display_name.clone(),
        description: field.description.clone(),
        field_type: field.field_type,
        filed_type: field.field_type,
        is_active: field.is_active,
        is_required: field.is_mandatory,
        is_not_required_on_creation: !field.visible_on_create,
        not_editable: !field.is_active,
        order: field.order,
        show_in_header: field.show_in_header,
        wizard_position: Some(field.wizard_position.index()),
        data_source_name: Some(data_source),
        sys_category: Some(SysCategory::Custom),
        stages: None,
    }
}

fn role_record(partition: &str, role: &RoleDef, taxonomy: &Taxonomy) -> FieldExportRecord {
    let field_type = role.field_type();
    FieldExportRecord {
        partition_key: partition.to_string(),
        row_key: role.name.clone(),
        display_name: role.effective_display_name().to_string(),
        description: role.description.clone(),
        field_type,
        filed_type: field_type,
        is_active: role.is_active,
        is_required: role.is_mandatory,
        is_not_required_on_creation: !taxonomy.is_always_required_role(&role.name),
        not_editable: false,
        order: role.order,
        show_in_header: false,
        wizard_position: None,
        data_source_name: None,
        sys_category: None,
        stages: Some(role.stage.clone()),
    }
}
