//! Flattened field export records.

use rts_model::{FieldTypeCode, SysCategory};
use serde::{Deserialize, Serialize};

/// CSV header for field exports, in the same order as the JSON keys.
pub const FIELD_COLUMNS: [&str; 16] = [
    "PartitionKey",
    "RowKey",
    "DisplayName",
    "Description",
    "FieldType",
    "FiledType",
    "IsActive",
    "IsRequired",
    "IsNotRequiredOnCreation",
    "NotEditable",
    "Order",
    "ShowInHeader",
    "WizardPosition",
    "DataSourceName",
    "SysCategory",
    "Stages",
];

/// One field or role row of the external table.
///
/// `FiledType` always repeats `FieldType`; older readers only know the
/// misspelt column. Roles carry `Stages` and none of the field-only
/// columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldExportRecord {
    pub partition_key: String,
    pub row_key: String,
    pub display_name: String,
    pub description: String,
    pub field_type: FieldTypeCode,
    pub filed_type: FieldTypeCode,
    pub is_active: bool,
    pub is_required: bool,
    pub is_not_required_on_creation: bool,
    pub not_editable: bool,
    pub order: i64,
    pub show_in_header: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wizard_position: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sys_category: Option<SysCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<String>,
}

impl FieldExportRecord {
    /// Cells in [`FIELD_COLUMNS`] order; absent columns are empty.
    pub fn csv_row(&self) -> Vec<String> {
        vec![
            self.partition_key.clone(),
            self.row_key.clone(),
            self.display_name.clone(),
            self.description.clone(),
            self.field_type.code().to_string(),
            self.filed_type.code().to_string(),
            self.is_active.to_string(),
            self.is_required.to_string(),
            self.is_not_required_on_creation.to_string(),
            self.not_editable.to_string(),
            self.order.to_string(),
            self.show_in_header.to_string(),
            self.wizard_position
                .map(|position| position.to_string())
                .unwrap_or_default(),
            self.data_source_name.clone().unwrap_or_default(),
            self.sys_category
                .map(|category| category.as_str().to_string())
                .unwrap_or_default(),
            self.stages.clone().unwrap_or_default(),
        ]
    }

    pub fn is_role(&self) -> bool {
        self.stages.is_some()
    }
}
