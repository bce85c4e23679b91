//! Normalised record type definitions.
//!
//! These are the entities the export direction starts from: one record type
//! with its stages, the core fields every record type carries, the custom
//! fields added for it, and the roles bound to its stages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ModelError;
use crate::field_type::FieldTypeCode;

fn default_true() -> bool {
    true
}

fn default_colour() -> String {
    "#000000".to_string()
}

/// A workflow step of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDef {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Order", alias = "order")]
    pub order: i64,
}

impl StageDef {
    pub fn new(name: impl Into<String>, order: i64) -> Self {
        Self {
            name: name.into(),
            order,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTypeDef {
    pub name: String,
    pub prefix: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_colour")]
    pub colour: String,
    pub category: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    #[serde(default)]
    pub enable_correspondence: bool,
    #[serde(default)]
    pub correspondence_mandatory: bool,
    #[serde(default)]
    pub stages: Vec<StageDef>,
}

impl RecordTypeDef {
    /// Stages sorted by order; ties keep their declared order.
    pub fn ordered_stages(&self) -> Vec<&StageDef> {
        let mut stages: Vec<&StageDef> = self.stages.iter().collect();
        stages.sort_by_key(|stage| stage.order);
        stages
    }

    /// Stage list as the `[{"Name", "Order"}]` JSON text stored on the wire.
    pub fn stages_json(&self) -> String {
        serde_json::to_string(&self.ordered_stages()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn stage(&self, name: &str) -> Option<&StageDef> {
        self.stages.iter().find(|stage| stage.name == name)
    }
}

/// Which family a field belongs to on export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SysCategory {
    Core,
    Custom,
}

impl SysCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SysCategory::Core => "core",
            SysCategory::Custom => "custom",
        }
    }
}

impl fmt::Display for SysCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SysCategory {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "core" => Ok(SysCategory::Core),
            "custom" => Ok(SysCategory::Custom),
            _ => Err(ModelError::UnknownSysCategory(s.to_string())),
        }
    }
}

/// Creation wizard page a field is shown on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum WizardPosition {
    #[default]
    RecordInformation,
    RecordResponse,
}

impl WizardPosition {
    pub fn index(self) -> i64 {
        match self {
            WizardPosition::RecordInformation => 0,
            WizardPosition::RecordResponse => 1,
        }
    }

    pub fn from_index(index: i64) -> Option<Self> {
        match index {
            0 => Some(WizardPosition::RecordInformation),
            1 => Some(WizardPosition::RecordResponse),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WizardPosition::RecordInformation => "Record Information",
            WizardPosition::RecordResponse => "Record Response",
        }
    }
}

impl TryFrom<i64> for WizardPosition {
    type Error = ModelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or(ModelError::InvalidWizardPosition(value))
    }
}

impl From<WizardPosition> for i64 {
    fn from(value: WizardPosition) -> Self {
        value.index()
    }
}

/// A system-defined field. Its type is stored by semantic name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreFieldDef {
    pub name: String,
    pub display_name: String,
    pub field_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_true")]
    pub is_mandatory: bool,
    #[serde(default = "default_true")]
    pub visible_on_create: bool,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub term_set: Option<String>,
}

impl CoreFieldDef {
    /// Numeric code for the semantic type; unknown names fall back to text.
    pub fn field_type_code(&self) -> FieldTypeCode {
        FieldTypeCode::from_semantic_name(&self.field_type).unwrap_or(FieldTypeCode::Text)
    }
}

/// A user-defined field attached to one record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomFieldDef {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(deserialize_with = "code_or_name")]
    pub field_type: FieldTypeCode,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub show_in_header: bool,
    #[serde(default)]
    pub is_mandatory: bool,
    #[serde(default = "default_true")]
    pub visible_on_create: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub term_set: String,
    #[serde(default)]
    pub wizard_position: WizardPosition,
}

/// Custom field types may be given as a code or a semantic name,
/// including the combobox aliases.
fn code_or_name<'de, D>(deserializer: D) -> Result<FieldTypeCode, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum CodeOrName {
        Code(i64),
        Name(String),
    }

    match CodeOrName::deserialize(deserializer)? {
        CodeOrName::Code(code) => FieldTypeCode::try_from(code).map_err(serde::de::Error::custom),
        CodeOrName::Name(name) => name.parse().map_err(serde::de::Error::custom),
    }
}

/// A participant slot bound to a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDef {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub description: String,
    pub stage: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_mandatory: bool,
    #[serde(default)]
    pub allow_multiple: bool,
}

impl RoleDef {
    /// Display name, falling back to the role name when empty.
    pub fn effective_display_name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.name
        } else {
            &self.display_name
        }
    }

    pub fn field_type(&self) -> FieldTypeCode {
        FieldTypeCode::for_role(self.allow_multiple)
    }
}

/// Borrowed view over either field family.
#[derive(Debug, Clone, Copy)]
pub enum FieldDef<'a> {
    Core(&'a CoreFieldDef),
    Custom(&'a CustomFieldDef),
}

impl<'a> FieldDef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            FieldDef::Core(field) => &field.name,
            FieldDef::Custom(field) => &field.name,
        }
    }

    pub fn field_type(&self) -> FieldTypeCode {
        match self {
            FieldDef::Core(field) => field.field_type_code(),
            FieldDef::Custom(field) => field.field_type,
        }
    }

    pub fn description(&self) -> &'a str {
        match self {
            FieldDef::Core(field) => field.description.as_deref().unwrap_or(""),
            FieldDef::Custom(field) => &field.description,
        }
    }

    pub fn term_set(&self) -> &'a str {
        match self {
            FieldDef::Core(field) => field.term_set.as_deref().unwrap_or(""),
            FieldDef::Custom(field) => &field.term_set,
        }
    }

    pub fn is_mandatory(&self) -> bool {
        match self {
            FieldDef::Core(field) => field.is_mandatory,
            FieldDef::Custom(field) => field.is_mandatory,
        }
    }

    pub fn visible_on_create(&self) -> bool {
        match self {
            FieldDef::Core(field) => field.visible_on_create,
            FieldDef::Custom(field) => field.visible_on_create,
        }
    }

    pub fn sys_category(&self) -> SysCategory {
        match self {
            FieldDef::Core(_) => SysCategory::Core,
            FieldDef::Custom(_) => SysCategory::Custom,
        }
    }
}

/// Everything exported for one record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTypeBundle {
    pub record_type: RecordTypeDef,
    #[serde(default)]
    pub core_fields: Vec<CoreFieldDef>,
    #[serde(default)]
    pub custom_fields: Vec<CustomFieldDef>,
    #[serde(default)]
    pub roles: Vec<RoleDef>,
}

impl RecordTypeBundle {
    /// Core fields followed by custom fields.
    pub fn fields(&self) -> impl Iterator<Item = FieldDef<'_>> {
        self.core_fields
            .iter()
            .map(FieldDef::Core)
            .chain(self.custom_fields.iter().map(FieldDef::Custom))
    }
}
