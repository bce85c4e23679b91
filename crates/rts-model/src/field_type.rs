//! Canonical field type code table.
//!
//! Every field and role carries an integer code between 1 and 10 on the
//! wire. Core fields store the semantic name instead (`dropdown_single`,
//! `multi_user`, ...) and custom fields additionally accept the
//! `combobox_*` aliases; both resolve through this single table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Field type code as stored in the `FieldType` wire column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum FieldTypeCode {
    Text,
    SingleSelect,
    MultiSelect,
    SingleUser,
    Date,
    Time,
    DateTime,
    MultiUser,
    TextArea,
    Radio,
}

impl FieldTypeCode {
    pub const ALL: [FieldTypeCode; 10] = [
        FieldTypeCode::Text,
        FieldTypeCode::SingleSelect,
        FieldTypeCode::MultiSelect,
        FieldTypeCode::SingleUser,
        FieldTypeCode::Date,
        FieldTypeCode::Time,
        FieldTypeCode::DateTime,
        FieldTypeCode::MultiUser,
        FieldTypeCode::TextArea,
        FieldTypeCode::Radio,
    ];

    /// Numeric wire code.
    pub fn code(self) -> i64 {
        match self {
            FieldTypeCode::Text => 1,
            FieldTypeCode::SingleSelect => 2,
            FieldTypeCode::MultiSelect => 3,
            FieldTypeCode::SingleUser => 4,
            FieldTypeCode::Date => 5,
            FieldTypeCode::Time => 6,
            FieldTypeCode::DateTime => 7,
            FieldTypeCode::MultiUser => 8,
            FieldTypeCode::TextArea => 9,
            FieldTypeCode::Radio => 10,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }

    /// Human label used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            FieldTypeCode::Text => "text input",
            FieldTypeCode::SingleSelect => "single select dropdown",
            FieldTypeCode::MultiSelect => "multi select dropdown",
            FieldTypeCode::SingleUser => "single user role",
            FieldTypeCode::Date => "date only",
            FieldTypeCode::Time => "time only",
            FieldTypeCode::DateTime => "date and time",
            FieldTypeCode::MultiUser => "multi user role",
            FieldTypeCode::TextArea => "text area",
            FieldTypeCode::Radio => "radio",
        }
    }

    /// Semantic name stored on core field definitions.
    pub fn semantic_name(self) -> &'static str {
        match self {
            FieldTypeCode::Text => "text",
            FieldTypeCode::SingleSelect => "dropdown_single",
            FieldTypeCode::MultiSelect => "dropdown_multi",
            FieldTypeCode::SingleUser => "single_user",
            FieldTypeCode::Date => "date",
            FieldTypeCode::Time => "time",
            FieldTypeCode::DateTime => "datetime",
            FieldTypeCode::MultiUser => "multi_user",
            FieldTypeCode::TextArea => "textarea",
            FieldTypeCode::Radio => "radio",
        }
    }

    /// Resolve a core field semantic name. Core fields never use the
    /// combobox aliases, so those are rejected here.
    pub fn from_semantic_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.semantic_name() == normalized)
    }

    /// Resolve a custom field semantic name, accepting the combobox aliases.
    pub fn from_custom_semantic_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "combobox_single" => Some(FieldTypeCode::SingleSelect),
            "combobox_multi" => Some(FieldTypeCode::MultiSelect),
            other => Self::from_semantic_name(other),
        }
    }

    /// Select and radio types must name an external term set.
    pub fn requires_data_source(self) -> bool {
        matches!(
            self,
            FieldTypeCode::SingleSelect | FieldTypeCode::MultiSelect | FieldTypeCode::Radio
        )
    }

    /// Role types are user pickers shown on the roles page.
    pub fn is_role(self) -> bool {
        matches!(self, FieldTypeCode::SingleUser | FieldTypeCode::MultiUser)
    }

    /// Role field type for single or multi user roles.
    pub fn for_role(allow_multiple: bool) -> Self {
        if allow_multiple {
            FieldTypeCode::MultiUser
        } else {
            FieldTypeCode::SingleUser
        }
    }

    /// All valid codes, in order.
    pub fn valid_codes() -> Vec<i64> {
        Self::ALL.into_iter().map(Self::code).collect()
    }
}

impl fmt::Display for FieldTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<i64> for FieldTypeCode {
    type Error = ModelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::from_code(value).ok_or(ModelError::UnknownFieldType(value))
    }
}

impl From<FieldTypeCode> for i64 {
    fn from(value: FieldTypeCode) -> Self {
        value.code()
    }
}

impl FromStr for FieldTypeCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(code) = s.trim().parse::<i64>() {
            return Self::try_from(code);
        }
        Self::from_custom_semantic_name(s)
            .ok_or_else(|| ModelError::UnknownFieldTypeName(s.to_string()))
    }
}
