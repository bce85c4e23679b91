//! Wire row shapes.
//!
//! Uploaded rows arrive as loosely typed JSON objects keyed by the external
//! PascalCase names. They are turned into [`FieldRow`] and
//! [`RecordTypeInput`] once, at the mapping boundary, so the validators work
//! on typed optional fields instead of repeated key lookups.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A raw uploaded row: external column name to JSON value, in column order.
pub type RawRow = serde_json::Map<String, Value>;

/// A single cell value as it arrived on the wire.
///
/// Numbers and booleans may arrive natively (JSON uploads) or as text
/// (CSV uploads); the accessors accept both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    Bool(bool),
    Integer(i64),
    Number(f64),
    Text(String),
    Json(Value),
}

impl WireValue {
    /// Convert a JSON value, mapping `null` to `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(flag) => Some(WireValue::Bool(*flag)),
            Value::Number(number) => Some(match number.as_i64() {
                Some(int) => WireValue::Integer(int),
                None => WireValue::Number(number.as_f64().unwrap_or(f64::NAN)),
            }),
            Value::String(text) => Some(WireValue::Text(text.clone())),
            other => Some(WireValue::Json(other.clone())),
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        WireValue::Text(value.into())
    }

    /// Borrow the value when it is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            WireValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Canonical text form, used for display and for loose equality.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Case-insensitive `"true"` check shared by every boolean flag.
    pub fn is_true(&self) -> bool {
        match self {
            WireValue::Bool(flag) => *flag,
            WireValue::Text(text) => text.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// Integer interpretation. Text is trimmed, finite floats truncate,
    /// booleans count as 0/1; anything else is not an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            WireValue::Bool(flag) => Some(i64::from(*flag)),
            WireValue::Integer(int) => Some(*int),
            WireValue::Number(number) if number.is_finite() => Some(number.trunc() as i64),
            WireValue::Number(_) => None,
            WireValue::Text(text) => text.trim().parse::<i64>().ok(),
            WireValue::Json(_) => None,
        }
    }

    /// Falsy values: `false`, zero, empty text, empty arrays and objects.
    pub fn is_blank(&self) -> bool {
        match self {
            WireValue::Bool(flag) => !flag,
            WireValue::Integer(int) => *int == 0,
            WireValue::Number(number) => *number == 0.0,
            WireValue::Text(text) => text.is_empty(),
            WireValue::Json(Value::Array(items)) => items.is_empty(),
            WireValue::Json(Value::Object(map)) => map.is_empty(),
            WireValue::Json(_) => false,
        }
    }

    /// Placeholder values spreadsheets emit for missing numbers.
    pub fn is_nan_like(&self) -> bool {
        match self {
            WireValue::Number(number) => number.is_nan(),
            WireValue::Text(text) => matches!(
                text.trim().to_lowercase().as_str(),
                "" | "nan" | "none" | "null"
            ),
            _ => false,
        }
    }

    /// Character count of textual values.
    pub fn char_len(&self) -> Option<usize> {
        self.as_text().map(|text| text.chars().count())
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireValue::Bool(flag) => write!(f, "{flag}"),
            WireValue::Integer(int) => write!(f, "{int}"),
            WireValue::Number(number) => write!(f, "{number}"),
            WireValue::Text(text) => f.write_str(text),
            WireValue::Json(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        WireValue::Text(value.to_string())
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        WireValue::Text(value)
    }
}

impl From<i64> for WireValue {
    fn from(value: i64) -> Self {
        WireValue::Integer(value)
    }
}

impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        WireValue::Bool(value)
    }
}

/// Returns the value when it is present and not blank.
pub fn non_empty(value: Option<&WireValue>) -> Option<&WireValue> {
    value.filter(|value| !value.is_blank())
}

/// Row key reported for field rows without one.
pub const UNKNOWN_FIELD: &str = "Unknown Field";

/// A record field or role row in wire form.
///
/// Every column is optional; absence and `null` are the same thing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldRow {
    pub partition_key: Option<WireValue>,
    pub row_key: Option<WireValue>,
    pub display_name: Option<WireValue>,
    pub description: Option<WireValue>,
    pub field_type: Option<WireValue>,
    pub filed_type: Option<WireValue>,
    pub is_active: Option<WireValue>,
    pub is_required: Option<WireValue>,
    pub is_not_required_on_creation: Option<WireValue>,
    pub not_editable: Option<WireValue>,
    pub order: Option<WireValue>,
    pub show_in_header: Option<WireValue>,
    pub wizard_position: Option<WireValue>,
    pub data_source_name: Option<WireValue>,
    pub stages: Option<WireValue>,
    pub sys_category: Option<WireValue>,
}

impl FieldRow {
    /// Row key text, or `"Unknown Field"` when absent.
    pub fn name(&self) -> String {
        self.row_key
            .as_ref()
            .map_or_else(|| UNKNOWN_FIELD.to_string(), WireValue::to_text)
    }

    /// Partition key text, empty when absent.
    pub fn partition(&self) -> String {
        self.partition_key
            .as_ref()
            .map(WireValue::to_text)
            .unwrap_or_default()
    }

    /// Rows are active unless the flag says otherwise.
    pub fn active(&self) -> bool {
        self.is_active.as_ref().is_none_or(WireValue::is_true)
    }

    /// `NotEditable` flag, false when absent.
    pub fn read_only(&self) -> bool {
        self.not_editable.as_ref().is_some_and(WireValue::is_true)
    }

    pub fn required(&self) -> bool {
        self.is_required.as_ref().is_some_and(WireValue::is_true)
    }

    pub fn optional_on_creation(&self) -> bool {
        self.is_not_required_on_creation
            .as_ref()
            .is_some_and(WireValue::is_true)
    }

    /// Key used for cross-row uniqueness, compared on canonical text.
    pub fn key(&self) -> (Option<String>, Option<String>) {
        (
            self.partition_key.as_ref().map(WireValue::to_text),
            self.row_key.as_ref().map(WireValue::to_text),
        )
    }
}

/// A record type row after the mapping layer has applied defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTypeInput {
    pub name: Option<WireValue>,
    pub prefix: Option<WireValue>,
    pub description: WireValue,
    pub category: Option<WireValue>,
    pub colour: WireValue,
    pub order: WireValue,
    pub is_enabled: bool,
    pub enable_correspondence: bool,
    /// Stage list as JSON text, when the row carries one.
    pub stages_json: Option<String>,
}

impl Default for RecordTypeInput {
    fn default() -> Self {
        Self {
            name: None,
            prefix: None,
            description: WireValue::text(""),
            category: None,
            colour: WireValue::text("#000000"),
            order: WireValue::Integer(0),
            is_enabled: false,
            enable_correspondence: false,
            stages_json: None,
        }
    }
}

impl RecordTypeInput {
    /// Name text for reports; empty when absent.
    pub fn display_name(&self) -> String {
        self.name
            .as_ref()
            .map(WireValue::to_text)
            .unwrap_or_default()
    }
}
