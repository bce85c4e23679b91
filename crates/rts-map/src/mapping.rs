//! Configurable internal-to-external name dictionaries.

use std::collections::BTreeMap;

use rts_model::{RawRow, WireValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Internal semantic field names.
pub mod names {
    pub const NAME: &str = "name";
    pub const PREFIX: &str = "prefix";
    pub const DESCRIPTION: &str = "description";
    pub const CATEGORY: &str = "category";
    pub const COLOUR: &str = "colour";
    pub const ORDER: &str = "order";
    pub const IS_ENABLED: &str = "is_enabled";
    pub const ENABLE_CORRESPONDENCE: &str = "enable_correspondence";
    pub const STAGES_JSON: &str = "stages_json";

    pub const PARTITION_KEY: &str = "partition_key";
    pub const DISPLAY_NAME: &str = "display_name";
    pub const FIELD_TYPE: &str = "field_type";
    pub const LEGACY_FIELD_TYPE: &str = "legacy_field_type";
    pub const IS_ACTIVE: &str = "is_active";
    pub const IS_MANDATORY: &str = "is_mandatory";
    pub const NOT_REQUIRED_ON_CREATE: &str = "not_required_on_create";
    pub const NOT_EDITABLE: &str = "not_editable";
    pub const SHOW_IN_HEADER: &str = "show_in_header";
    pub const WIZARD_POSITION: &str = "wizard_position";
    pub const TERM_SET: &str = "term_set";
    pub const STAGE: &str = "stage";
    pub const SYS_CATEGORY: &str = "sys_category";
}

/// Fields coerced to booleans by [`FieldMapping::map_row`].
pub const BOOLEAN_FIELDS: [&str; 5] = [
    names::IS_ENABLED,
    names::ENABLE_CORRESPONDENCE,
    names::IS_ACTIVE,
    names::IS_MANDATORY,
    names::SHOW_IN_HEADER,
];

/// A row re-keyed by internal names. Missing columns map to `None`.
pub type MappedRow = BTreeMap<String, Option<WireValue>>;

/// Dictionary from internal field name to external wire column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping {
    entries: BTreeMap<String, String>,
}

fn dictionary(pairs: &[(&str, &str)]) -> FieldMapping {
    FieldMapping {
        entries: pairs
            .iter()
            .map(|(internal, external)| ((*internal).to_string(), (*external).to_string()))
            .collect(),
    }
}

impl FieldMapping {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Built-in record type dictionary.
    pub fn record_types() -> Self {
        dictionary(&[
            (names::NAME, "RowKey"),
            (names::PREFIX, "Prefix"),
            (names::DESCRIPTION, "Description"),
            (names::CATEGORY, "Category"),
            (names::COLOUR, "Color"),
            (names::ORDER, "Order"),
            (names::IS_ENABLED, "IsActive"),
            (names::ENABLE_CORRESPONDENCE, "IsCorrespondenceType"),
            (names::STAGES_JSON, "StagesJson"),
        ])
    }

    /// Built-in record field dictionary.
    pub fn record_fields() -> Self {
        dictionary(&[
            (names::PARTITION_KEY, "PartitionKey"),
            (names::NAME, "RowKey"),
            (names::DISPLAY_NAME, "DisplayName"),
            (names::FIELD_TYPE, "FieldType"),
            (names::LEGACY_FIELD_TYPE, "FiledType"),
            (names::DESCRIPTION, "Description"),
            (names::ORDER, "Order"),
            (names::IS_ACTIVE, "IsActive"),
            (names::IS_MANDATORY, "IsRequired"),
            (names::NOT_REQUIRED_ON_CREATE, "IsNotRequiredOnCreation"),
            (names::NOT_EDITABLE, "NotEditable"),
            (names::STAGE, "Stages"),
            (names::SHOW_IN_HEADER, "ShowInHeader"),
            (names::WIZARD_POSITION, "WizardPosition"),
            (names::TERM_SET, "DataSourceName"),
            (names::SYS_CATEGORY, "SysCategory"),
        ])
    }

    /// Replace or add entries; other entries keep their current column.
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Self {
        for (internal, external) in overrides {
            self.entries.insert(internal.clone(), external.clone());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(internal, external)| (internal.as_str(), external.as_str()))
    }

    /// External column for an internal name.
    pub fn external(&self, internal: &str) -> Option<&str> {
        self.entries.get(internal).map(String::as_str)
    }

    /// Internal name for an external column.
    pub fn internal(&self, external: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, column)| column.as_str() == external)
            .map(|(internal, _)| internal.as_str())
    }

    /// Raw value of an internal field in a wire row. `null` counts as absent.
    pub fn lookup(&self, row: &RawRow, internal: &str) -> Option<WireValue> {
        self.external(internal)
            .and_then(|column| row.get(column))
            .and_then(WireValue::from_json)
    }

    /// Re-key a wire row by internal names, coercing flags and filling
    /// defaults. Never fails; unknown columns are ignored.
    pub fn map_row(&self, row: &RawRow) -> MappedRow {
        self.entries
            .keys()
            .map(|internal| {
                let value = self.lookup(row, internal);
                let value = if BOOLEAN_FIELDS.contains(&internal.as_str()) {
                    Some(WireValue::Bool(value.as_ref().is_some_and(WireValue::is_true)))
                } else {
                    value.or_else(|| default_value(internal))
                };
                (internal.clone(), value)
            })
            .collect()
    }

    /// Re-key internal values to wire columns, keeping the given order.
    /// Names without an entry are dropped.
    pub fn to_external<'a, I>(&self, values: I) -> RawRow
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let mut row = RawRow::new();
        for (internal, value) in values {
            match self.external(internal) {
                Some(column) => {
                    row.insert(column.to_string(), value);
                }
                None => tracing::debug!(field = internal, "no external column for field"),
            }
        }
        row
    }
}

fn default_value(internal: &str) -> Option<WireValue> {
    match internal {
        names::DESCRIPTION => Some(WireValue::text("")),
        names::COLOUR => Some(WireValue::text("#000000")),
        names::ORDER => Some(WireValue::Integer(0)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn row(value: Value) -> RawRow {
        match value {
            Value::Object(map) => map,
            _ => RawRow::new(),
        }
    }

    #[test]
    fn lookup_is_bidirectional() {
        let mapping = FieldMapping::record_fields();
        assert_eq!(mapping.external(names::TERM_SET), Some("DataSourceName"));
        assert_eq!(mapping.internal("FiledType"), Some(names::LEGACY_FIELD_TYPE));
        assert_eq!(mapping.internal("Nope"), None);
    }

    #[test]
    fn flags_are_coerced_and_default_false() {
        let mapping = FieldMapping::record_types();
        let mapped = mapping.map_row(&row(json!({"RowKey": "Brief", "IsActive": "TRUE"})));
        assert_eq!(mapped[names::IS_ENABLED], Some(WireValue::Bool(true)));
        assert_eq!(mapped[names::ENABLE_CORRESPONDENCE], Some(WireValue::Bool(false)));
        assert_eq!(mapped[names::DESCRIPTION], Some(WireValue::text("")));
        assert_eq!(mapped[names::COLOUR], Some(WireValue::text("#000000")));
        assert_eq!(mapped[names::ORDER], Some(WireValue::Integer(0)));
        assert_eq!(mapped[names::PREFIX], None);
    }

    #[test]
    fn overrides_replace_columns() {
        let overrides = [("colour".to_string(), "Colour".to_string())]
            .into_iter()
            .collect();
        let mapping = FieldMapping::record_types().with_overrides(&overrides);
        assert_eq!(mapping.external(names::COLOUR), Some("Colour"));
        assert_eq!(mapping.external(names::PREFIX), Some("Prefix"));
    }

    #[test]
    fn to_external_keeps_order_and_drops_unknown() {
        let mapping = FieldMapping::record_types();
        let external = mapping.to_external([
            (names::PREFIX, json!("BRF")),
            ("unknown", json!(1)),
            (names::NAME, json!("Brief")),
        ]);
        let keys: Vec<&str> = external.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Prefix", "RowKey"]);
    }
}
