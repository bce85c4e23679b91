//! Typed rows built from wire rows through a [`FieldMapping`].

use rts_model::{FieldRow, RawRow, RecordTypeInput, WireValue};

use crate::mapping::{FieldMapping, MappedRow, names};

fn take(mapped: &mut MappedRow, internal: &str) -> Option<WireValue> {
    mapped.remove(internal).flatten()
}

/// Map a record type row, applying flag coercion and defaults.
pub fn map_record_type(mapping: &FieldMapping, row: &RawRow) -> RecordTypeInput {
    let mut mapped = mapping.map_row(row);
    let defaults = RecordTypeInput::default();

    let input = RecordTypeInput {
        name: take(&mut mapped, names::NAME),
        prefix: take(&mut mapped, names::PREFIX),
        description: take(&mut mapped, names::DESCRIPTION).unwrap_or(defaults.description),
        category: take(&mut mapped, names::CATEGORY),
        colour: take(&mut mapped, names::COLOUR).unwrap_or(defaults.colour),
        order: take(&mut mapped, names::ORDER).unwrap_or(defaults.order),
        is_enabled: take(&mut mapped, names::IS_ENABLED).is_some_and(|flag| flag.is_true()),
        enable_correspondence: take(&mut mapped, names::ENABLE_CORRESPONDENCE)
            .is_some_and(|flag| flag.is_true()),
        stages_json: take(&mut mapped, names::STAGES_JSON).and_then(stages_text),
    };
    tracing::debug!(record = %input.display_name(), enabled = input.is_enabled, "mapped record type");
    input
}

/// Stage payloads usually arrive as JSON text; embedded arrays are
/// re-serialised. Blank payloads count as absent.
fn stages_text(value: WireValue) -> Option<String> {
    if value.is_blank() {
        return None;
    }
    Some(match value {
        WireValue::Text(text) => text,
        other => other.to_text(),
    })
}

/// Build a field row by renaming columns only. Flags keep their raw
/// values; the field validator applies its own defaults.
pub fn field_row(mapping: &FieldMapping, row: &RawRow) -> FieldRow {
    let get = |internal: &str| mapping.lookup(row, internal);
    FieldRow {
        partition_key: get(names::PARTITION_KEY),
        row_key: get(names::NAME),
        display_name: get(names::DISPLAY_NAME),
        description: get(names::DESCRIPTION),
        field_type: get(names::FIELD_TYPE),
        filed_type: get(names::LEGACY_FIELD_TYPE),
        is_active: get(names::IS_ACTIVE),
        is_required: get(names::IS_MANDATORY),
        is_not_required_on_creation: get(names::NOT_REQUIRED_ON_CREATE),
        not_editable: get(names::NOT_EDITABLE),
        order: get(names::ORDER),
        show_in_header: get(names::SHOW_IN_HEADER),
        wizard_position: get(names::WIZARD_POSITION),
        data_source_name: get(names::TERM_SET),
        stages: get(names::STAGE),
        sys_category: get(names::SYS_CATEGORY),
    }
}
