//! Static lookup tables injected into validators and the exporter.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::field_type::FieldTypeCode;

/// Fixed vocabularies the pipeline consults.
///
/// `Taxonomy::default()` carries the built-in tables. Every field can be
/// overridden from configuration; omitted keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Taxonomy {
    /// Stage names every record type must contain.
    pub required_stages: Vec<String>,
    /// Stage that must carry the lowest order.
    pub first_stage: String,
    /// Stage that must carry the highest order. Roles cannot be bound to it.
    pub last_stage: String,
    pub stage_name_max_length: usize,
    /// Row keys ending with this suffix are dropped before field validation.
    pub ignored_row_key_suffix: String,
    /// Workflow state columns maintained by the external system.
    pub ignored_state_fields: BTreeSet<String>,
    /// Document library columns maintained by the external system.
    pub ignored_sp_fields: BTreeSet<String>,
    /// Fields attached to every record type.
    pub core_fields: BTreeSet<String>,
    /// Core fields that stay visible even when deactivated.
    pub system_mandatory_fields: BTreeSet<String>,
    /// Roles that must be filled on creation.
    pub always_required_roles: BTreeSet<String>,
    /// Core fields whose data source is fixed regardless of the stored term set.
    pub core_field_data_sources: BTreeMap<String, String>,
    /// Core fields whose field type is fixed.
    pub core_field_types: BTreeMap<String, FieldTypeCode>,
    /// Partition key used for exported record type rows.
    pub record_type_partition: String,
}

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

impl Default for Taxonomy {
    fn default() -> Self {
        let core_field_data_sources = [
            ("ABCRequestFrom", "Request From"),
            ("ABCTimeframe", "Timeframe"),
            ("ABCDecisionCategory", "Decision Category"),
        ]
        .into_iter()
        .map(|(field, source)| (field.to_string(), source.to_string()))
        .collect();

        let core_field_types = [
            ("Title", FieldTypeCode::Text),
            ("ABCTopicSummary", FieldTypeCode::Text),
            ("ABCRequestFrom", FieldTypeCode::Radio),
            ("ABCDateRequested", FieldTypeCode::Date),
            ("ABCTimeframe", FieldTypeCode::Radio),
            ("ABCDecisionCategory", FieldTypeCode::SingleSelect),
            ("ABCOrgLevel1", FieldTypeCode::Text),
            ("ABCOrgLevel2", FieldTypeCode::Text),
            ("ABCOrgLevel3", FieldTypeCode::Text),
            ("ABCOrgLevel4", FieldTypeCode::Text),
        ]
        .into_iter()
        .map(|(field, kind)| (field.to_string(), kind))
        .collect();

        Self {
            required_stages: vec!["Initiate".to_string(), "Closed".to_string()],
            first_stage: "Initiate".to_string(),
            last_stage: "Closed".to_string(),
            stage_name_max_length: 50,
            ignored_row_key_suffix: "_0".to_string(),
            ignored_state_fields: set(&[
                "ABCAssignedTo",
                "ABCAutoResponseTemplates",
                "ABCCancelled",
                "ABCClosedDate",
                "ABCCreatedByUser",
                "ABCDocumentOrdering",
                "ABCDueDateCurrentTask",
                "ABCLinkedAgendaId",
                "ABCLinkedMeetingId",
                "ABCModifiedByUser",
                "ABCNoFurtherAction",
                "ABCOnHold",
                "ABCOverrideDefaultAccess",
                "ABCRecommendations",
                "ABCRecordId",
                "ABCRelatedRecords",
                "ABCSignatureRequired",
                "ABCStage",
                "ABCStageName",
                "ABCSuperseded",
                "ABCSupersededBy",
                "ABCSupersededFrom",
                "ABCTaskMappings",
                "ABCTasks",
                "ABCViewAccessUsers",
                "ABCWithdrawn",
                "ContentType",
            ]),
            ignored_sp_fields: set(&[
                "DocumentSetDescription",
                "FileLeafRef",
                "FolderChildCount",
                "ItemChildCount",
            ]),
            core_fields: set(&[
                "Title",
                "ABCTopicSummary",
                "ABCRequestFrom",
                "ABCDateRequested",
                "ABCTimeframe",
                "ABCDecisionCategory",
                "ABCOrgLevel1",
                "ABCOrgLevel2",
                "ABCOrgLevel3",
                "ABCOrgLevel4",
            ]),
            system_mandatory_fields: set(&["Title", "ABCOrgLevel1", "ABCOrgLevel2"]),
            always_required_roles: set(&["ABCInitiator", "ABCDecisionMaker"]),
            core_field_data_sources,
            core_field_types,
            record_type_partition: "V1".to_string(),
        }
    }
}

impl Taxonomy {
    /// True when a field row must be dropped before validation.
    pub fn is_ignored_row_key(&self, row_key: &str) -> bool {
        (!self.ignored_row_key_suffix.is_empty() && row_key.ends_with(&self.ignored_row_key_suffix))
            || self.ignored_state_fields.contains(row_key)
            || self.ignored_sp_fields.contains(row_key)
    }

    /// True when a record type row must be dropped before validation.
    pub fn is_ignored_record_type(&self, row_key: &str) -> bool {
        self.ignored_state_fields.contains(row_key) || self.ignored_sp_fields.contains(row_key)
    }

    pub fn is_core_field(&self, name: &str) -> bool {
        self.core_fields.contains(name)
    }

    pub fn is_system_mandatory(&self, name: &str) -> bool {
        self.system_mandatory_fields.contains(name)
    }

    pub fn is_always_required_role(&self, name: &str) -> bool {
        self.always_required_roles.contains(name)
    }

    /// Fixed data source for a core field, if any.
    pub fn core_data_source(&self, name: &str) -> Option<&str> {
        self.core_field_data_sources.get(name).map(String::as_str)
    }

    /// Pinned field type for a core field, if any.
    pub fn pinned_field_type(&self, name: &str) -> Option<FieldTypeCode> {
        self.core_field_types.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_and_sets_are_ignored() {
        let taxonomy = Taxonomy::default();
        assert!(taxonomy.is_ignored_row_key("ABCStage_0"));
        assert!(taxonomy.is_ignored_row_key("ABCTasks_0"));
        assert!(taxonomy.is_ignored_row_key("ABCAssignedTo"));
        assert!(taxonomy.is_ignored_row_key("FileLeafRef"));
        assert!(!taxonomy.is_ignored_row_key("Title"));
        assert!(!taxonomy.is_ignored_row_key("Budget_01"));
    }

    #[test]
    fn system_mandatory_fields_are_core() {
        let taxonomy = Taxonomy::default();
        assert_eq!(taxonomy.core_fields.len(), 10);
        assert!(
            taxonomy
                .system_mandatory_fields
                .iter()
                .all(|name| taxonomy.is_core_field(name))
        );
    }

    #[test]
    fn pinned_types_cover_every_core_field() {
        let taxonomy = Taxonomy::default();
        for name in &taxonomy.core_fields {
            assert!(taxonomy.pinned_field_type(name).is_some(), "{name}");
        }
        assert_eq!(
            taxonomy.pinned_field_type("ABCTimeframe"),
            Some(FieldTypeCode::Radio)
        );
        assert_eq!(taxonomy.core_data_source("ABCTimeframe"), Some("Timeframe"));
    }
}
