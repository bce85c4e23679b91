//! Validation result records and reports.

use serde::{Deserialize, Serialize};

use crate::status::Status;

/// Outcome of one rule check on one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Label of the checked field or rule (e.g. `"Unique Key"`).
    pub field: String,
    pub status: Status,
    pub message: String,
}

impl CheckResult {
    pub fn new(field: impl Into<String>, status: Status, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            status,
            message: message.into(),
        }
    }

    pub fn success(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, Status::Success, message)
    }

    pub fn failed(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, Status::Failed, message)
    }

    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, Status::Error, message)
    }

    pub fn info(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, Status::Info, message)
    }

    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, Status::Warning, message)
    }
}

/// Results for one record type or field row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityResult {
    pub record: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<String>,
    pub details: Vec<CheckResult>,
}

impl EntityResult {
    /// Build an entity result, deriving its status from the details.
    pub fn from_details(record: impl Into<String>, details: Vec<CheckResult>) -> Self {
        Self {
            record: record.into(),
            display_name: None,
            status: entity_status(&details),
            is_active: None,
            partition_key: None,
            details,
        }
    }

    pub fn with_display_name(mut self, display_name: Option<String>) -> Self {
        self.display_name = display_name;
        self
    }

    pub fn with_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    pub fn with_partition_key(mut self, partition_key: impl Into<String>) -> Self {
        self.partition_key = Some(partition_key.into());
        self
    }

    /// Only a `FAILED` entity is unsuccessful.
    pub fn is_successful(&self) -> bool {
        self.status != Status::Failed
    }
}

/// Entity status: any `FAILED` detail makes the entity `FAILED`. Entities
/// with only `INFO` details were skipped. `ERROR` details do not change the
/// verdict.
pub fn entity_status(details: &[CheckResult]) -> Status {
    if details.iter().any(|detail| detail.status == Status::Failed) {
        Status::Failed
    } else if !details.is_empty() && details.iter().all(|detail| detail.status == Status::Info) {
        Status::Info
    } else {
        Status::Success
    }
}

/// Results for a whole upload file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub overall_success: bool,
    pub results: Vec<EntityResult>,
}

impl BatchReport {
    pub fn from_results(results: Vec<EntityResult>) -> Self {
        Self {
            overall_success: results.iter().all(EntityResult::is_successful),
            results,
        }
    }

    /// Report for a file that could not be processed at all. The file's
    /// single entity is `ERROR` and the batch is unsuccessful.
    pub fn file_error(record: &str, field: &str, message: impl Into<String>) -> Self {
        let mut result =
            EntityResult::from_details(record, vec![CheckResult::error(field, message)]);
        result.status = Status::Error;
        Self {
            overall_success: false,
            results: vec![result],
        }
    }

    pub fn stats(&self) -> ValidationStats {
        ValidationStats::from_results(&self.results)
    }
}

/// Combined result of validating a record type file and a record field file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReport {
    pub overall_success: bool,
    pub record_types: BatchReport,
    pub record_fields: BatchReport,
}

impl UploadReport {
    pub fn new(record_types: BatchReport, record_fields: BatchReport) -> Self {
        Self {
            overall_success: record_types.overall_success && record_fields.overall_success,
            record_types,
            record_fields,
        }
    }

    pub fn stats(&self) -> ValidationStats {
        let mut stats = self.record_types.stats();
        stats.merge(&self.record_fields.stats());
        stats
    }
}

/// Counts for summaries: entity statuses plus `INFO`/`WARNING` details.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub success: usize,
    pub failed: usize,
    pub error: usize,
    pub info: usize,
    pub warning: usize,
}

impl ValidationStats {
    pub fn from_results(results: &[EntityResult]) -> Self {
        let mut stats = Self::default();
        for result in results {
            stats.add(result.status);
            for detail in &result.details {
                if matches!(detail.status, Status::Info | Status::Warning) {
                    stats.add(detail.status);
                }
            }
        }
        stats
    }

    fn add(&mut self, status: Status) {
        match status {
            Status::Success => self.success += 1,
            Status::Failed => self.failed += 1,
            Status::Error => self.error += 1,
            Status::Info => self.info += 1,
            Status::Warning => self.warning += 1,
        }
    }

    pub fn merge(&mut self, other: &ValidationStats) {
        self.success += other.success;
        self.failed += other.failed;
        self.error += other.error;
        self.info += other.info;
        self.warning += other.warning;
    }

    pub fn get(&self, status: Status) -> usize {
        match status {
            Status::Success => self.success,
            Status::Failed => self.failed,
            Status::Error => self.error,
            Status::Info => self.info,
            Status::Warning => self.warning,
        }
    }
}
