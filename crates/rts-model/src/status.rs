//! Result status vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Outcome of a single check or of a whole entity.
///
/// Only `Failed` decides the pass/fail verdict. `Error` marks a check that
/// could not run; `Info` and `Warning` are observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Success,
    Failed,
    Error,
    Info,
    Warning,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Success,
        Status::Failed,
        Status::Error,
        Status::Info,
        Status::Warning,
    ];

    /// Wire label, always uppercase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Success => "SUCCESS",
            Status::Failed => "FAILED",
            Status::Error => "ERROR",
            Status::Info => "INFO",
            Status::Warning => "WARNING",
        }
    }

    /// Parse a status label case-insensitively.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "SUCCESS" => Some(Status::Success),
            "FAILED" => Some(Status::Failed),
            "ERROR" => Some(Status::Error),
            "INFO" => Some(Status::Info),
            "WARNING" => Some(Status::Warning),
            _ => None,
        }
    }

    /// True for statuses listed as issues in reports.
    pub fn is_problem(&self) -> bool {
        matches!(self, Status::Failed | Status::Error)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::parse(s).ok_or_else(|| ModelError::UnknownStatus(s.to_string()))
    }
}
