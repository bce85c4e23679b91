use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown field type code: {0}")]
    UnknownFieldType(i64),
    #[error("unknown field type name: {0}")]
    UnknownFieldTypeName(String),
    #[error("unknown status: {0}")]
    UnknownStatus(String),
    #[error("unknown system category: {0}")]
    UnknownSysCategory(String),
    #[error("invalid wizard position: {0}")]
    InvalidWizardPosition(i64),
}

pub type Result<T> = std::result::Result<T, ModelError>;
