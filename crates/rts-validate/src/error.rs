use thiserror::Error;

/// Internal failure while running a check.
///
/// Never escapes the crate: each validator turns it into an `ERROR`
/// result at its entity boundary.
#[derive(Debug, Error)]
pub(crate) enum CheckError {
    #[error("{field} must be text, got {value}")]
    NotText { field: &'static str, value: String },

    #[error("stage {index} is not an object")]
    StageNotObject { index: usize },

    #[error("stage '{name}' does not have an integer order")]
    StageOrder { name: String },

    #[error("no valid stage orders to compare against")]
    NoValidOrders,

    #[error("row index {0} is out of range")]
    RowOutOfRange(usize),
}

pub(crate) type Result<T> = std::result::Result<T, CheckError>;
