//! Dataset-loader error type.

use thiserror::Error;

/// Errors produced while reading raw traces.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("trace parse error: {0}")]
    Parse(String),

    #[error("scene has no forecast target track")]
    MissingTarget,

    #[error("forecast target has fewer than 2 observed steps")]
    TargetIncomplete,
}

impl From<csv::Error> for DatasetError {
    fn from(e: csv::Error) -> Self {
        DatasetError::Parse(e.to_string())
    }
}

pub type DatasetResult<T> = Result<T, DatasetError>;
