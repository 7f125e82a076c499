//! Archive error type.

use thiserror::Error;

use lp_scene::SceneError;

/// Errors produced while reading or writing a feature archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encode/decode error: {0}")]
    Codec(#[from] bincode::Error),

    #[error("not a lane-prep feature archive (or unsupported format version)")]
    FormatMismatch,

    #[error("corrupt archive: {0}")]
    Corrupt(#[from] SceneError),
}

pub type ArchiveResult<T> = Result<T, ArchiveError>;
