//! Pipeline error type.

use thiserror::Error;

use lp_archive::ArchiveError;
use lp_core::SceneId;
use lp_dataset::DatasetError;
use lp_scene::SceneError;

/// Errors that abort a preprocessing run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to scan split directory: {0}")]
    Scan(#[source] DatasetError),

    #[error("scene {id}: {source}")]
    Load {
        id:     SceneId,
        source: DatasetError,
    },

    #[error("scene {id}: {source}")]
    Collect {
        id:     SceneId,
        source: SceneError,
    },

    #[error("scene {id}: {source}")]
    Merge {
        id:     SceneId,
        source: SceneError,
    },

    #[error("failed to write archive: {0}")]
    Archive(#[from] ArchiveError),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

pub type PipelineResult<T> = Result<T, PipelineError>;
