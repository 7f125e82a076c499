//! Scene-subsystem error type.

use thiserror::Error;

use lp_core::SceneId;
use lp_graph::GraphError;

/// Errors produced when collecting scenes or mutating the store.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A graph topology id does not fit the 16-bit cache width.  The cache
    /// format caps scenes at 32k lanes/nodes; hitting this means the format
    /// needs widening, not that the value should be truncated.
    #[error("graph id {value} exceeds the 16-bit cache range")]
    IdOverflow { value: i64 },

    #[error("invalid lane topology: {0}")]
    InvalidLaneTopology(#[from] GraphError),

    #[error("scene {0} already present in store")]
    DuplicateScene(SceneId),

    #[error("scene {0} not found in store")]
    SceneNotFound(SceneId),
}

pub type SceneResult<T> = Result<T, SceneError>;
