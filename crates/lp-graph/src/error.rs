//! Lane-graph error type.

use thiserror::Error;

/// Errors produced by lane-graph validation and construction.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node array length mismatch: {what} has {got} entries, expected {expected}")]
    LengthMismatch {
        what:     &'static str,
        got:      usize,
        expected: usize,
    },

    #[error("lane ids do not form a dense 0-based range: node {node} has lane {lane} after lane {prev}")]
    NonDenseLaneIds { node: usize, lane: i16, prev: i16 },

    #[error("{list} pair ({a}, {b}) references a lane outside 0..{lanes}")]
    PairOutOfRange {
        list:  &'static str,
        a:     i16,
        b:     i16,
        lanes: usize,
    },

    #[error("lane centerline needs at least 2 points, got {got}")]
    DegenerateLane { got: usize },
}

pub type GraphResult<T> = Result<T, GraphError>;
