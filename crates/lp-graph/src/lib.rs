//! `lp-graph` — lane-graph model and cross-lane connectivity.
//!
//! # Crate layout
//!
//! | Module           | Contents                                             |
//! |------------------|------------------------------------------------------|
//! | [`graph`]        | `LaneGraph`, `LaneGraphBuilder`, `NeighborPairs`     |
//! | [`connectivity`] | `compute_connectivity`, `Connectivity`               |
//! | [`error`]        | `GraphError`, `GraphResult<T>`                       |

pub mod connectivity;
pub mod error;
pub mod graph;


pub use connectivity::{compute_connectivity, Connectivity, SENTINEL_DIST};
pub use error::{GraphError, GraphResult};
pub use graph::{LaneGraph, LaneGraphBuilder, NeighborPairs};
