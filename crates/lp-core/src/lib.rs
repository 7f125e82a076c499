//! `lp-core` — foundational types for the `lane_prep` preprocessing pipeline.
//!
//! This crate is a dependency of every other `lp-*` crate.  It intentionally
//! has no `lp-*` dependencies and a single external one (`serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                |
//! |------------|---------------------------------------------------------|
//! | [`ids`]    | `SceneId`                                               |
//! | [`point`]  | `Point2`, `Rot2` (map-frame 2-D geometry)               |
//! | [`config`] | `PreprocessConfig`, `DatasetConfig`, `KnnConfig`,       |
//!              | `DatasetKind`, `SplitMode`                              |

pub mod config;
pub mod ids;
pub mod point;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DatasetConfig, DatasetKind, KnnConfig, PreprocessConfig, SplitMode};
pub use ids::SceneId;
pub use point::{Point2, Rot2};
