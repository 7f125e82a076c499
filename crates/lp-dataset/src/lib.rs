//! `lp-dataset` — raw driving-trace loaders.
//!
//! A dataset split is a directory with one subdirectory per scene, named by
//! the scene's integer id:
//!
//! ```text
//! train/
//!   0/
//!     tracks.csv   agent trajectories (Argoverse or Summit column set)
//!     lanes.csv    lane centerline points: lane_id,x,y
//!     links.csv    lane-level adjacency: relation,from_lane,to_lane
//!   1/
//!   ...
//! ```
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`scan`]   | `ScenePath`, `scan_split` (runtime split-size discovery)  |
//! | [`tracks`] | `Track`, per-flavor trajectory parsers                    |
//! | [`map`]    | lane/link parsers, `build_raw_graph`                      |
//! | [`scene`]  | `load_scene` (one scene directory → `RawSceneRecord`)     |
//! | [`error`]  | `DatasetError`, `DatasetResult<T>`                        |

pub mod error;
pub mod map;
pub mod scan;
pub mod scene;
pub mod tracks;


pub use error::{DatasetError, DatasetResult};
pub use map::{build_raw_graph, parse_lanes, parse_links, LaneLink, LanePolyline, LinkKind};
pub use scan::{scan_split, ScenePath};
pub use scene::load_scene;
pub use tracks::{parse_argoverse_tracks, parse_summit_tracks, Track, TrackRole};
