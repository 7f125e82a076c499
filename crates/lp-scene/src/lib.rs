//! `lp-scene` — per-scene records and the split-wide scene store.
//!
//! # Crate layout
//!
//! | Module        | Contents                                               |
//! |---------------|--------------------------------------------------------|
//! | [`record`]    | `RawSceneRecord`, `RawLaneGraph`, `SceneRecord`        |
//! | [`collector`] | `collect_scene` (wide → cache-width conversion)        |
//! | [`store`]     | `SceneStore`                                           |
//! | [`error`]     | `SceneError`, `SceneResult<T>`                         |

pub mod collector;
pub mod error;
pub mod record;
pub mod store;

#[cfg(test)]
mod tests;

pub use collector::collect_scene;
pub use error::{SceneError, SceneResult};
pub use record::{RawLaneGraph, RawSceneRecord, SceneRecord};
pub use store::SceneStore;
