//! Scene record types.
//!
//! Two shapes of the same data:
//!
//! - `RawSceneRecord` is what the dataset loaders emit.  Graph topology ids
//!   are `i64` — the width they leave the parser at.
//! - `SceneRecord` is the cached form: topology narrowed to `i16` by the
//!   collector, everything else unchanged.
//!
//! Agent tensors follow the downstream forecaster's schema: per-agent
//! observed displacement features (Δx, Δy, valid-flag triples in the scene
//! frame), scene-frame final positions, and world-frame ground-truth
//! futures with presence masks.  The scene frame is defined by `orig`
//! (world position of the forecast target at the last observed step) and
//! `rot` (rotation aligning the target's final heading with +x).

use serde::{Deserialize, Serialize};

use lp_core::{Point2, Rot2, SceneId};
use lp_graph::LaneGraph;

// ── Raw (loader-width) types ──────────────────────────────────────────────────

/// Lane graph as emitted by a dataset loader, before narrowing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawLaneGraph {
    pub ctrs:        Vec<Point2>,
    pub feats:       Vec<Point2>,
    pub lane_idcs:   Vec<i64>,
    pub pre_pairs:   Vec<[i64; 2]>,
    pub suc_pairs:   Vec<[i64; 2]>,
    pub left_pairs:  Vec<[i64; 2]>,
    pub right_pairs: Vec<[i64; 2]>,
}

/// One scene as emitted by a dataset loader.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawSceneRecord {
    pub idx:       SceneId,
    pub city:      String,
    /// Per-agent observed step features: `(Δx, Δy, valid)` per step.
    pub feats:     Vec<Vec<[f32; 3]>>,
    /// Per-agent scene-frame position at the last observed step.
    pub ctrs:      Vec<Point2>,
    /// World-frame origin of the scene frame.
    pub orig:      Point2,
    /// World-frame heading of the forecast target at the last observed step.
    pub theta:     f32,
    /// Rotation from world frame into the scene frame.
    pub rot:       Rot2,
    /// Per-agent world-frame future positions (empty in test mode).
    pub gt_preds:  Vec<Vec<Point2>>,
    /// Per-agent per-future-step presence masks (empty in test mode).
    pub has_preds: Vec<Vec<bool>>,
    pub graph:     RawLaneGraph,
}

// ── Cached type ───────────────────────────────────────────────────────────────

/// One scene in cache width, as serialized into the feature archive.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneRecord {
    pub idx:       SceneId,
    pub city:      String,
    pub feats:     Vec<Vec<[f32; 3]>>,
    pub ctrs:      Vec<Point2>,
    pub orig:      Point2,
    pub theta:     f32,
    pub rot:       Rot2,
    pub gt_preds:  Vec<Vec<Point2>>,
    pub has_preds: Vec<Vec<bool>>,
    pub graph:     LaneGraph,
}

impl SceneRecord {
    /// Number of agent tracks in the scene.
    pub fn agent_count(&self) -> usize {
        self.ctrs.len()
    }
}
