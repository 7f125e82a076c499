//! The batch collector: loader-width records → cache-width records.
//!
//! Floating tensors pass through unchanged (`f32` end to end); every 64-bit
//! integer array under the graph key narrows to `i16`.  Narrowing is
//! checked — a lane id past the 16-bit range is an explicit error rather
//! than a wrapped value — and the narrowed graph is validated before it can
//! reach the connectivity engine.

use lp_graph::{LaneGraph, NeighborPairs};

use crate::record::{RawLaneGraph, RawSceneRecord, SceneRecord};
use crate::{SceneError, SceneResult};

/// Convert one raw scene into its cached form.
pub fn collect_scene(raw: RawSceneRecord) -> SceneResult<SceneRecord> {
    let graph = narrow_graph(raw.graph)?;
    graph.validate()?;

    Ok(SceneRecord {
        idx:       raw.idx,
        city:      raw.city,
        feats:     raw.feats,
        ctrs:      raw.ctrs,
        orig:      raw.orig,
        theta:     raw.theta,
        rot:       raw.rot,
        gt_preds:  raw.gt_preds,
        has_preds: raw.has_preds,
        graph,
    })
}

fn narrow_graph(raw: RawLaneGraph) -> SceneResult<LaneGraph> {
    Ok(LaneGraph {
        ctrs:        raw.ctrs,
        feats:       raw.feats,
        lane_idcs:   narrow_vec(raw.lane_idcs)?,
        pre_pairs:   narrow_pairs(raw.pre_pairs)?,
        suc_pairs:   narrow_pairs(raw.suc_pairs)?,
        left_pairs:  narrow_pairs(raw.left_pairs)?,
        right_pairs: narrow_pairs(raw.right_pairs)?,
        left:        NeighborPairs::default(),
        right:       NeighborPairs::default(),
    })
}

fn narrow(value: i64) -> SceneResult<i16> {
    i16::try_from(value).map_err(|_| SceneError::IdOverflow { value })
}

fn narrow_vec(values: Vec<i64>) -> SceneResult<Vec<i16>> {
    values.into_iter().map(narrow).collect()
}

fn narrow_pairs(pairs: Vec<[i64; 2]>) -> SceneResult<Vec<[i16; 2]>> {
    pairs
        .into_iter()
        .map(|[a, b]| Ok([narrow(a)?, narrow(b)?]))
        .collect()
}
