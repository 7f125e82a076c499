//! Vectorized-map parsers and raw lane-graph assembly.
//!
//! `lanes.csv` lists centerline points grouped by lane; `links.csv` lists
//! lane-level adjacency over the raw lane ids:
//!
//! ```csv
//! lane_id,x,y          relation,from_lane,to_lane
//! 17,0.0,0.0           left,17,23
//! 17,2.0,0.0           right,23,17
//! 23,0.0,3.0           suc,17,40
//! 23,2.0,3.0
//! ```
//!
//! Raw lane ids are remapped to dense 0-based per-scene indices in order of
//! first appearance, so the emitted `lane_idcs` array is sorted and dense
//! regardless of the map's own numbering.

use std::collections::HashMap;
use std::io::Read;

use serde::Deserialize;

use lp_core::{Point2, Rot2};
use lp_scene::RawLaneGraph;

use crate::{DatasetError, DatasetResult};

// ── Parsed rows ───────────────────────────────────────────────────────────────

/// One lane's ordered centerline points, as read from `lanes.csv`.
#[derive(Clone, Debug)]
pub struct LanePolyline {
    pub raw_id: i64,
    pub points: Vec<Point2>,
}

/// Lane-level adjacency kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LinkKind {
    Pre,
    Suc,
    Left,
    Right,
}

/// One `links.csv` row over raw lane ids.
#[derive(Clone, Debug)]
pub struct LaneLink {
    pub kind: LinkKind,
    pub from: i64,
    pub to:   i64,
}

#[derive(Deserialize)]
struct LaneRow {
    lane_id: i64,
    x:       f32,
    y:       f32,
}

#[derive(Deserialize)]
struct LinkRow {
    relation:  String,
    from_lane: i64,
    to_lane:   i64,
}

// ── Parsers ───────────────────────────────────────────────────────────────────

/// Parse `lanes.csv` from any `Read` source, grouping consecutive rows by
/// lane id.  A lane id reappearing after a different lane is a parse error
/// (it would break the dense grouping invariant downstream).
pub fn parse_lanes<R: Read>(reader: R) -> DatasetResult<Vec<LanePolyline>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut lanes: Vec<LanePolyline> = Vec::new();
    let mut seen: HashMap<i64, usize> = HashMap::new();

    for result in csv_reader.deserialize::<LaneRow>() {
        let row = result?;
        let point = Point2::new(row.x, row.y);
        match lanes.last_mut() {
            Some(last) if last.raw_id == row.lane_id => last.points.push(point),
            _ => {
                if seen.contains_key(&row.lane_id) {
                    return Err(DatasetError::Parse(format!(
                        "lane {} appears in more than one block",
                        row.lane_id
                    )));
                }
                seen.insert(row.lane_id, lanes.len());
                lanes.push(LanePolyline { raw_id: row.lane_id, points: vec![point] });
            }
        }
    }

    Ok(lanes)
}

/// Parse `links.csv` from any `Read` source.
pub fn parse_links<R: Read>(reader: R) -> DatasetResult<Vec<LaneLink>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut links = Vec::new();

    for result in csv_reader.deserialize::<LinkRow>() {
        let row = result?;
        let kind = match row.relation.as_str() {
            "pre" => LinkKind::Pre,
            "suc" => LinkKind::Suc,
            "left" => LinkKind::Left,
            "right" => LinkKind::Right,
            other => {
                return Err(DatasetError::Parse(format!(
                    "invalid relation {other:?}: expected pre, suc, left, or right"
                )));
            }
        };
        links.push(LaneLink { kind, from: row.from_lane, to: row.to_lane });
    }

    Ok(links)
}

// ── Graph assembly ────────────────────────────────────────────────────────────

/// Assemble the loader-width lane graph in the scene frame.
///
/// Centerline points are mapped through `rot · (p − orig)`; each pair of
/// consecutive points becomes one node (midpoint center, delta feature).
/// Link rows are rewritten onto the dense per-scene lane indices.
pub fn build_raw_graph(
    lanes: &[LanePolyline],
    links: &[LaneLink],
    orig:  Point2,
    rot:   Rot2,
) -> DatasetResult<RawLaneGraph> {
    let mut graph = RawLaneGraph::default();
    let mut dense: HashMap<i64, i64> = HashMap::with_capacity(lanes.len());

    for (idx, lane) in lanes.iter().enumerate() {
        if lane.points.len() < 2 {
            return Err(DatasetError::Parse(format!(
                "lane {} has fewer than 2 centerline points",
                lane.raw_id
            )));
        }
        dense.insert(lane.raw_id, idx as i64);

        let scene_pts: Vec<Point2> =
            lane.points.iter().map(|&p| rot.apply(p - orig)).collect();
        for pair in scene_pts.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            graph.ctrs.push(Point2::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5));
            graph.feats.push(b - a);
            graph.lane_idcs.push(idx as i64);
        }
    }

    for link in links {
        let (Some(&from), Some(&to)) = (dense.get(&link.from), dense.get(&link.to)) else {
            return Err(DatasetError::Parse(format!(
                "link references unknown lane ({} -> {})",
                link.from, link.to
            )));
        };
        let pair = [from, to];
        match link.kind {
            LinkKind::Pre => graph.pre_pairs.push(pair),
            LinkKind::Suc => graph.suc_pairs.push(pair),
            LinkKind::Left => graph.left_pairs.push(pair),
            LinkKind::Right => graph.right_pairs.push(pair),
        }
    }

    Ok(graph)
}
