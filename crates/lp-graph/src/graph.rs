//! Lane-graph representation and builder.
//!
//! # Data layout
//!
//! One scene's HD-map crop is a set of lane *nodes* — discretized centerline
//! segments — stored as flat parallel arrays indexed by node:
//!
//! - `ctrs[n]`: segment midpoint,
//! - `feats[n]`: segment delta vector (direction + length),
//! - `lane_idcs[n]`: owning lane.
//!
//! Nodes are grouped by lane and lanes are numbered densely from 0 in
//! insertion order, so `lane_idcs` is sorted non-decreasing and the lane
//! count is `lane_idcs.last() + 1`.  Lane-level topology (`pre`/`suc`/
//! `left`/`right`) lives in pair lists over those dense lane ids.
//!
//! All ids are `i16` — the width the feature cache stores.  Scene crops stay
//! in the hundreds of nodes, far below the 32k ceiling; widening past that
//! is a cache-format change, not a silent cast (see `lp-scene`'s collector).

use serde::{Deserialize, Serialize};

use lp_core::Point2;

use crate::{GraphError, GraphResult};

// ── NeighborPairs ─────────────────────────────────────────────────────────────

/// A set of directed node pairs `(u, v)`: node `u`'s nearest valid cross
/// neighbor is node `v`.  Stored as parallel columns, the layout the
/// downstream graph convolutions consume.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NeighborPairs {
    pub u: Vec<i16>,
    pub v: Vec<i16>,
}

impl NeighborPairs {
    pub fn len(&self) -> usize {
        self.u.len()
    }

    pub fn is_empty(&self) -> bool {
        self.u.is_empty()
    }

    /// Iterator over `(u, v)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (i16, i16)> + '_ {
        self.u.iter().copied().zip(self.v.iter().copied())
    }
}

// ── LaneGraph ─────────────────────────────────────────────────────────────────

/// One scene's lane graph: node arrays, lane-level topology pairs, and
/// (after the connectivity engine runs) resolved left/right neighbor pairs.
///
/// All fields are `pub`; construct via [`LaneGraphBuilder`] or deserialize
/// from the cache, then [`validate`](Self::validate) before feeding the
/// connectivity engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LaneGraph {
    /// Node segment midpoints.
    pub ctrs: Vec<Point2>,

    /// Node segment delta vectors (direction features).
    pub feats: Vec<Point2>,

    /// Owning lane of each node, sorted non-decreasing.
    pub lane_idcs: Vec<i16>,

    /// Lane-level predecessor pairs `(lane, its predecessor)`.
    pub pre_pairs: Vec<[i16; 2]>,

    /// Lane-level successor pairs `(lane, its successor)`.
    pub suc_pairs: Vec<[i16; 2]>,

    /// Raw, unresolved left-of relationships from the map.
    pub left_pairs: Vec<[i16; 2]>,

    /// Raw, unresolved right-of relationships from the map.
    pub right_pairs: Vec<[i16; 2]>,

    /// Resolved nearest left cross-lane neighbors.  Empty until the
    /// connectivity engine's result is merged in.
    pub left: NeighborPairs,

    /// Resolved nearest right cross-lane neighbors.
    pub right: NeighborPairs,
}

impl LaneGraph {
    pub fn node_count(&self) -> usize {
        self.lane_idcs.len()
    }

    /// Number of lanes, derived from the last (= largest) lane id.
    pub fn lane_count(&self) -> usize {
        match self.lane_idcs.last() {
            Some(&last) => last as usize + 1,
            None => 0,
        }
    }

    /// Check the structural invariants the connectivity engine relies on.
    ///
    /// - `ctrs`, `feats`, and `lane_idcs` have equal length;
    /// - lane ids start at 0 and advance by at most one (dense range);
    /// - every topology pair references a lane in `0..lane_count`.
    pub fn validate(&self) -> GraphResult<()> {
        let n = self.lane_idcs.len();
        if self.ctrs.len() != n {
            return Err(GraphError::LengthMismatch { what: "ctrs", got: self.ctrs.len(), expected: n });
        }
        if self.feats.len() != n {
            return Err(GraphError::LengthMismatch { what: "feats", got: self.feats.len(), expected: n });
        }

        let mut prev: i16 = -1;
        for (node, &lane) in self.lane_idcs.iter().enumerate() {
            if lane < 0 || lane < prev || lane > prev + 1 {
                return Err(GraphError::NonDenseLaneIds { node, lane, prev });
            }
            prev = lane;
        }

        let lanes = self.lane_count();
        for (list, pairs) in [
            ("pre_pairs", &self.pre_pairs),
            ("suc_pairs", &self.suc_pairs),
            ("left_pairs", &self.left_pairs),
            ("right_pairs", &self.right_pairs),
        ] {
            for &[a, b] in pairs.iter() {
                if a < 0 || b < 0 || a as usize >= lanes || b as usize >= lanes {
                    return Err(GraphError::PairOutOfRange { list, a, b, lanes });
                }
            }
        }

        Ok(())
    }
}

// ── LaneGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`LaneGraph`] incrementally, then call [`build`](Self::build).
///
/// Lanes are appended as centerline polylines; each pair of consecutive
/// points becomes one node (midpoint center, delta feature).  Lane-level
/// links reference the dense lane indices returned by
/// [`add_lane`](Self::add_lane).
///
/// # Example
///
/// ```
/// use lp_core::Point2;
/// use lp_graph::LaneGraphBuilder;
///
/// let mut b = LaneGraphBuilder::new();
/// let inner = b.add_lane(&[Point2::new(0.0, 0.0), Point2::new(4.0, 0.0)]).unwrap();
/// let outer = b.add_lane(&[Point2::new(0.0, 3.0), Point2::new(4.0, 3.0)]).unwrap();
/// b.add_left(inner, outer);
/// b.add_right(outer, inner);
/// let graph = b.build().unwrap();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.lane_count(), 2);
/// ```
#[derive(Default)]
pub struct LaneGraphBuilder {
    ctrs:        Vec<Point2>,
    feats:       Vec<Point2>,
    lane_idcs:   Vec<i16>,
    lanes:       usize,
    pre_pairs:   Vec<[i16; 2]>,
    suc_pairs:   Vec<[i16; 2]>,
    left_pairs:  Vec<[i16; 2]>,
    right_pairs: Vec<[i16; 2]>,
}

impl LaneGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a lane from its centerline and return its dense lane index.
    ///
    /// A centerline of `k` points yields `k - 1` nodes; fewer than 2 points
    /// would yield a node-less lane and break the dense-range invariant, so
    /// it is rejected here.
    pub fn add_lane(&mut self, centerline: &[Point2]) -> GraphResult<usize> {
        if centerline.len() < 2 {
            return Err(GraphError::DegenerateLane { got: centerline.len() });
        }
        let lane = self.lanes;
        for pair in centerline.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            self.ctrs.push(Point2::new((a.x + b.x) * 0.5, (a.y + b.y) * 0.5));
            self.feats.push(b - a);
            self.lane_idcs.push(lane as i16);
        }
        self.lanes += 1;
        Ok(lane)
    }

    /// Record that `pre` is a predecessor lane of `lane`.
    pub fn add_pre(&mut self, lane: usize, pre: usize) {
        self.pre_pairs.push([lane as i16, pre as i16]);
    }

    /// Record that `suc` is a successor lane of `lane`.
    pub fn add_suc(&mut self, lane: usize, suc: usize) {
        self.suc_pairs.push([lane as i16, suc as i16]);
    }

    /// Record that `left` lies to the left of `lane`.
    pub fn add_left(&mut self, lane: usize, left: usize) {
        self.left_pairs.push([lane as i16, left as i16]);
    }

    /// Record that `right` lies to the right of `lane`.
    pub fn add_right(&mut self, lane: usize, right: usize) {
        self.right_pairs.push([lane as i16, right as i16]);
    }

    pub fn node_count(&self) -> usize {
        self.lane_idcs.len()
    }

    pub fn lane_count(&self) -> usize {
        self.lanes
    }

    /// Consume the builder and produce a validated [`LaneGraph`].
    pub fn build(self) -> GraphResult<LaneGraph> {
        let graph = LaneGraph {
            ctrs:        self.ctrs,
            feats:       self.feats,
            lane_idcs:   self.lane_idcs,
            pre_pairs:   self.pre_pairs,
            suc_pairs:   self.suc_pairs,
            left_pairs:  self.left_pairs,
            right_pairs: self.right_pairs,
            left:        NeighborPairs::default(),
            right:       NeighborPairs::default(),
        };
        graph.validate()?;
        Ok(graph)
    }
}
