//! Cross-lane connectivity: nearest left/right neighbor per lane node.
//!
//! # Algorithm
//!
//! For one side (left shown; right mirrors the sign convention):
//!
//! 1. Build the lane-level boolean `left` matrix from the raw pair list and
//!    expand it one topological hop through predecessor and successor
//!    relations: `left' = (left·pre + left·suc + left) > 0`.  This captures
//!    left-of relationships that shift by one lane segment along the
//!    direction of travel.
//! 2. Broadcast `left'` to node granularity through each node's lane id;
//!    pairs whose lane-level relation is false get their distance forced to
//!    a large sentinel so they can never win the arg-min.
//! 3. With an angle cone configured, also force the sentinel on candidates
//!    whose bearing (direction from node to candidate, relative to the
//!    node's own heading) falls outside `(0, cross_angle)`.
//! 4. Per node, take the arg-min over its masked distance row (first
//!    minimal index on ties); keep it only when strictly under
//!    `cross_dist`.
//! 5. Drop pairs whose wrapped heading difference reaches `π/4` —
//!    nearest-distance matches pointing in very different directions (e.g.
//!    opposite-direction lanes) are not cross neighbors.
//!
//! Matrices are explicit dense `Vec`s over the scene's node/lane counts —
//! scene crops are small (hundreds of nodes), so the N² distance table and
//! the L³ boolean products stay cheap.
//!
//! The computation is fully deterministic for identical inputs; there is no
//! internal randomness and ties resolve by node index.

use std::f32::consts::{FRAC_PI_4, PI, TAU};

use serde::{Deserialize, Serialize};

use crate::graph::{LaneGraph, NeighborPairs};

/// Distance assigned to masked-out candidate pairs.  Any real candidate is
/// orders of magnitude closer, and the sentinel itself always fails the
/// `< cross_dist` acceptance test.
pub const SENTINEL_DIST: f32 = 1e6;

/// Resolved left/right neighbor pairs for one scene.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Connectivity {
    pub left:  NeighborPairs,
    pub right: NeighborPairs,
}

/// Which side of the lane a candidate must lie on.
#[derive(Copy, Clone)]
enum Side {
    Left,
    Right,
}

/// Compute nearest left/right cross-lane neighbors for every node.
///
/// `cross_dist` is the maximum Euclidean distance for a candidate;
/// `cross_angle`, when set, restricts candidates to a directional cone on
/// the matching side of the node's heading.
///
/// Empty `left_pairs`/`right_pairs` inputs produce empty result columns for
/// that side — a scene without mapped left/right relations is normal, not
/// an error.  The graph is expected to satisfy [`LaneGraph::validate`];
/// the collector in `lp-scene` enforces that before any scene reaches this
/// engine.
pub fn compute_connectivity(
    graph:       &LaneGraph,
    cross_dist:  f32,
    cross_angle: Option<f32>,
) -> Connectivity {
    let n = graph.node_count();
    if n == 0 {
        return Connectivity::default();
    }
    let lanes = graph.lane_count();

    // ── Shared tables: pairwise distances, headings, pre/suc matrices ─────
    let mut dist = vec![0.0f32; n * n];
    for i in 0..n {
        for j in 0..n {
            dist[i * n + j] = graph.ctrs[i].dist(graph.ctrs[j]);
        }
    }

    let theta: Vec<f32> = graph.feats.iter().map(|f| f.heading()).collect();

    let pre = lane_matrix(&graph.pre_pairs, lanes);
    let suc = lane_matrix(&graph.suc_pairs, lanes);

    let left = resolve_side(
        graph, &dist, &theta, &pre, &suc,
        &graph.left_pairs, cross_dist, cross_angle, Side::Left,
    );
    let right = resolve_side(
        graph, &dist, &theta, &pre, &suc,
        &graph.right_pairs, cross_dist, cross_angle, Side::Right,
    );

    Connectivity { left, right }
}

// ── Per-side resolution ───────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn resolve_side(
    graph:       &LaneGraph,
    dist:        &[f32],
    theta:       &[f32],
    pre:         &[bool],
    suc:         &[bool],
    pairs:       &[[i16; 2]],
    cross_dist:  f32,
    cross_angle: Option<f32>,
    side:        Side,
) -> NeighborPairs {
    if pairs.is_empty() {
        return NeighborPairs::default();
    }

    let n = graph.node_count();
    let lanes = graph.lane_count();
    let mat = expand_one_hop(&lane_matrix(pairs, lanes), pre, suc, lanes);

    // ── Mask the distance table ───────────────────────────────────────────
    let mut masked = dist.to_vec();
    for i in 0..n {
        let li = graph.lane_idcs[i] as usize;
        for j in 0..n {
            let lj = graph.lane_idcs[j] as usize;
            if !mat[li * lanes + lj] {
                masked[i * n + j] = SENTINEL_DIST;
            }
        }
    }

    if let Some(max_angle) = cross_angle {
        for i in 0..n {
            for j in 0..n {
                let d = graph.ctrs[j] - graph.ctrs[i];
                let mut dt = d.heading() - theta[i];
                if dt > TAU {
                    dt -= TAU;
                } else if dt < -TAU {
                    dt += TAU;
                }
                let inside = match side {
                    Side::Left => dt > 0.0 && dt < max_angle,
                    Side::Right => dt < 0.0 && dt > -max_angle,
                };
                if !inside {
                    masked[i * n + j] = SENTINEL_DIST;
                }
            }
        }
    }

    // ── Arg-min per row + heading-consistency filter ──────────────────────
    let mut out = NeighborPairs::default();
    for i in 0..n {
        let row = &masked[i * n..(i + 1) * n];
        let mut best = 0usize;
        for (j, &d) in row.iter().enumerate() {
            if d < row[best] {
                best = j;
            }
        }
        if row[best] >= cross_dist {
            continue;
        }

        // Wrapped absolute heading difference in [0, π].
        let mut dt = (theta[i] - theta[best]).abs();
        if dt > PI {
            dt = (dt - TAU).abs();
        }
        if dt < FRAC_PI_4 {
            out.u.push(i as i16);
            out.v.push(best as i16);
        }
    }
    out
}

// ── Lane-level boolean matrices ───────────────────────────────────────────────

/// Dense `lanes × lanes` boolean matrix with `true` at every listed pair.
fn lane_matrix(pairs: &[[i16; 2]], lanes: usize) -> Vec<bool> {
    let mut mat = vec![false; lanes * lanes];
    for &[a, b] in pairs {
        mat[a as usize * lanes + b as usize] = true;
    }
    mat
}

/// `(mat·pre + mat·suc + mat) > 0` over boolean semantics: `out[i][j]` holds
/// when `mat[i][j]` holds directly, or `mat[i][k]` holds for some lane `k`
/// that is a predecessor or successor link to `j`.
fn expand_one_hop(mat: &[bool], pre: &[bool], suc: &[bool], lanes: usize) -> Vec<bool> {
    let mut out = vec![false; lanes * lanes];
    for i in 0..lanes {
        for j in 0..lanes {
            if mat[i * lanes + j] {
                out[i * lanes + j] = true;
                continue;
            }
            for k in 0..lanes {
                if mat[i * lanes + k] && (pre[k * lanes + j] || suc[k * lanes + j]) {
                    out[i * lanes + j] = true;
                    break;
                }
            }
        }
    }
    out
}
