//! The forecaster itself.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use lp_core::{KnnConfig, Point2};
use lp_scene::SceneRecord;

// ── R-tree agent entry ────────────────────────────────────────────────────────

/// Entry stored in the social spatial index: an agent's scene-frame position
/// with its index into the scene's agent arrays.
#[derive(Clone)]
struct AgentEntry {
    point: [f32; 2],
    idx:   usize,
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── KnnForecaster ─────────────────────────────────────────────────────────────

/// Constant-displacement forecaster with optional social averaging.
pub struct KnnForecaster {
    config: KnnConfig,
}

impl KnnForecaster {
    pub fn new(config: KnnConfig) -> Self {
        Self { config }
    }

    /// Predict `pred_len` world-frame future positions for every agent in
    /// `scene`, in agent order.
    pub fn forecast(&self, scene: &SceneRecord) -> Vec<Vec<Point2>> {
        let n = scene.agent_count();
        if n == 0 {
            return Vec::new();
        }

        // Per-agent final observed displacement in the scene frame.
        let deltas: Vec<Point2> = (0..n).map(|i| last_delta(&scene.feats[i])).collect();

        // Social index over scene-frame positions, bulk-loaded once.
        let tree = if self.config.use_social && n > 1 {
            let entries: Vec<AgentEntry> = scene
                .ctrs
                .iter()
                .enumerate()
                .map(|(idx, c)| AgentEntry { point: [c.x, c.y], idx })
                .collect();
            Some(RTree::bulk_load(entries))
        } else {
            None
        };

        let inv = scene.rot.inverse();
        (0..n)
            .map(|i| {
                let step = self.step_for(i, &deltas, tree.as_ref(), scene.ctrs[i]);
                let mut pos = scene.ctrs[i];
                (0..self.config.pred_len)
                    .map(|_| {
                        pos = pos + step;
                        // Scene frame → world frame.
                        inv.apply(pos) + scene.orig
                    })
                    .collect()
            })
            .collect()
    }

    /// The per-step displacement used for agent `i`.
    fn step_for(
        &self,
        i:      usize,
        deltas: &[Point2],
        tree:   Option<&RTree<AgentEntry>>,
        at:     Point2,
    ) -> Point2 {
        if !self.config.use_delta {
            return Point2::default();
        }
        let own = deltas[i];
        let Some(tree) = tree else {
            return own;
        };

        // Average the agent's own delta with its n_neigh nearest neighbors'.
        let mut sum = own;
        let mut count = 1usize;
        for entry in tree
            .nearest_neighbor_iter(&[at.x, at.y])
            .filter(|e| e.idx != i)
            .take(self.config.n_neigh)
        {
            sum = sum + deltas[entry.idx];
            count += 1;
        }
        Point2::new(sum.x / count as f32, sum.y / count as f32)
    }
}

/// Final valid `(Δx, Δy)` from an agent's observed feature rows, zero when
/// the track has no valid displacement.
fn last_delta(feats: &[[f32; 3]]) -> Point2 {
    feats
        .iter()
        .rev()
        .find(|f| f[2] > 0.5)
        .map(|f| Point2::new(f[0], f[1]))
        .unwrap_or_default()
}
