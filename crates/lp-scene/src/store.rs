//! The `SceneStore` — all collected scenes of one dataset split.
//!
//! The store is a growable map keyed by scene id.  The pipeline pre-sizes
//! it from the split scan, populates it scene by scene during loading,
//! mutates each scene's graph exactly once when connectivity results merge
//! back, and then hands it to the archive writer.  After serialization it
//! is never mutated again.

use rustc_hash::FxHashMap;

use lp_core::SceneId;
use lp_graph::Connectivity;

use crate::record::SceneRecord;
use crate::{SceneError, SceneResult};

/// Mapping from scene id to its full cached record.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SceneStore {
    scenes: FxHashMap<SceneId, SceneRecord>,
}

impl SceneStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for a known split cardinality (discovered by the directory
    /// scan) to avoid rehashing during the loading phase.
    pub fn with_capacity(scenes: usize) -> Self {
        Self {
            scenes: FxHashMap::with_capacity_and_hasher(scenes, Default::default()),
        }
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    pub fn contains(&self, id: SceneId) -> bool {
        self.scenes.contains_key(&id)
    }

    pub fn get(&self, id: SceneId) -> Option<&SceneRecord> {
        self.scenes.get(&id)
    }

    /// Insert a freshly collected scene.  Each slot is written exactly once;
    /// a second write to the same id is an error.
    pub fn insert(&mut self, record: SceneRecord) -> SceneResult<()> {
        let id = record.idx;
        if self.scenes.insert(id, record).is_some() {
            return Err(SceneError::DuplicateScene(id));
        }
        Ok(())
    }

    /// Merge a computed connectivity result into one scene's graph record.
    pub fn merge_connectivity(&mut self, id: SceneId, conn: Connectivity) -> SceneResult<()> {
        let record = self.scenes.get_mut(&id).ok_or(SceneError::SceneNotFound(id))?;
        record.graph.left = conn.left;
        record.graph.right = conn.right;
        Ok(())
    }

    /// Scene ids in ascending order.  The deterministic iteration order for
    /// batching and serialization.
    pub fn ids_sorted(&self) -> Vec<SceneId> {
        let mut ids: Vec<SceneId> = self.scenes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Iterator over `(id, record)` in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (SceneId, &SceneRecord)> {
        self.scenes.iter().map(|(&id, rec)| (id, rec))
    }
}
