//! The preprocessing run.

use std::path::Path;

use rayon::prelude::*;
use rayon::ThreadPool;

use lp_core::{DatasetConfig, PreprocessConfig, SceneId, SplitMode};
use lp_dataset::{load_scene, scan_split, ScenePath};
use lp_graph::{compute_connectivity, Connectivity};
use lp_scene::{collect_scene, SceneRecord, SceneStore};

use crate::observer::PipelineObserver;
use crate::{PipelineError, PipelineResult};

/// Preprocess one dataset split end to end.
///
/// Scans `raw_root/<mode>/`, loads and collects every scene, computes
/// left/right connectivity, merges it back, and writes the archive to
/// `out_path`.  Returns the finished store (the same data the archive now
/// holds) for callers that want to inspect it.
pub fn run_split<O: PipelineObserver>(
    prep:     &PreprocessConfig,
    data:     &DatasetConfig,
    mode:     SplitMode,
    raw_root: &Path,
    out_path: &Path,
    observer: &mut O,
) -> PipelineResult<SceneStore> {
    let pool = build_pool(prep.num_threads)?;
    let batch = prep.batch_size.max(1);

    // ── Scan: discover the split size at runtime ──────────────────────────
    let split_dir = raw_root.join(mode.dir_name());
    let scenes = scan_split(&split_dir).map_err(PipelineError::Scan)?;
    let total = scenes.len();
    observer.on_scan(total);

    let include_future = mode.includes_future();
    let mut store = SceneStore::with_capacity(total);

    // ── Phase 1: load + collect ───────────────────────────────────────────
    let mut done = 0usize;
    for chunk in scenes.chunks(batch) {
        let records = on_pool(&pool, || load_batch(data, chunk, include_future))?;
        for record in records {
            let id = record.idx;
            store
                .insert(record)
                .map_err(|source| PipelineError::Collect { id, source })?;
        }
        done += chunk.len();
        observer.on_batch_loaded(done, total);
    }

    // ── Phase 2: connectivity ─────────────────────────────────────────────
    //
    // Each batch is fully computed before any merge, so a scene's graph
    // record is never partially overwritten.
    let ids = store.ids_sorted();
    let mut done = 0usize;
    for chunk in ids.chunks(batch) {
        let results = on_pool(&pool, || connect_batch(prep, &store, chunk));
        for (id, conn) in results {
            store
                .merge_connectivity(id, conn)
                .map_err(|source| PipelineError::Merge { id, source })?;
        }
        done += chunk.len();
        observer.on_batch_connected(done, total);
    }

    // ── Phase 3: archive ──────────────────────────────────────────────────
    let bytes = lp_archive::save(&store, out_path)?;
    observer.on_archive_written(out_path, bytes);

    Ok(store)
}

// ── Batch workers ─────────────────────────────────────────────────────────────

fn load_batch(
    data:           &DatasetConfig,
    chunk:          &[ScenePath],
    include_future: bool,
) -> PipelineResult<Vec<SceneRecord>> {
    chunk
        .par_iter()
        .map(|scene| {
            let raw = load_scene(data, scene, include_future)
                .map_err(|source| PipelineError::Load { id: scene.id, source })?;
            collect_scene(raw).map_err(|source| PipelineError::Collect { id: scene.id, source })
        })
        .collect()
}

fn connect_batch(
    prep:  &PreprocessConfig,
    store: &SceneStore,
    chunk: &[SceneId],
) -> Vec<(SceneId, Connectivity)> {
    chunk
        .par_iter()
        .filter_map(|&id| store.get(id).map(|rec| (id, rec)))
        .map(|(id, rec)| {
            (id, compute_connectivity(&rec.graph, prep.cross_dist, prep.cross_angle))
        })
        .collect()
}

// ── Worker pool ───────────────────────────────────────────────────────────────

/// Build a dedicated pool when a thread count is configured; otherwise use
/// Rayon's global pool.
fn build_pool(num_threads: Option<usize>) -> PipelineResult<Option<ThreadPool>> {
    match num_threads {
        None => Ok(None),
        Some(n) => rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .map(Some)
            .map_err(|e| PipelineError::ThreadPool(e.to_string())),
    }
}

fn on_pool<T: Send>(pool: &Option<ThreadPool>, op: impl FnOnce() -> T + Send) -> T {
    match pool {
        Some(p) => p.install(op),
        None => op(),
    }
}
