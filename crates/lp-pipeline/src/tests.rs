//! End-to-end tests for lp-pipeline.
//!
//! Each test materializes a tiny raw split on disk, runs the full
//! pipeline, and checks the store and archive against hand-computed
//! connectivity.

#[cfg(test)]
mod helpers {
    use std::fs;
    use std::path::Path;

    use lp_core::{DatasetConfig, DatasetKind, PreprocessConfig};

    /// Ego driving +x at 1 unit/frame: 2 observed + 2 future steps.
    pub const TRACKS: &str = "\
frame,agent_id,role,x,y
0,0,ego,0.0,0.0
1,0,ego,1.0,0.0
2,0,ego,2.0,0.0
3,0,ego,3.0,0.0
";

    /// Two parallel lanes 3 units apart, both heading +x, 3 nodes each.
    pub const PARALLEL_LANES: &str = "\
lane_id,x,y
17,0.0,0.0
17,2.0,0.0
17,4.0,0.0
17,6.0,0.0
23,0.0,3.0
23,2.0,3.0
23,4.0,3.0
23,6.0,3.0
";

    pub const PARALLEL_LINKS: &str = "\
relation,from_lane,to_lane
left,17,23
right,23,17
";

    pub const SINGLE_LANE: &str = "\
lane_id,x,y
5,0.0,0.0
5,2.0,0.0
5,4.0,0.0
";

    pub fn write_scene(split: &Path, id: u32, lanes: &str, links: &str) {
        let dir = split.join(id.to_string());
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("tracks.csv"), TRACKS).unwrap();
        fs::write(dir.join("lanes.csv"), lanes).unwrap();
        fs::write(dir.join("links.csv"), links).unwrap();
    }

    /// Raw root with scene 3 (two parallel lanes) and scene 7 (one lane,
    /// no links) under `train/`.
    pub fn write_split(root: &Path) {
        let split = root.join("train");
        write_scene(&split, 3, PARALLEL_LANES, PARALLEL_LINKS);
        write_scene(&split, 7, SINGLE_LANE, "relation,from_lane,to_lane\n");
    }

    pub fn configs() -> (PreprocessConfig, DatasetConfig) {
        let prep = PreprocessConfig {
            batch_size: 1,
            num_threads: Some(2),
            ..PreprocessConfig::default()
        };
        let mut data = DatasetConfig::new(DatasetKind::Summit);
        data.obs_len = 2;
        data.pred_len = 2;
        (prep, data)
    }
}

#[cfg(test)]
mod run {
    use std::path::Path;

    use tempfile::TempDir;

    use lp_core::{SceneId, SplitMode};

    use crate::{run_split, NoopObserver, PipelineError, PipelineObserver};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[derive(Default)]
    struct Recorder {
        scanned:    usize,
        loaded:     Vec<usize>,
        connected:  Vec<usize>,
        archives:   usize,
        bytes:      u64,
    }

    impl PipelineObserver for Recorder {
        fn on_scan(&mut self, scene_count: usize) {
            self.scanned = scene_count;
        }
        fn on_batch_loaded(&mut self, done: usize, _total: usize) {
            self.loaded.push(done);
        }
        fn on_batch_connected(&mut self, done: usize, _total: usize) {
            self.connected.push(done);
        }
        fn on_archive_written(&mut self, _path: &Path, bytes: u64) {
            self.archives += 1;
            self.bytes = bytes;
        }
    }

    #[test]
    fn end_to_end_connectivity_matches_hand_computation() {
        let dir = tmp();
        super::helpers::write_split(dir.path());
        let out = dir.path().join("features_train.bin");
        let (prep, data) = super::helpers::configs();

        let store = run_split(
            &prep, &data, SplitMode::Train, dir.path(), &out, &mut NoopObserver,
        )
        .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.ids_sorted(), vec![SceneId(3), SceneId(7)]);

        // Scene 3: lanes sampled at the same x positions with a π/2 cone —
        // the straight-across candidate sits exactly on the cone edge and
        // is excluded, so each node pairs with the diagonally-ahead node
        // and the last node on each lane drops out.  Lane-0 nodes are 0..3,
        // lane-1 nodes 3..6.
        let graph = &store.get(SceneId(3)).unwrap().graph;
        assert_eq!(graph.left.u, vec![0, 1]);
        assert_eq!(graph.left.v, vec![4, 5]);
        assert_eq!(graph.right.u, vec![3, 4]);
        assert_eq!(graph.right.v, vec![1, 2]);

        // Scene 7: no left/right relations mapped → empty columns.
        let lone = &store.get(SceneId(7)).unwrap().graph;
        assert!(lone.left.is_empty());
        assert!(lone.right.is_empty());

        // The archive holds exactly the returned store.
        let restored = lp_archive::load(&out).unwrap();
        assert_eq!(restored, store);
    }

    #[test]
    fn observer_sees_every_phase() {
        let dir = tmp();
        super::helpers::write_split(dir.path());
        let out = dir.path().join("features.bin");
        let (prep, data) = super::helpers::configs();

        let mut rec = Recorder::default();
        run_split(&prep, &data, SplitMode::Train, dir.path(), &out, &mut rec).unwrap();

        assert_eq!(rec.scanned, 2);
        // batch_size = 1 → one callback per scene, cumulative counts.
        assert_eq!(rec.loaded, vec![1, 2]);
        assert_eq!(rec.connected, vec![1, 2]);
        assert_eq!(rec.archives, 1);
        assert_eq!(rec.bytes, std::fs::metadata(&out).unwrap().len());
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let dir = tmp();
        super::helpers::write_split(dir.path());
        let (prep, data) = super::helpers::configs();

        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        run_split(&prep, &data, SplitMode::Train, dir.path(), &a, &mut NoopObserver).unwrap();
        run_split(&prep, &data, SplitMode::Train, dir.path(), &b, &mut NoopObserver).unwrap();

        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
    }

    #[test]
    fn test_mode_reads_test_split_without_futures() {
        let dir = tmp();
        let split = dir.path().join("test");
        super::helpers::write_scene(
            &split, 0,
            super::helpers::SINGLE_LANE,
            "relation,from_lane,to_lane\n",
        );
        let out = dir.path().join("features_test.bin");
        let (prep, data) = super::helpers::configs();

        let store = run_split(
            &prep, &data, SplitMode::Test, dir.path(), &out, &mut NoopObserver,
        )
        .unwrap();
        let rec = store.get(lp_core::SceneId(0)).unwrap();
        assert!(rec.gt_preds.is_empty());
        assert!(rec.has_preds.is_empty());
        assert!(!rec.ctrs.is_empty());
    }

    #[test]
    fn broken_scene_fails_fast_with_its_id() {
        let dir = tmp();
        super::helpers::write_split(dir.path());
        // Scene 5 is missing its tracks file entirely.
        std::fs::create_dir_all(dir.path().join("train/5")).unwrap();
        let out = dir.path().join("features.bin");
        let (prep, data) = super::helpers::configs();

        let err = run_split(
            &prep, &data, SplitMode::Train, dir.path(), &out, &mut NoopObserver,
        )
        .unwrap_err();

        assert!(matches!(err, PipelineError::Load { id: SceneId(5), .. }));
        // Fail-fast: no archive is produced.
        assert!(!out.exists());
    }

    #[test]
    fn missing_split_directory_is_a_scan_error() {
        let dir = tmp();
        let out = dir.path().join("features.bin");
        let (prep, data) = super::helpers::configs();

        let err = run_split(
            &prep, &data, SplitMode::Val, dir.path(), &out, &mut NoopObserver,
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::Scan(_)));
    }
}
