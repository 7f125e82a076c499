//! Unit tests for lp-scene.

#[cfg(test)]
pub mod helpers {
    use lp_core::{Point2, Rot2, SceneId};

    use crate::record::{RawLaneGraph, RawSceneRecord, SceneRecord};
    use crate::collect_scene;

    /// Raw scene with a two-node, two-lane graph and one agent track.
    pub fn raw_scene(idx: u32) -> RawSceneRecord {
        RawSceneRecord {
            idx:       SceneId(idx),
            city:      "PIT".to_owned(),
            feats:     vec![vec![[1.0, 0.0, 1.0], [1.0, 0.0, 1.0]]],
            ctrs:      vec![Point2::new(2.0, 0.0)],
            orig:      Point2::new(10.0, 5.0),
            theta:     0.25,
            rot:       Rot2::align(0.25),
            gt_preds:  vec![vec![Point2::new(11.0, 5.0)]],
            has_preds: vec![vec![true]],
            graph: RawLaneGraph {
                ctrs:        vec![Point2::new(1.0, 0.0), Point2::new(1.0, 3.0)],
                feats:       vec![Point2::new(2.0, 0.0), Point2::new(2.0, 0.0)],
                lane_idcs:   vec![0, 1],
                pre_pairs:   vec![],
                suc_pairs:   vec![],
                left_pairs:  vec![[0, 1]],
                right_pairs: vec![[1, 0]],
            },
        }
    }

    pub fn scene(idx: u32) -> SceneRecord {
        collect_scene(raw_scene(idx)).unwrap()
    }
}

// ── Collector ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod collector {
    use crate::{collect_scene, SceneError};

    #[test]
    fn narrows_topology_to_i16() {
        let rec = collect_scene(super::helpers::raw_scene(0)).unwrap();
        assert_eq!(rec.graph.lane_idcs, vec![0i16, 1]);
        assert_eq!(rec.graph.left_pairs, vec![[0i16, 1]]);
        assert_eq!(rec.graph.right_pairs, vec![[1i16, 0]]);
        // Connectivity columns start empty.
        assert!(rec.graph.left.is_empty());
        assert!(rec.graph.right.is_empty());
    }

    #[test]
    fn floats_pass_through_unchanged() {
        let raw = super::helpers::raw_scene(3);
        let rec = collect_scene(raw.clone()).unwrap();
        assert_eq!(rec.city, raw.city);
        assert_eq!(rec.feats, raw.feats);
        assert_eq!(rec.ctrs, raw.ctrs);
        assert_eq!(rec.orig, raw.orig);
        assert_eq!(rec.theta, raw.theta);
        assert_eq!(rec.gt_preds, raw.gt_preds);
        assert_eq!(rec.graph.ctrs, raw.graph.ctrs);
    }

    #[test]
    fn id_overflow_is_an_error() {
        let mut raw = super::helpers::raw_scene(0);
        raw.graph.left_pairs.push([0, 40_000]);
        let err = collect_scene(raw).unwrap_err();
        assert!(matches!(err, SceneError::IdOverflow { value: 40_000 }));
    }

    #[test]
    fn non_dense_lane_ids_are_an_error() {
        let mut raw = super::helpers::raw_scene(0);
        raw.graph.lane_idcs = vec![0, 2]; // lane 1 missing
        let err = collect_scene(raw).unwrap_err();
        assert!(matches!(err, SceneError::InvalidLaneTopology(_)));
    }

    #[test]
    fn out_of_range_pair_is_an_error() {
        let mut raw = super::helpers::raw_scene(0);
        raw.graph.suc_pairs.push([0, 5]);
        let err = collect_scene(raw).unwrap_err();
        assert!(matches!(err, SceneError::InvalidLaneTopology(_)));
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use lp_core::SceneId;
    use lp_graph::{Connectivity, NeighborPairs};

    use crate::{SceneError, SceneStore};

    #[test]
    fn insert_and_lookup() {
        let mut store = SceneStore::with_capacity(2);
        store.insert(super::helpers::scene(7)).unwrap();
        store.insert(super::helpers::scene(3)).unwrap();

        assert_eq!(store.len(), 2);
        assert!(store.contains(SceneId(7)));
        assert!(store.get(SceneId(3)).is_some());
        assert!(store.get(SceneId(4)).is_none());
        assert_eq!(store.ids_sorted(), vec![SceneId(3), SceneId(7)]);
    }

    #[test]
    fn duplicate_insert_rejected() {
        let mut store = SceneStore::new();
        store.insert(super::helpers::scene(1)).unwrap();
        let err = store.insert(super::helpers::scene(1)).unwrap_err();
        assert!(matches!(err, SceneError::DuplicateScene(SceneId(1))));
    }

    #[test]
    fn merge_connectivity_updates_graph_in_place() {
        let mut store = SceneStore::new();
        store.insert(super::helpers::scene(5)).unwrap();

        let conn = Connectivity {
            left:  NeighborPairs { u: vec![0], v: vec![1] },
            right: NeighborPairs { u: vec![1], v: vec![0] },
        };
        store.merge_connectivity(SceneId(5), conn.clone()).unwrap();

        let rec = store.get(SceneId(5)).unwrap();
        assert_eq!(rec.graph.left, conn.left);
        assert_eq!(rec.graph.right, conn.right);
    }

    #[test]
    fn merge_unknown_scene_rejected() {
        let mut store = SceneStore::new();
        let err = store
            .merge_connectivity(SceneId(9), Connectivity::default())
            .unwrap_err();
        assert!(matches!(err, SceneError::SceneNotFound(SceneId(9))));
    }
}
