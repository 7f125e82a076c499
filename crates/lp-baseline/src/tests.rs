//! Unit tests for lp-baseline.

#[cfg(test)]
mod knn {
    use lp_core::{KnnConfig, Point2, Rot2, SceneId};
    use lp_scene::SceneRecord;

    use crate::KnnForecaster;

    /// Scene with agents at `ctrs`, each with a single valid feature row
    /// carrying its final observed displacement.
    fn scene(ctrs: &[Point2], deltas: &[Point2], rot: Rot2, orig: Point2) -> SceneRecord {
        SceneRecord {
            idx: SceneId(0),
            city: "summit".to_owned(),
            feats: deltas.iter().map(|d| vec![[d.x, d.y, 1.0]]).collect(),
            ctrs: ctrs.to_vec(),
            orig,
            theta: 0.0,
            rot,
            ..SceneRecord::default()
        }
    }

    fn config(pred_len: usize) -> KnnConfig {
        KnnConfig { pred_len, ..KnnConfig::default() }
    }

    #[test]
    fn lone_agent_extrapolates_constant_velocity() {
        let s = scene(
            &[Point2::new(0.0, 0.0)],
            &[Point2::new(1.0, 0.0)],
            Rot2::IDENTITY,
            Point2::default(),
        );
        let preds = KnnForecaster::new(config(3)).forecast(&s);

        assert_eq!(preds.len(), 1);
        assert_eq!(preds[0], vec![
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 0.0),
        ]);
    }

    #[test]
    fn predictions_map_back_to_world_frame() {
        // Scene frame rotated 90°: a +x scene-frame step is a +y world step
        // after applying the inverse rotation.
        let rot = Rot2::align(std::f32::consts::FRAC_PI_2);
        let orig = Point2::new(10.0, 20.0);
        let s = scene(&[Point2::new(0.0, 0.0)], &[Point2::new(1.0, 0.0)], rot, orig);

        let preds = KnnForecaster::new(config(2)).forecast(&s);
        let p = preds[0][0];
        assert!((p.x - 10.0).abs() < 1e-5);
        assert!((p.y - 21.0).abs() < 1e-5);
        let q = preds[0][1];
        assert!((q.y - 22.0).abs() < 1e-5);
    }

    #[test]
    fn social_averaging_blends_neighbor_deltas() {
        // Two co-moving neighbors pull a stationary agent forward: mean of
        // (0,0), (3,0), (3,0) = (2,0) per step.
        let s = scene(
            &[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)],
            &[Point2::new(0.0, 0.0), Point2::new(3.0, 0.0), Point2::new(3.0, 0.0)],
            Rot2::IDENTITY,
            Point2::default(),
        );
        let preds = KnnForecaster::new(config(1)).forecast(&s);
        assert_eq!(preds[0][0], Point2::new(2.0, 0.0));
    }

    #[test]
    fn use_social_false_ignores_neighbors() {
        let s = scene(
            &[Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)],
            &[Point2::new(1.0, 0.0), Point2::new(-5.0, 0.0)],
            Rot2::IDENTITY,
            Point2::default(),
        );
        let cfg = KnnConfig { pred_len: 1, use_social: false, ..KnnConfig::default() };
        let preds = KnnForecaster::new(cfg).forecast(&s);
        assert_eq!(preds[0][0], Point2::new(1.0, 0.0));
    }

    #[test]
    fn use_delta_false_holds_position() {
        let s = scene(
            &[Point2::new(4.0, 2.0)],
            &[Point2::new(9.0, 9.0)],
            Rot2::IDENTITY,
            Point2::default(),
        );
        let cfg = KnnConfig { pred_len: 2, use_delta: false, ..KnnConfig::default() };
        let preds = KnnForecaster::new(cfg).forecast(&s);
        assert_eq!(preds[0], vec![Point2::new(4.0, 2.0), Point2::new(4.0, 2.0)]);
    }

    #[test]
    fn n_neigh_caps_the_neighborhood() {
        // Nearest neighbor moves +x, the far one -x; with n_neigh = 1 only
        // the near one contributes: mean of (0,0) and (2,0) = (1,0).
        let s = scene(
            &[Point2::new(0.0, 0.0), Point2::new(0.5, 0.0), Point2::new(100.0, 0.0)],
            &[Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), Point2::new(-2.0, 0.0)],
            Rot2::IDENTITY,
            Point2::default(),
        );
        let cfg = KnnConfig { pred_len: 1, n_neigh: 1, ..KnnConfig::default() };
        let preds = KnnForecaster::new(cfg).forecast(&s);
        assert_eq!(preds[0][0], Point2::new(1.0, 0.0));
    }

    #[test]
    fn invalid_feature_rows_contribute_zero_delta() {
        let mut s = scene(
            &[Point2::new(0.0, 0.0)],
            &[Point2::new(5.0, 5.0)],
            Rot2::IDENTITY,
            Point2::default(),
        );
        s.feats[0][0][2] = 0.0; // mark the only row invalid
        let preds = KnnForecaster::new(config(1)).forecast(&s);
        assert_eq!(preds[0][0], Point2::new(0.0, 0.0));
    }

    #[test]
    fn empty_scene_is_empty_output() {
        let s = SceneRecord::default();
        assert!(KnnForecaster::new(config(3)).forecast(&s).is_empty());
    }
}
