//! Scene assembly: one scene directory → `RawSceneRecord`.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;

use lp_core::{DatasetConfig, DatasetKind, Point2, Rot2};
use lp_scene::RawSceneRecord;

use crate::map::{build_raw_graph, parse_lanes, parse_links, LaneLink, LanePolyline};
use crate::scan::ScenePath;
use crate::tracks::{parse_argoverse_tracks, parse_summit_tracks, Track, TrackRole};
use crate::{DatasetError, DatasetResult};

/// Load one scene directory.
///
/// `include_future` is false for test splits: traces there end at the
/// observation horizon and the record carries no ground-truth futures.
pub fn load_scene(
    config:         &DatasetConfig,
    scene:          &ScenePath,
    include_future: bool,
) -> DatasetResult<RawSceneRecord> {
    let tracks_file = BufReader::new(File::open(scene.path.join("tracks.csv"))?);
    let (tracks, city) = match config.kind {
        DatasetKind::Argoverse => parse_argoverse_tracks(tracks_file)?,
        DatasetKind::Summit => parse_summit_tracks(tracks_file)?,
    };

    let lanes = parse_lanes(BufReader::new(File::open(scene.path.join("lanes.csv"))?))?;
    let links = parse_links(BufReader::new(File::open(scene.path.join("links.csv"))?))?;

    build_scene(config, scene, city, &tracks, &lanes, &links, include_future)
}

/// Assemble a raw record from parsed parts.  Separated from [`load_scene`]
/// so tests can drive it without touching the filesystem.
pub(crate) fn build_scene(
    config:         &DatasetConfig,
    scene:          &ScenePath,
    city:           String,
    tracks:         &[Track],
    lanes:          &[LanePolyline],
    links:          &[LaneLink],
    include_future: bool,
) -> DatasetResult<RawSceneRecord> {
    let obs_len = config.obs_len;
    let seq_len = config.seq_len();
    if obs_len < 2 {
        return Err(DatasetError::Parse(format!(
            "obs_len must be at least 2 to derive a target heading, got {obs_len}"
        )));
    }

    // ── Timeline: scene-wide sorted unique timestamps → step indices ──────
    let mut timestamps: Vec<f64> =
        tracks.iter().flat_map(|t| t.steps.iter().map(|s| s.0)).collect();
    timestamps.sort_by(f64::total_cmp);
    timestamps.dedup();
    let step_of: HashMap<u64, usize> = timestamps
        .iter()
        .enumerate()
        .map(|(step, &ts)| (ts.to_bits(), step))
        .collect();

    // ── Scene frame from the forecast target ──────────────────────────────
    let target = tracks
        .iter()
        .find(|t| t.role == TrackRole::Target)
        .ok_or(DatasetError::MissingTarget)?;
    let target_steps = step_positions(target, &step_of, seq_len);

    let orig = target_steps
        .get(obs_len - 1)
        .copied()
        .flatten()
        .ok_or(DatasetError::TargetIncomplete)?;
    let prev = target_steps[..obs_len - 1]
        .iter()
        .rev()
        .find_map(|p| *p)
        .ok_or(DatasetError::TargetIncomplete)?;
    let theta = (orig - prev).heading();
    let rot = Rot2::align(theta);

    // ── Per-agent tensors ─────────────────────────────────────────────────
    let mut record = RawSceneRecord {
        idx: scene.id,
        city,
        orig,
        theta,
        rot,
        ..RawSceneRecord::default()
    };

    for track in tracks {
        let steps = step_positions(track, &step_of, seq_len);
        if steps[..obs_len].iter().all(|p| p.is_none()) {
            continue; // never observed — nothing to encode
        }

        let mut feats = vec![[0.0f32; 3]; obs_len];
        let mut prev_sp: Option<Point2> = None;
        let mut last_sp = Point2::default();
        for (t, pos) in steps[..obs_len].iter().enumerate() {
            let Some(p) = pos else {
                prev_sp = None;
                continue;
            };
            let sp = rot.apply(*p - orig);
            feats[t] = match prev_sp {
                Some(q) => [sp.x - q.x, sp.y - q.y, 1.0],
                None => [0.0, 0.0, 1.0],
            };
            prev_sp = Some(sp);
            last_sp = sp;
        }
        record.feats.push(feats);
        record.ctrs.push(last_sp);

        if include_future {
            let mut gt = vec![Point2::default(); config.pred_len];
            let mut has = vec![false; config.pred_len];
            for (t, pos) in steps[obs_len..].iter().enumerate() {
                if let Some(p) = pos {
                    gt[t] = *p;
                    has[t] = true;
                }
            }
            record.gt_preds.push(gt);
            record.has_preds.push(has);
        }
    }

    record.graph = build_raw_graph(lanes, links, orig, rot)?;
    Ok(record)
}

/// A track's world position at each timeline step, `None` where absent.
/// Steps past `seq_len` are ignored.
fn step_positions(
    track:   &Track,
    step_of: &HashMap<u64, usize>,
    seq_len: usize,
) -> Vec<Option<Point2>> {
    let mut out = vec![None; seq_len];
    for &(ts, pos) in &track.steps {
        if let Some(&step) = step_of.get(&ts.to_bits()) {
            if step < seq_len {
                out[step] = Some(pos);
            }
        }
    }
    out
}
