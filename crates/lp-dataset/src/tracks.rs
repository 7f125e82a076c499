//! Trajectory parsers.
//!
//! Both flavors reduce to the same [`Track`] shape: a role plus timestamped
//! world positions.  Timestamps only order rows within a scene; their
//! absolute values are never interpreted.
//!
//! # Argoverse columns
//!
//! ```csv
//! TIMESTAMP,TRACK_ID,OBJECT_TYPE,X,Y,CITY_NAME
//! 315967320.0,00000000-0000-0000-0000-000000000000,AGENT,1718.5,314.1,PIT
//! ```
//!
//! `OBJECT_TYPE` is `AGENT` for the forecast target; everything else (`AV`,
//! `OTHERS`) is a social track.
//!
//! # Summit columns
//!
//! ```csv
//! frame,agent_id,role,x,y
//! 0,0,ego,12.0,4.5
//! ```
//!
//! `role` must be `ego` or `other`; the city name is the fixed string
//! `summit`.

use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;

use lp_core::Point2;

use crate::{DatasetError, DatasetResult};

// ── Track ─────────────────────────────────────────────────────────────────────

/// Whether a track is the scene's forecast target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrackRole {
    Target,
    Other,
}

/// One agent's trajectory: `(timestamp, world position)` rows sorted by
/// timestamp.
#[derive(Clone, Debug)]
pub struct Track {
    pub role:  TrackRole,
    pub steps: Vec<(f64, Point2)>,
}

// ── CSV records ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ArgoverseRow {
    #[serde(rename = "TIMESTAMP")]
    timestamp:   f64,
    #[serde(rename = "TRACK_ID")]
    track_id:    String,
    #[serde(rename = "OBJECT_TYPE")]
    object_type: String,
    #[serde(rename = "X")]
    x:           f32,
    #[serde(rename = "Y")]
    y:           f32,
    #[serde(rename = "CITY_NAME")]
    city_name:   String,
}

#[derive(Deserialize)]
struct SummitRow {
    frame:    u64,
    agent_id: u32,
    role:     String,
    x:        f32,
    y:        f32,
}

// ── Parsers ───────────────────────────────────────────────────────────────────

/// Parse Argoverse-style `tracks.csv` from any `Read` source.
///
/// Returns the tracks (deterministically ordered by `TRACK_ID`) and the
/// scene's city name.
pub fn parse_argoverse_tracks<R: Read>(reader: R) -> DatasetResult<(Vec<Track>, String)> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_track: BTreeMap<String, Track> = BTreeMap::new();
    let mut city = String::new();

    for result in csv_reader.deserialize::<ArgoverseRow>() {
        let row = result?;
        if city.is_empty() {
            city = row.city_name;
        }
        let track = by_track.entry(row.track_id).or_insert_with(|| Track {
            role:  TrackRole::Other,
            steps: Vec::new(),
        });
        if row.object_type == "AGENT" {
            track.role = TrackRole::Target;
        }
        track.steps.push((row.timestamp, Point2::new(row.x, row.y)));
    }

    Ok((finish_tracks(by_track.into_values()), city))
}

/// Parse Summit-style `tracks.csv` from any `Read` source.
pub fn parse_summit_tracks<R: Read>(reader: R) -> DatasetResult<(Vec<Track>, String)> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_track: BTreeMap<u32, Track> = BTreeMap::new();

    for result in csv_reader.deserialize::<SummitRow>() {
        let row = result?;
        let role = match row.role.as_str() {
            "ego" => TrackRole::Target,
            "other" => TrackRole::Other,
            other => {
                return Err(DatasetError::Parse(format!(
                    "invalid role {other:?}: expected \"ego\" or \"other\""
                )));
            }
        };
        let track = by_track.entry(row.agent_id).or_insert_with(|| Track {
            role,
            steps: Vec::new(),
        });
        track.role = role;
        track.steps.push((row.frame as f64, Point2::new(row.x, row.y)));
    }

    Ok((finish_tracks(by_track.into_values()), "summit".to_owned()))
}

/// Sort each track's rows by timestamp and put the target track first.
fn finish_tracks(tracks: impl Iterator<Item = Track>) -> Vec<Track> {
    let mut out: Vec<Track> = tracks.collect();
    for track in &mut out {
        track.steps.sort_by(|a, b| a.0.total_cmp(&b.0));
    }
    // Stable sort keeps the per-key order among social tracks.
    out.sort_by_key(|t| t.role == TrackRole::Other);
    out
}
