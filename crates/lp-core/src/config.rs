//! Immutable configuration structs.
//!
//! The pipeline takes configuration by value at stage boundaries — there is
//! no process-wide settings dictionary.  All structs are plain data with
//! `Default` impls carrying the dataset-tuned values the cached features
//! were produced with.

use std::f32::consts::FRAC_PI_2;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ── PreprocessConfig ──────────────────────────────────────────────────────────

/// Settings for the connectivity engine and the worker pool.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Maximum Euclidean distance (map units) for a cross-lane neighbor to
    /// be considered.
    pub cross_dist: f32,

    /// Optional heading-difference cone (radians) for admitting a node as a
    /// directional cross candidate.  `None` disables the angle mask.
    pub cross_angle: Option<f32>,

    /// Scenes per worker batch.  Also the progress-reporting granularity.
    pub batch_size: usize,

    /// Worker thread count for the scene pool.  `None` uses all logical
    /// cores.
    pub num_threads: Option<usize>,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            cross_dist:  6.0,
            cross_angle: Some(FRAC_PI_2),
            batch_size:  32,
            num_threads: None,
        }
    }
}

// ── DatasetKind / SplitMode ───────────────────────────────────────────────────

/// Which raw-trace flavor a split directory contains.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatasetKind {
    /// Argoverse motion-forecasting CSV traces.
    Argoverse,
    /// Simulation-derived traces from the Summit driving simulator.
    Summit,
}

impl FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ArgoverseDataset" => Ok(Self::Argoverse),
            "SummitDataset" => Ok(Self::Summit),
            other => Err(format!(
                "unknown dataset type {other:?}: expected ArgoverseDataset or SummitDataset"
            )),
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argoverse => write!(f, "ArgoverseDataset"),
            Self::Summit => write!(f, "SummitDataset"),
        }
    }
}

/// Which split of a dataset to preprocess.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SplitMode {
    Train,
    Val,
    Test,
}

impl SplitMode {
    /// Subdirectory of the raw dataset root holding this split.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Val => "val",
            Self::Test => "test",
        }
    }

    /// Whether ground-truth futures are available for this split.
    ///
    /// Test traces end at the observation horizon, so the cache carries no
    /// `gt_preds`/`has_preds` for them.
    pub fn includes_future(self) -> bool {
        !matches!(self, Self::Test)
    }
}

impl FromStr for SplitMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(Self::Train),
            "val" => Ok(Self::Val),
            "test" => Ok(Self::Test),
            other => Err(format!("unknown mode {other:?}: expected train, val, or test")),
        }
    }
}

impl fmt::Display for SplitMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

// ── DatasetConfig ─────────────────────────────────────────────────────────────

/// Horizon settings for one raw dataset.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub kind: DatasetKind,

    /// Observed timesteps per track.
    pub obs_len: usize,

    /// Predicted (future) timesteps per track.
    pub pred_len: usize,
}

impl DatasetConfig {
    /// Standard horizons: 20 observed + 30 predicted steps.
    pub fn new(kind: DatasetKind) -> Self {
        Self { kind, obs_len: 20, pred_len: 30 }
    }

    /// Total timeline length per track.
    #[inline]
    pub fn seq_len(&self) -> usize {
        self.obs_len + self.pred_len
    }
}

// ── KnnConfig ─────────────────────────────────────────────────────────────────

/// Settings for the k-nearest-neighbor baseline forecaster.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KnnConfig {
    /// Social neighbors to average over.
    pub n_neigh: usize,

    /// Future timesteps to emit per agent.
    pub pred_len: usize,

    /// Blend the final deltas of nearby agents into each prediction.
    pub use_social: bool,

    /// Extrapolate the final observed displacement.  When false the
    /// forecaster predicts the agent holding its last position.
    pub use_delta: bool,
}

impl Default for KnnConfig {
    fn default() -> Self {
        Self { n_neigh: 6, pred_len: 30, use_social: true, use_delta: true }
    }
}
