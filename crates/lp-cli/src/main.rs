//! preprocess — build a lane-graph feature cache from raw driving traces.
//!
//! Reads one split of a raw dataset (`<raw-folder>/<mode>/`), computes
//! cross-lane connectivity for every scene, and writes the split's feature
//! archive to `<features-path>`:
//!
//! ```text
//! preprocess --raw-folder data/argoverse \
//!            --features-path features/forecasting_features_train.bin \
//!            --dataset-type ArgoverseDataset \
//!            --mode train
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use lp_core::{DatasetConfig, DatasetKind, PreprocessConfig, SplitMode};
use lp_pipeline::{run_split, PipelineObserver};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[clap(name = "preprocess", about = "Preprocess raw driving traces into a lane-graph feature cache")]
struct Args {
    /// Raw dataset root, one subdirectory per split.
    #[clap(long)]
    raw_folder: PathBuf,

    /// Destination path of the split's feature archive.
    #[clap(long)]
    features_path: PathBuf,

    /// Dataset flavor. Choices are ArgoverseDataset and SummitDataset.
    #[clap(long, default_value = "ArgoverseDataset")]
    dataset_type: DatasetKind,

    /// Split to preprocess. Choices are train, val, and test.
    #[clap(long, default_value = "train")]
    mode: SplitMode,

    /// Maximum cross-lane neighbor distance in map units.
    #[clap(long, default_value_t = 6.0)]
    cross_dist: f32,

    /// Worker threads for the scene pool. Defaults to all logical cores.
    #[clap(long)]
    workers: Option<usize>,
}

// ── Progress printer ──────────────────────────────────────────────────────────

/// Prints cumulative throughput every `REPORT_EVERY` scenes, plus one line
/// per phase boundary.
struct ProgressPrinter {
    timer: Instant,
}

const REPORT_EVERY: usize = 3_200; // 100 batches at the default batch size

impl ProgressPrinter {
    fn new() -> Self {
        Self { timer: Instant::now() }
    }

    fn report(&mut self, phase: &str, done: usize, total: usize) {
        if done.is_multiple_of(REPORT_EVERY) || done == total {
            println!("{phase}: {done}/{total} scenes ({:.1}s)", self.timer.elapsed().as_secs_f64());
            self.timer = Instant::now();
        }
    }
}

impl PipelineObserver for ProgressPrinter {
    fn on_scan(&mut self, scene_count: usize) {
        println!("found {scene_count} scenes");
        self.timer = Instant::now();
    }

    fn on_batch_loaded(&mut self, done: usize, total: usize) {
        self.report("load", done, total);
    }

    fn on_batch_connected(&mut self, done: usize, total: usize) {
        self.report("connect", done, total);
    }

    fn on_archive_written(&mut self, path: &Path, bytes: u64) {
        println!("wrote {} ({:.1} MiB)", path.display(), bytes as f64 / (1024.0 * 1024.0));
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let prep = PreprocessConfig {
        cross_dist: args.cross_dist,
        num_threads: args.workers,
        ..PreprocessConfig::default()
    };
    let data = DatasetConfig::new(args.dataset_type);

    let started = Instant::now();
    let store = run_split(
        &prep,
        &data,
        args.mode,
        &args.raw_folder,
        &args.features_path,
        &mut ProgressPrinter::new(),
    )?;

    println!(
        "done: {} {} scenes in {:.1}s",
        store.len(),
        args.mode,
        started.elapsed().as_secs_f64(),
    );
    Ok(())
}
