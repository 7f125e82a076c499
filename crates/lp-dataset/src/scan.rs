//! Split-directory scan.
//!
//! The scan is how the pipeline discovers a split's cardinality at runtime:
//! no per-dataset scene counts are hardcoded anywhere.

use std::fs;
use std::path::{Path, PathBuf};

use lp_core::SceneId;

use crate::DatasetResult;

/// One scene directory found in a split.
#[derive(Clone, Debug)]
pub struct ScenePath {
    pub id:   SceneId,
    pub path: PathBuf,
}

/// List all scene directories under `dir`, sorted by ascending scene id.
///
/// A scene directory is any subdirectory whose name parses as a `u32`.
/// Other entries (hidden directories, stray files, checksum lists, …) are
/// ignored.  Ids need not be contiguous.
pub fn scan_split(dir: &Path) -> DatasetResult<Vec<ScenePath>> {
    let mut scenes = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let Ok(id) = name.parse::<u32>() else { continue };
        scenes.push(ScenePath { id: SceneId(id), path: entry.path() });
    }
    scenes.sort_by_key(|s| s.id);
    Ok(scenes)
}
