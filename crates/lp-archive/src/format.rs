//! Archive save/load.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use lp_core::SceneId;
use lp_scene::{SceneRecord, SceneStore};

use crate::{ArchiveError, ArchiveResult};

/// Magic line written at the start of every archive.  Bump the trailing
/// version when the record schema changes.
pub const ARCHIVE_MAGIC: &[u8] = b"lane-prep features v1\n";

/// Serialize `store` to `path`, replacing any existing file atomically.
///
/// Entries are written in ascending scene-id order, so two runs over the
/// same input produce byte-identical archives.  Returns the archive size in
/// bytes.
pub fn save(store: &SceneStore, path: &Path) -> ArchiveResult<u64> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut entries: Vec<(SceneId, &SceneRecord)> = store.iter().collect();
    entries.sort_unstable_by_key(|&(id, _)| id);

    let tmp = tmp_path(path);
    let mut writer = BufWriter::new(File::create(&tmp)?);
    writer.write_all(ARCHIVE_MAGIC)?;
    bincode::serialize_into(&mut writer, &entries)?;
    writer.flush()?;
    drop(writer);

    let bytes = fs::metadata(&tmp)?.len();
    fs::rename(&tmp, path)?;
    Ok(bytes)
}

/// Read an archive back into a [`SceneStore`].
pub fn load(path: &Path) -> ArchiveResult<SceneStore> {
    let mut reader = BufReader::new(File::open(path)?);

    let mut magic = [0u8; ARCHIVE_MAGIC.len()];
    reader
        .read_exact(&mut magic)
        .map_err(|_| ArchiveError::FormatMismatch)?;
    if magic != ARCHIVE_MAGIC {
        return Err(ArchiveError::FormatMismatch);
    }

    let entries: Vec<(SceneId, SceneRecord)> = bincode::deserialize_from(&mut reader)?;
    let mut store = SceneStore::with_capacity(entries.len());
    for (_, record) in entries {
        store.insert(record)?;
    }
    Ok(store)
}

/// Sibling temp path: `features.pkl` → `features.pkl.tmp`.
fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
