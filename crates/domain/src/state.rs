//! Atomic JSON state files.
//!
//! Every non-trivial state file (skill index, history index, segment index,
//! pending-learning singleton) is written to a temp file in the target
//! directory and renamed into place, so a hook killed mid-write leaves either
//! the old state or the new state, never a truncated file.

use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Error, Result};

/// Serialize `value` as pretty JSON and move it into place atomically.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| Error::Other(format!("no parent directory for {}", path.display())))?;
    std::fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    let json = serde_json::to_vec_pretty(value)?;
    tmp.write_all(&json)?;
    tmp.write_all(b"\n")?;
    tmp.persist(path)
        .map_err(|e| Error::Io(e.error))?;
    Ok(())
}

/// Load a JSON state file.  `Ok(None)` when the file does not exist.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&raw)?))
}

/// Load a JSON state file, treating absence *and* corruption as the default
/// value.  Owned state files are rebuildable; a corrupt one is rebuilt rather
/// than wedging the hook.
pub fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "unreadable state file, starting fresh"
            );
            T::default()
        }
    }
}
