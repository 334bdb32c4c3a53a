//! Snapshot I/O: atomic local writes under an exclusive lock, plus the
//! best-effort remote copy inside a synchronized-storage container.

use crate::paths::{remote_progress_file, StorePaths};
use cull_core::ProgressSnapshot;
use fs2::FileExt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Handle to the local progress file plus the optional sync container.
#[derive(Debug, Clone)]
pub struct ProgressStore {
    pub paths: StorePaths,
    /// Root of the synchronized-storage container. `None` means remote sync
    /// is unavailable and every remote operation is a no-op.
    pub sync_container: Option<PathBuf>,
}

impl ProgressStore {
    /// Open the store, creating the local layout if needed.
    pub fn open(paths: StorePaths, sync_container: Option<PathBuf>) -> anyhow::Result<Self> {
        paths.ensure_layout()?;
        Ok(Self {
            paths,
            sync_container,
        })
    }

    /// Read the local snapshot. A missing file is an empty store, not an error.
    pub fn read_local(&self) -> anyhow::Result<Option<ProgressSnapshot>> {
        read_snapshot(&self.paths.progress_file)
    }

    /// Atomically replace the local snapshot while holding the store lock.
    pub fn write_local(&self, snapshot: &ProgressSnapshot) -> anyhow::Result<()> {
        let _guard = lock_file(&self.paths.lock_file)?;
        let json = serde_json::to_string_pretty(snapshot)?;
        write_atomic(&self.paths.progress_file, json.as_bytes())
    }

    /// Location of the remote snapshot, if a container is configured.
    pub fn remote_file(&self) -> Option<PathBuf> {
        self.sync_container.as_deref().map(remote_progress_file)
    }

    /// Read the remote snapshot. Returns `Ok(None)` when no container is
    /// configured or the file does not exist yet.
    pub fn read_remote(&self) -> anyhow::Result<Option<ProgressSnapshot>> {
        match self.remote_file() {
            None => Ok(None),
            Some(path) => read_snapshot(&path),
        }
    }

    /// Write the snapshot into the sync container. Returns `Ok(false)` when
    /// no container is configured.
    pub fn write_remote(&self, snapshot: &ProgressSnapshot) -> anyhow::Result<bool> {
        let Some(path) = self.remote_file() else {
            return Ok(false);
        };
        let json = serde_json::to_string_pretty(snapshot)?;
        write_atomic(&path, json.as_bytes())?;
        Ok(true)
    }
}

fn read_snapshot(path: &Path) -> anyhow::Result<Option<ProgressSnapshot>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

/// Atomic write: write to a temp file in the same dir, then rename.
pub fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("no parent dir for {}", path.display()))?;
    fs::create_dir_all(parent)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

/// File-based exclusive lock guard.
pub struct LockGuard {
    _file: fs::File,
}

/// Acquire an exclusive file lock. Creates the lock file if needed.
pub fn lock_file(path: &Path) -> anyhow::Result<LockGuard> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(path)?;
    file.lock_exclusive()?;
    Ok(LockGuard { _file: file })
}
