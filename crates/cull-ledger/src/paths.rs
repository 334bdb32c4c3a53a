use std::path::{Path, PathBuf};

/// Well-known locations of the local progress store.
#[derive(Debug, Clone)]
pub struct StorePaths {
    pub root: PathBuf,
    pub progress_file: PathBuf,
    pub lock_file: PathBuf,
}

impl StorePaths {
    /// Derive all paths from a store root. Pure computation, no I/O.
    pub fn discover(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            progress_file: root.join("progress.json"),
            lock_file: root.join("progress.lock"),
            root,
        }
    }

    /// Per-user default root: `<data_dir>/cull/`
    /// (falls back to `~/.cull/`, then a relative dir).
    pub fn default_root() -> PathBuf {
        if let Some(data_dir) = dirs::data_dir() {
            data_dir.join("cull")
        } else if let Some(home) = dirs::home_dir() {
            home.join(".cull")
        } else {
            PathBuf::from(".cull-store")
        }
    }

    /// Create the store directory. Idempotent.
    pub fn ensure_layout(&self) -> anyhow::Result<()> {
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }
}

/// Remote snapshot path inside a synchronized-storage container.
pub fn remote_progress_file(container: &Path) -> PathBuf {
    container.join("Documents").join("cull_progress.json")
}
