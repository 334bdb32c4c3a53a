//! Host configuration, loaded from an optional JSON file.

use crate::paths::StorePaths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Override for the local store root; defaults to the per-user data dir.
    pub data_dir: Option<PathBuf>,
    /// Synchronized-storage container for cross-device progress sync.
    /// `None` disables remote sync entirely.
    pub sync_container: Option<PathBuf>,
    /// How long transient action feedback stays visible, in milliseconds.
    pub feedback_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            sync_container: None,
            feedback_timeout_ms: 2000,
        }
    }
}

impl Config {
    /// Read config from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        crate::store::write_atomic(path, json.as_bytes())
    }

    /// Resolve the local store layout from this config.
    pub fn store_paths(&self) -> StorePaths {
        match &self.data_dir {
            Some(dir) => StorePaths::discover(dir.clone()),
            None => StorePaths::discover(StorePaths::default_root()),
        }
    }

    pub fn feedback_timeout(&self) -> Duration {
        Duration::from_millis(self.feedback_timeout_ms)
    }
}
