//! Raw snapshot storage backends.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::StoreConfig;
use crate::error::StoreResult;

/// Key-value slot holding one serialized snapshot.
#[cfg_attr(test, mockall::automock)]
pub trait SnapshotStore {
    /// Read the stored document, `None` when nothing has been saved yet.
    fn load_raw(&self) -> StoreResult<Option<String>>;

    /// Replace the stored document.
    fn save_raw(&self, content: &str) -> StoreResult<()>;

    /// Remove the stored document. Clearing an empty store succeeds.
    fn clear(&self) -> StoreResult<()>;
}

/// Stores the snapshot as a JSON file under the configured data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            path: config.snapshot_path(),
        }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load_raw(&self) -> StoreResult<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        debug!("Loaded snapshot from {:?}", self.path);
        Ok(Some(content))
    }

    fn save_raw(&self, content: &str) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, content)?;
        debug!("Saved snapshot to {:?}", self.path);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            debug!("Removed snapshot {:?}", self.path);
        }
        Ok(())
    }
}
