//! Store configuration.

use std::path::PathBuf;

/// Storage key of the current snapshot layout. Changing it abandons older saves.
pub const DEFAULT_STORAGE_KEY: &str = "valueon-calculator-data-v7";

/// Directory snapshots are written to when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = ".valueon";

/// Where snapshots live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply `VALUEON_DATA_DIR` and `VALUEON_STORAGE_KEY` when set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var("VALUEON_DATA_DIR") {
            if !dir.trim().is_empty() {
                self.data_dir = PathBuf::from(dir);
            }
        }

        if let Ok(key) = std::env::var("VALUEON_STORAGE_KEY") {
            if !key.trim().is_empty() {
                self.storage_key = key;
            }
        }

        self
    }

    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Path of the snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.storage_key))
    }
}
