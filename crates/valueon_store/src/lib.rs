//! # valueon_store
//!
//! Persistence for Valueon input snapshots.
//!
//! A [`Session`] keeps the snapshot being edited and saves it through a
//! [`SnapshotStore`] after every change. Restored documents are merged onto
//! the current defaults so fields added since the save are filled in.

pub mod config;
pub mod error;
pub mod session;
pub mod snapshot;
pub mod store;

pub use config::{StoreConfig, DEFAULT_DATA_DIR, DEFAULT_STORAGE_KEY};
pub use error::{StoreError, StoreResult};
pub use session::Session;
pub use snapshot::{decode_snapshot, merge_entities, merge_with_defaults, SnapshotEnvelope, SNAPSHOT_VERSION};
pub use store::{JsonFileStore, SnapshotStore};
