//! Auto-saving editing session.

use tracing::{debug, info, warn};

use valueon_core::{analyze, apply, default_inputs, AnalysisInputs, AnalysisResult, InputAction};

use crate::error::StoreResult;
use crate::snapshot::{decode_snapshot, SnapshotEnvelope};
use crate::store::SnapshotStore;

/// Holds the current snapshot and writes it back to the store after every
/// change.
///
/// Storage problems never interrupt editing: a snapshot that cannot be read
/// starts the session from defaults, and a failed save is only logged.
pub struct Session<S: SnapshotStore> {
    store: S,
    inputs: AnalysisInputs,
}

impl<S: SnapshotStore> Session<S> {
    /// Restore the saved snapshot, or start from defaults.
    pub fn open(store: S) -> Self {
        let inputs = match store.load_raw() {
            Ok(Some(content)) => match decode_snapshot(&content) {
                Ok(inputs) => {
                    info!("Restored saved snapshot");
                    inputs
                }
                Err(e) => {
                    warn!("Failed to load saved data, starting from defaults: {}", e);
                    default_inputs()
                }
            },
            Ok(None) => {
                debug!("No saved snapshot, starting from defaults");
                default_inputs()
            }
            Err(e) => {
                warn!("Failed to read saved data, starting from defaults: {}", e);
                default_inputs()
            }
        };

        Self { store, inputs }
    }

    pub fn inputs(&self) -> &AnalysisInputs {
        &self.inputs
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply an action and save the resulting snapshot if it changed.
    pub fn dispatch(&mut self, action: InputAction) -> &AnalysisInputs {
        debug!("Dispatching {:?}", action);
        let next = apply(&self.inputs, action);
        if next != self.inputs {
            self.inputs = next;
            self.autosave();
        }
        &self.inputs
    }

    /// Replace the whole snapshot, e.g. with an imported document.
    pub fn replace(&mut self, inputs: AnalysisInputs) {
        self.inputs = inputs;
        self.autosave();
    }

    /// Analysis of the current snapshot.
    pub fn result(&self) -> AnalysisResult {
        analyze(&self.inputs)
    }

    /// Return to defaults and forget the saved snapshot.
    pub fn reset(&mut self) {
        self.inputs = default_inputs();
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear saved data: {}", e);
        }
    }

    /// Save the current snapshot, reporting failures to the caller.
    pub fn save(&self) -> StoreResult<()> {
        let content = SnapshotEnvelope::new(self.inputs.clone()).to_json()?;
        self.store.save_raw(&content)
    }

    fn autosave(&self) {
        if let Err(e) = self.save() {
            warn!("Failed to save snapshot: {}", e);
        }
    }
}
