//! Snapshot persistence
//!
//! The whole [`LibraryState`] is serialized as a single JSON record under
//! one fixed key. Loading is forgiving: a missing or malformed record
//! means "no prior state" and is logged, never surfaced. Saving is
//! best-effort; a failed write is logged and dropped, and the next
//! committed transition will try again.

use crate::domain::{LibraryState, StateObserver};

use super::kv::{KeyValueStore, StoreError};

/// Fixed key the library snapshot lives under
pub const STORAGE_KEY: &str = "library-lite-data";

/// Loads and saves the library snapshot through a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct SnapshotStore<S: KeyValueStore> {
    backend: S,
}

impl<S: KeyValueStore> SnapshotStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Loads the persisted snapshot, falling back to the empty initial
    /// state on absence or any failure
    pub fn load(&self) -> LibraryState {
        match self.try_load() {
            Ok(Some(state)) => state,
            Ok(None) => LibraryState::default(),
            Err(e) => {
                log::warn!("failed to load library data, starting empty: {}", e);
                LibraryState::default()
            }
        }
    }

    /// Loads the persisted snapshot if one exists
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when the backend read fails or the stored
    /// record does not parse.
    pub fn try_load(&self) -> Result<Option<LibraryState>, StoreError> {
        let Some(raw) = self.backend.get(STORAGE_KEY)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StoreError::Malformed(e.to_string()))
    }

    /// Serializes and stores the full snapshot
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when serialization or the backend write
    /// fails.
    pub fn save(&self, state: &LibraryState) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string(state).map_err(|e| StoreError::Write(e.to_string()))?;
        self.backend.set(STORAGE_KEY, &raw)
    }
}

impl<S: KeyValueStore> StateObserver for SnapshotStore<S> {
    fn state_committed(&self, state: &LibraryState) {
        if let Err(e) = self.save(state) {
            log::warn!("failed to save library data: {}", e);
        }
    }
}
