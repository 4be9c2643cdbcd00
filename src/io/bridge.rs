use tracing::{debug, info, warn};

use crate::io::storage::{KeyValueStore, StorageError};
use crate::model::config::DEFAULT_STORAGE_KEY;
use crate::model::snapshot::Snapshot;

/// Error type for writing a snapshot back to storage
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("could not serialize task lists: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Why a stored value could not be turned into a snapshot
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("stored task lists are malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    Written,
    /// Nothing written: an empty collection never replaces stored data
    SkippedEmpty,
}

/// Moves snapshots between memory and a single storage key
pub struct PersistenceBridge<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStore> PersistenceBridge<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        PersistenceBridge {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Stored snapshot, `None` when the key was never written
    pub fn try_load(&self) -> Result<Option<Snapshot>, LoadError> {
        let Some(text) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        Ok(Some(decode(&text)?))
    }

    /// Initial snapshot for a new session.
    ///
    /// Missing, unreadable or malformed data all come back as the empty
    /// collection; failures are logged, never returned.
    #[tracing::instrument(skip(self), fields(key = %self.key))]
    pub fn load(&self) -> Snapshot {
        match self.try_load() {
            Ok(Some(snapshot)) => {
                info!(lists = snapshot.len(), "loaded task lists");
                snapshot
            }
            Ok(None) => {
                debug!("no stored task lists");
                Snapshot::default()
            }
            Err(e) => {
                warn!(error = %e, "failed to load task lists, starting empty");
                Snapshot::default()
            }
        }
    }

    /// Write `state` under the key unless it is empty
    #[tracing::instrument(skip(self, state), fields(key = %self.key, lists = state.len()))]
    pub fn persist(&mut self, state: &Snapshot) -> Result<PersistOutcome, PersistError> {
        if state.is_empty() {
            debug!("empty collection, not persisting");
            return Ok(PersistOutcome::SkippedEmpty);
        }
        let text = encode(state)?;
        self.storage.set(&self.key, &text)?;
        Ok(PersistOutcome::Written)
    }
}

/// Serialize a snapshot to the storage document
pub fn encode(state: &Snapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

/// Parse the storage document, rehydrating due dates
pub fn decode(text: &str) -> Result<Snapshot, serde_json::Error> {
    serde_json::from_str(text)
}
