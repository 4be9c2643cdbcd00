//! A [`Store`] wired to the bridge that persists it.

use tracing::debug;

use crate::io::bridge::{PersistError, PersistOutcome, PersistenceBridge};
use crate::io::storage::KeyValueStore;
use crate::model::selection::{Filter, TaskOrder};
use crate::store::{Action, Store, Transition};

pub struct Session<S> {
    store: Store,
    bridge: PersistenceBridge<S>,
}

impl<S: KeyValueStore> Session<S> {
    /// Load the stored collection and start a store from it
    pub fn open(bridge: PersistenceBridge<S>) -> Self {
        let initial = bridge.load();
        Session {
            store: Store::new(initial),
            bridge,
        }
    }

    /// Session over an already-built store. Nothing is loaded.
    pub fn from_parts(store: Store, bridge: PersistenceBridge<S>) -> Self {
        Session { store, bridge }
    }

    pub fn with_view(mut self, filter: Filter, order: TaskOrder) -> Self {
        self.store = self.store.with_filter(filter).with_order(order);
        self
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn bridge(&self) -> &PersistenceBridge<S> {
        &self.bridge
    }

    /// Dispatch `action`, then persist if the stored document changed.
    /// Entering, drafting and cancelling an edit write nothing.
    ///
    /// The write completes before this returns, so the next action always
    /// folds over a state that is already on disk.
    pub fn apply(&mut self, action: Action) -> Result<Transition, PersistError> {
        let transition = self.store.dispatch(action);
        if transition.stored_changed {
            self.persist()?;
        }
        Ok(transition)
    }

    /// Write the current snapshot through the bridge
    pub fn persist(&mut self) -> Result<PersistOutcome, PersistError> {
        let outcome = self.bridge.persist(self.store.snapshot())?;
        debug!(?outcome, "persisted");
        Ok(outcome)
    }

    pub fn into_parts(self) -> (Store, PersistenceBridge<S>) {
        (self.store, self.bridge)
    }
}
