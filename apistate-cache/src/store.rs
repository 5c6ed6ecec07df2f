//! The cache reducer and its dispatch-facing store.

use crate::error::CacheResult;
use crate::ledger::ReferenceStatusLedger;
use crate::objects::ObjectStore;
use apistate_types::{Action, Dispatch, PhaseMeta, WILDCARD_TAG};
use serde_json::{Map, Value};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, warn};

/// Callback invoked after a dispatched action has been fully applied.
///
/// Listeners run while the store's write lock is still held, so the state
/// they see is exactly the state right after that action. They must not
/// dispatch into or read from the same store.
pub type Listener = Arc<dyn Fn(&CacheState, &Action) + Send + Sync>;

/// Cache contents: stored objects plus the reference-status ledger.
#[derive(Debug, Clone, Default)]
pub struct CacheState {
    pub objects: ObjectStore,
    pub ledger: ReferenceStatusLedger,
}

impl CacheState {
    /// Creates an empty cache state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one action. A batch is all-or-nothing: if any constituent
    /// cannot be applied, the whole batch is rejected and logged and the
    /// state is left untouched.
    ///
    /// Returns true if the state changed.
    pub fn reduce(&mut self, action: &Action) -> bool {
        match self.try_reduce(action) {
            Ok(changed) => changed,
            Err(e) => {
                warn!(action = %action.action_type(), "Rejected action: {}", e);
                false
            }
        }
    }

    /// Like [`CacheState::reduce`], but returns the reason a rejected action
    /// could not be applied.
    pub fn try_reduce(&mut self, action: &Action) -> CacheResult<bool> {
        check(action)?;
        Ok(self.apply(action))
    }

    fn apply(&mut self, action: &Action) -> bool {
        match action {
            Action::ReferenceStatus { payload, meta } => {
                let tag = meta.tag.as_deref().unwrap_or(WILDCARD_TAG);
                let changed = self.ledger.apply(&meta.schema, tag, payload);
                debug!(
                    schema = %meta.schema,
                    tag,
                    changed,
                    "Applied reference status {:?}",
                    payload
                );
                changed
            }
            Action::ObjectCreated { payload, meta } => self.insert_object(payload, meta),
            Action::Batch { payload } => {
                let mut changed = false;
                for inner in payload {
                    changed |= self.apply(inner);
                }
                changed
            }
            Action::CreateRequest { .. }
            | Action::CreateSuccess { .. }
            | Action::CreateError { .. } => false,
        }
    }

    fn insert_object(&mut self, payload: &Value, meta: &PhaseMeta) -> bool {
        let empty = Map::new();
        let transformation = meta.transformation.as_ref().unwrap_or(&empty);
        match self
            .objects
            .insert(&meta.schema, payload.clone(), transformation)
        {
            Ok(id) => {
                debug!(schema = %meta.schema, id = %id, "Stored created object");
                true
            }
            Err(e) => {
                warn!("Skipping created object: {}", e);
                false
            }
        }
    }
}

/// Verifies that every constituent of `action` can be applied.
fn check(action: &Action) -> CacheResult<()> {
    match action {
        Action::ObjectCreated { payload, meta } => {
            ObjectStore::object_id(&meta.schema, payload).map(drop)
        }
        Action::Batch { payload } => payload.iter().try_for_each(check),
        _ => Ok(()),
    }
}

/// A [`Dispatch`] implementation backed by [`CacheState`].
///
/// Each dispatch, including a whole batch, is applied under one write lock.
#[derive(Default)]
pub struct CacheStore {
    state: RwLock<CacheState>,
    listeners: RwLock<Vec<Listener>>,
}

impl CacheStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener called after every dispatch.
    pub fn subscribe(&self, listener: impl Fn(&CacheState, &Action) + Send + Sync + 'static) {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Runs `f` against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&CacheState) -> R) -> R {
        f(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> CacheState {
        self.read(CacheState::clone)
    }
}

impl Dispatch for CacheStore {
    fn dispatch(&self, action: Action) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.reduce(&action);

        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in &listeners {
            listener(&*state, &action);
        }
    }
}

impl std::fmt::Debug for CacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
