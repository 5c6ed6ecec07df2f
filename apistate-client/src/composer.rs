//! Status batch composition.
//!
//! [`StatusBatchComposer`] derives the cache-mutation batch for a phase
//! action. [`ApiStateMiddleware`] sits in front of a dispatcher and sends that
//! batch ahead of the phase action itself:
//!
//! | Phase | Batch, in order |
//! |---|---|
//! | request | status `*` busy, invalid |
//! | success | object created, status `*` idle, invalid |
//! | error | none |
//!
//! The error phase leaves the busy flag set. Clearing it is up to the
//! caller, see [`apistate_types::Action::reference_status`].

use apistate_types::{
    Action, BatchedAction, Dispatch, PhaseMeta, ReferenceStatus, WILDCARD_TAG,
};
use serde_json::Value;
use tracing::debug;

/// Derives status batches from phase actions.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusBatchComposer;

impl StatusBatchComposer {
    pub fn new() -> Self {
        Self
    }

    /// Returns the batch to dispatch before `action`, if any.
    pub fn compose(&self, action: &Action) -> Option<BatchedAction> {
        match action {
            Action::CreateRequest { meta } => Some(BatchedAction::wrap([status_update(
                meta,
                ReferenceStatus::pending(),
            )])),
            Action::CreateSuccess { payload, meta } => Some(BatchedAction::wrap([
                object_created(payload, meta),
                status_update(meta, ReferenceStatus::created()),
            ])),
            _ => None,
        }
    }
}

fn status_update(meta: &PhaseMeta, status: ReferenceStatus) -> Action {
    Action::ReferenceStatus {
        payload: status,
        meta: PhaseMeta {
            tag: Some(WILDCARD_TAG.to_string()),
            transformation: None,
            ..meta.clone()
        },
    }
}

fn object_created(document: &Value, meta: &PhaseMeta) -> Action {
    Action::ObjectCreated {
        payload: document.get("data").cloned().unwrap_or(Value::Null),
        meta: PhaseMeta {
            tag: None,
            transformation: Some(meta.transformation.clone().unwrap_or_default()),
            ..meta.clone()
        },
    }
}

/// Dispatches the composed batch, then the incoming action, to `next`.
#[derive(Debug)]
pub struct ApiStateMiddleware<D> {
    next: D,
    composer: StatusBatchComposer,
}

impl<D: Dispatch> ApiStateMiddleware<D> {
    pub fn new(next: D) -> Self {
        Self {
            next,
            composer: StatusBatchComposer::new(),
        }
    }

    /// The wrapped dispatcher.
    pub fn inner(&self) -> &D {
        &self.next
    }
}

impl<D: Dispatch> Dispatch for ApiStateMiddleware<D> {
    fn dispatch(&self, action: Action) {
        if let Some(batch) = self.composer.compose(&action) {
            debug!(
                phase = %action.action_type(),
                size = batch.len(),
                "Dispatching status batch"
            );
            self.next.dispatch(batch.into());
        }
        self.next.dispatch(action);
    }
}
