//! The dispatch seam between the orchestrator and the host store.

use crate::Action;
use std::sync::Arc;

/// A sink for actions.
///
/// Dispatch is synchronous: once `dispatch` returns, the action has been
/// applied. Implementations must apply an [`Action::Batch`] atomically.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, action: Action);
}

impl<D: Dispatch + ?Sized> Dispatch for &D {
    fn dispatch(&self, action: Action) {
        (**self).dispatch(action);
    }
}

impl<D: Dispatch + ?Sized> Dispatch for Arc<D> {
    fn dispatch(&self, action: Action) {
        (**self).dispatch(action);
    }
}
