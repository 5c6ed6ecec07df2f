//! The batch envelope.
//!
//! A [`BatchedAction`] is an ordered group of derived actions that a reducer
//! must apply as one unit: observers see either none of them or all of them,
//! in sequence order.

use crate::Action;
use serde::{Deserialize, Serialize};

/// An ordered, indivisible group of actions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchedAction(Vec<Action>);

impl BatchedAction {
    /// Wraps `actions` in their given order.
    pub fn wrap(actions: impl IntoIterator<Item = Action>) -> Self {
        Self(actions.into_iter().collect())
    }

    /// The constituent actions, in application order.
    pub fn actions(&self) -> &[Action] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Action> {
        self.0.iter()
    }

    /// Returns every non-batch action in application order, descending into
    /// nested batches.
    pub fn flatten(&self) -> Vec<&Action> {
        let mut out = Vec::with_capacity(self.0.len());
        for action in &self.0 {
            match action {
                Action::Batch { payload } => out.extend(payload.flatten()),
                other => out.push(other),
            }
        }
        out
    }
}

impl IntoIterator for BatchedAction {
    type Item = Action;
    type IntoIter = std::vec::IntoIter<Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BatchedAction {
    type Item = &'a Action;
    type IntoIter = std::slice::Iter<'a, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
