//! Reference-status ledger.
//!
//! Tracks busy and validation flags per `(schema, tag)`. Entries are created
//! lazily on the first update for a key and are never removed here.
//! Updates are field-level merges: a busy-only update keeps the stored
//! validation flag and vice versa.

use apistate_types::{BusyStatus, ReferenceStatus, ValidationStatus, WILDCARD_TAG};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Stored status for one `(schema, tag)` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceStatusEntry {
    pub busy_status: BusyStatus,
    pub validation_status: ValidationStatus,
}

impl Default for ReferenceStatusEntry {
    fn default() -> Self {
        Self {
            busy_status: BusyStatus::Idle,
            validation_status: ValidationStatus::Invalid,
        }
    }
}

impl ReferenceStatusEntry {
    /// Merges the fields present in `update`. Returns true if anything changed.
    pub fn merge(&mut self, update: &ReferenceStatus) -> bool {
        let before = *self;
        if let Some(busy) = update.busy_status {
            self.busy_status = busy;
        }
        if let Some(validation) = update.validation_status {
            self.validation_status = validation;
        }
        before != *self
    }

    pub fn is_busy(&self) -> bool {
        self.busy_status == BusyStatus::Busy
    }

    pub fn is_valid(&self) -> bool {
        self.validation_status == ValidationStatus::Valid
    }
}

/// Status entries keyed by schema, then tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceStatusLedger {
    entries: BTreeMap<String, HashMap<String, ReferenceStatusEntry>>,
}

impl ReferenceStatusLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a status update to `(schema, tag)`, creating the entry if
    /// needed. Returns true if the stored entry changed.
    ///
    /// Applying the same update twice is a no-op the second time.
    pub fn apply(&mut self, schema: &str, tag: &str, update: &ReferenceStatus) -> bool {
        let tags = self.entries.entry(schema.to_string()).or_default();
        match tags.get_mut(tag) {
            Some(entry) => entry.merge(update),
            None => {
                let mut entry = ReferenceStatusEntry::default();
                entry.merge(update);
                tags.insert(tag.to_string(), entry);
                true
            }
        }
    }

    /// Gets the entry for `(schema, tag)`.
    pub fn get(&self, schema: &str, tag: &str) -> Option<&ReferenceStatusEntry> {
        self.entries.get(schema).and_then(|tags| tags.get(tag))
    }

    /// Gets the whole-collection entry for `schema`.
    pub fn collection(&self, schema: &str) -> Option<&ReferenceStatusEntry> {
        self.get(schema, WILDCARD_TAG)
    }

    /// Returns whether `(schema, tag)` is marked busy. Unknown keys are idle.
    pub fn is_busy(&self, schema: &str, tag: &str) -> bool {
        self.get(schema, tag).is_some_and(ReferenceStatusEntry::is_busy)
    }

    /// Returns the tags tracked for `schema`.
    pub fn tags(&self, schema: &str) -> impl Iterator<Item = &str> {
        self.entries
            .get(schema)
            .into_iter()
            .flat_map(|tags| tags.keys().map(String::as_str))
    }

    /// Number of `(schema, tag)` entries.
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
