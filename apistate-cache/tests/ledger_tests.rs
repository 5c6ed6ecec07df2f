use apistate_cache::{ReferenceStatusEntry, ReferenceStatusLedger};
use apistate_types::{BusyStatus, ReferenceStatus, ValidationStatus, WILDCARD_TAG};
use pretty_assertions::assert_eq;

// ── Entry merge ─────────────────────────────────────────────────

#[test]
fn default_entry_is_idle_and_invalid() {
    let entry = ReferenceStatusEntry::default();
    assert!(!entry.is_busy());
    assert!(!entry.is_valid());
}

#[test]
fn merge_full_update_sets_both_fields() {
    let mut entry = ReferenceStatusEntry::default();
    assert!(entry.merge(&ReferenceStatus::new(BusyStatus::Busy, ValidationStatus::Valid)));
    assert_eq!(entry.busy_status, BusyStatus::Busy);
    assert_eq!(entry.validation_status, ValidationStatus::Valid);
}

#[test]
fn busy_only_update_keeps_validation() {
    let mut entry = ReferenceStatusEntry {
        busy_status: BusyStatus::Idle,
        validation_status: ValidationStatus::Valid,
    };
    entry.merge(&ReferenceStatus::busy(BusyStatus::Busy));
    assert_eq!(entry.busy_status, BusyStatus::Busy);
    assert_eq!(entry.validation_status, ValidationStatus::Valid);
}

#[test]
fn validation_only_update_keeps_busy() {
    let mut entry = ReferenceStatusEntry {
        busy_status: BusyStatus::Busy,
        validation_status: ValidationStatus::Invalid,
    };
    entry.merge(&ReferenceStatus::validation(ValidationStatus::Valid));
    assert_eq!(entry.busy_status, BusyStatus::Busy);
    assert_eq!(entry.validation_status, ValidationStatus::Valid);
}

#[test]
fn empty_update_changes_nothing() {
    let mut entry = ReferenceStatusEntry::default();
    assert!(!entry.merge(&ReferenceStatus::default()));
    assert_eq!(entry, ReferenceStatusEntry::default());
}

// ── Ledger ──────────────────────────────────────────────────────

#[test]
fn ledger_starts_empty() {
    let ledger = ReferenceStatusLedger::new();
    assert!(ledger.is_empty());
    assert!(ledger.get("notes", WILDCARD_TAG).is_none());
    assert!(!ledger.is_busy("notes", WILDCARD_TAG));
}

#[test]
fn apply_creates_entry_lazily() {
    let mut ledger = ReferenceStatusLedger::new();
    assert!(ledger.apply("notes", WILDCARD_TAG, &ReferenceStatus::pending()));

    let entry = ledger.collection("notes").unwrap();
    assert!(entry.is_busy());
    assert_eq!(entry.validation_status, ValidationStatus::Invalid);
    assert_eq!(ledger.len(), 1);
}

#[test]
fn apply_same_update_twice_is_idempotent() {
    let mut ledger = ReferenceStatusLedger::new();
    let update = ReferenceStatus::created();

    assert!(ledger.apply("notes", WILDCARD_TAG, &update));
    let first = *ledger.collection("notes").unwrap();

    assert!(!ledger.apply("notes", WILDCARD_TAG, &update));
    assert_eq!(*ledger.collection("notes").unwrap(), first);
    assert_eq!(ledger.len(), 1);
}

#[test]
fn tags_are_tracked_independently() {
    let mut ledger = ReferenceStatusLedger::new();
    ledger.apply("notes", WILDCARD_TAG, &ReferenceStatus::pending());
    ledger.apply("notes", "inbox", &ReferenceStatus::created());

    assert!(ledger.is_busy("notes", WILDCARD_TAG));
    assert!(!ledger.is_busy("notes", "inbox"));

    let mut tags: Vec<_> = ledger.tags("notes").collect();
    tags.sort_unstable();
    assert_eq!(tags, vec!["*", "inbox"]);
    assert_eq!(ledger.len(), 2);
}

#[test]
fn schemas_are_tracked_independently() {
    let mut ledger = ReferenceStatusLedger::new();
    ledger.apply("notes", WILDCARD_TAG, &ReferenceStatus::pending());

    assert!(ledger.is_busy("notes", WILDCARD_TAG));
    assert!(!ledger.is_busy("tasks", WILDCARD_TAG));
    assert_eq!(ledger.tags("tasks").count(), 0);
}

#[test]
fn last_write_wins_per_key() {
    let mut ledger = ReferenceStatusLedger::new();
    ledger.apply("notes", WILDCARD_TAG, &ReferenceStatus::pending());
    ledger.apply("notes", WILDCARD_TAG, &ReferenceStatus::pending());
    ledger.apply("notes", WILDCARD_TAG, &ReferenceStatus::created());

    assert!(!ledger.is_busy("notes", WILDCARD_TAG));
}
