//! Resource cache for apistate.
//!
//! The cache is the reducer side of the create lifecycle. It understands the
//! derived actions emitted by `apistate-client` and keeps two pieces of
//! state:
//!
//! - **Objects**: returned resources, normalized by schema and id
//! - **Reference status**: busy and validation flags per `(schema, tag)`
//!
//! # Atomicity
//!
//! [`CacheStore`] applies every dispatched action, including a whole
//! [`apistate_types::BatchedAction`], under a single write lock. Readers and
//! listeners never observe a batch half-applied, and a batch with a
//! constituent that cannot be applied (a created object without an id, for
//! instance) is rejected whole.

mod error;
mod ledger;
mod objects;
mod store;

pub use error::{CacheError, CacheResult};
pub use ledger::{ReferenceStatusEntry, ReferenceStatusLedger};
pub use objects::ObjectStore;
pub use store::{CacheState, CacheStore, Listener};
