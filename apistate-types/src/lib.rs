//! Core type definitions for apistate.
//!
//! This crate defines the plain data exchanged between the create-lifecycle
//! orchestrator and the resource cache:
//! - Caller input ([`Item`], [`BodyInput`]) and the `{ "data": ... }` envelope
//! - Correlation metadata stamped on every phase ([`PhaseMeta`])
//! - Collection status values ([`BusyStatus`], [`ValidationStatus`])
//! - The actions dispatched to the cache, including the batch envelope
//! - The [`Dispatch`] seam implemented by whatever store hosts the cache
//!
//! Nothing here performs I/O. Transport and reducer logic live in
//! `apistate-client` and `apistate-cache` respectively.

mod action;
mod batch;
mod dispatch;
mod item;
mod meta;
mod status;
mod timestamp;

pub use action::{Action, ActionType, FailurePayload};
pub use batch::BatchedAction;
pub use dispatch::Dispatch;
pub use item::{BodyInput, Document, Item};
pub use meta::{PhaseMeta, JSON_API_SOURCE};
pub use status::{BusyStatus, ReferenceStatus, ValidationStatus, WILDCARD_TAG};
pub use timestamp::RequestTimestamp;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid item: {0}")]
    InvalidItem(String),
}
