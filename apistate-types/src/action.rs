//! Actions dispatched to the resource cache.
//!
//! Three of these are lifecycle phases of a create operation
//! (`CreateRequest`, `CreateSuccess`, `CreateError`). The rest are derived
//! cache-mutation events (`ObjectCreated`, `ReferenceStatus`) and the batch
//! envelope that groups them.

use crate::{BatchedAction, PhaseMeta, ReferenceStatus, RequestTimestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Discriminator for [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    CreateRequest,
    CreateSuccess,
    CreateError,
    ObjectCreated,
    ReferenceStatus,
    Batch,
}

impl ActionType {
    /// Returns the wire name of this action type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateRequest => "CREATE_REQUEST",
            Self::CreateSuccess => "CREATE_SUCCESS",
            Self::CreateError => "CREATE_ERROR",
            Self::ObjectCreated => "OBJECT_CREATED",
            Self::ReferenceStatus => "REFERENCE_STATUS",
            Self::Batch => "BATCH",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure detail carried by the error phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailurePayload {
    /// Human-readable reason.
    pub message: String,
    /// HTTP status, when the server answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Parsed response body, when there was one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
}

impl FailurePayload {
    /// Creates a payload with only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            response: None,
        }
    }
}

/// An action the cache understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// The request phase: the create has been issued.
    CreateRequest { meta: PhaseMeta },

    /// The success phase. `payload` is the full response document.
    CreateSuccess { payload: Value, meta: PhaseMeta },

    /// The error phase.
    CreateError {
        payload: FailurePayload,
        meta: PhaseMeta,
    },

    /// A resource returned by the server, to be stored in the cache.
    /// `payload` is the document's `data` member.
    ObjectCreated { payload: Value, meta: PhaseMeta },

    /// A status update for `(meta.schema, meta.tag)`.
    ReferenceStatus {
        payload: ReferenceStatus,
        meta: PhaseMeta,
    },

    /// Derived actions applied as one unit.
    Batch { payload: BatchedAction },
}

impl Action {
    /// Builds a status update for `(schema, tag)`.
    ///
    /// Callers use this to clear a collection's busy flag after an error
    /// settlement, which the create lifecycle deliberately leaves alone.
    pub fn reference_status(
        schema: impl Into<String>,
        tag: impl Into<String>,
        timestamp: RequestTimestamp,
        status: ReferenceStatus,
    ) -> Self {
        Self::ReferenceStatus {
            payload: status,
            meta: PhaseMeta::new(schema, timestamp).with_tag(tag),
        }
    }

    /// Returns the discriminator for this action.
    pub fn action_type(&self) -> ActionType {
        match self {
            Self::CreateRequest { .. } => ActionType::CreateRequest,
            Self::CreateSuccess { .. } => ActionType::CreateSuccess,
            Self::CreateError { .. } => ActionType::CreateError,
            Self::ObjectCreated { .. } => ActionType::ObjectCreated,
            Self::ReferenceStatus { .. } => ActionType::ReferenceStatus,
            Self::Batch { .. } => ActionType::Batch,
        }
    }

    /// Returns the action's meta. Batches carry none.
    pub fn meta(&self) -> Option<&PhaseMeta> {
        match self {
            Self::CreateRequest { meta }
            | Self::CreateSuccess { meta, .. }
            | Self::CreateError { meta, .. }
            | Self::ObjectCreated { meta, .. }
            | Self::ReferenceStatus { meta, .. } => Some(meta),
            Self::Batch { .. } => None,
        }
    }

    /// Returns true for the error phase.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::CreateError { .. })
    }

    /// Returns the batch if this is one.
    pub fn as_batch(&self) -> Option<&BatchedAction> {
        match self {
            Self::Batch { payload } => Some(payload),
            _ => None,
        }
    }
}

impl From<BatchedAction> for Action {
    fn from(batch: BatchedAction) -> Self {
        Self::Batch { payload: batch }
    }
}
