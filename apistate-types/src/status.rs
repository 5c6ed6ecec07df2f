//! Collection status values tracked per `(schema, tag)`.

use serde::{Deserialize, Serialize};

/// Tag for the unscoped, whole-collection status entry.
pub const WILDCARD_TAG: &str = "*";

/// Whether an operation is in flight against a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusyStatus {
    Busy,
    Idle,
}

/// Whether the cached view of a collection is certified fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationStatus {
    Valid,
    Invalid,
}

/// A status update. Absent fields leave the stored value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub busy_status: Option<BusyStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_status: Option<ValidationStatus>,
}

impl ReferenceStatus {
    /// An update that sets both fields.
    pub const fn new(busy_status: BusyStatus, validation_status: ValidationStatus) -> Self {
        Self {
            busy_status: Some(busy_status),
            validation_status: Some(validation_status),
        }
    }

    /// An update that only touches the busy flag.
    pub const fn busy(busy_status: BusyStatus) -> Self {
        Self {
            busy_status: Some(busy_status),
            validation_status: None,
        }
    }

    /// An update that only touches the validation flag.
    pub const fn validation(validation_status: ValidationStatus) -> Self {
        Self {
            busy_status: None,
            validation_status: Some(validation_status),
        }
    }

    /// Status applied when a create is issued.
    pub const fn pending() -> Self {
        Self::new(BusyStatus::Busy, ValidationStatus::Invalid)
    }

    /// Status applied when a create succeeds. A single create does not
    /// certify the whole collection, so validation stays invalid.
    pub const fn created() -> Self {
        Self::new(BusyStatus::Idle, ValidationStatus::Invalid)
    }
}
