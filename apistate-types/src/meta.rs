//! Correlation metadata shared by the phases of one operation.

use crate::RequestTimestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Source tag stamped on every action produced by this library.
pub const JSON_API_SOURCE: &str = "@@apistate/JSON_API";

/// Metadata attached to each phase action.
///
/// `source`, `schema` and `timestamp` are correlation keys: the request,
/// success and error phases of one operation carry identical values, so a
/// consumer can join them from meta alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseMeta {
    /// Always [`JSON_API_SOURCE`] for actions built here.
    pub source: String,
    /// The resource collection.
    pub schema: String,
    /// When the operation was built.
    pub timestamp: RequestTimestamp,
    /// Status scope within the schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Attribute rename map applied when storing returned objects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformation: Option<Map<String, Value>>,
}

impl PhaseMeta {
    /// Creates meta for `schema` at `timestamp`.
    pub fn new(schema: impl Into<String>, timestamp: RequestTimestamp) -> Self {
        Self {
            source: JSON_API_SOURCE.to_string(),
            schema: schema.into(),
            timestamp,
            tag: None,
            transformation: None,
        }
    }

    /// Sets the status tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Sets the transformation map.
    pub fn with_transformation(mut self, transformation: Map<String, Value>) -> Self {
        self.transformation = Some(transformation);
        self
    }

    /// Returns true if both metas describe the same logical operation.
    pub fn correlates_with(&self, other: &Self) -> bool {
        self.source == other.source
            && self.schema == other.schema
            && self.timestamp == other.timestamp
    }
}
