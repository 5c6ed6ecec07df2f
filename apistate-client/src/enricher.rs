//! Phase metadata for one operation.
//!
//! The timestamp is captured once and copied into all three metas, which is
//! what lets consumers join the request, success and error actions of one
//! operation.

use apistate_types::{PhaseMeta, RequestTimestamp};
use serde_json::{Map, Value};

/// The request, success and error metas of one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseMetas {
    pub request: PhaseMeta,
    pub success: PhaseMeta,
    pub error: PhaseMeta,
}

impl PhaseMetas {
    /// Captures a fresh timestamp and builds the three metas.
    pub fn capture(
        schema: &str,
        tag: Option<&str>,
        transformation: Option<&Map<String, Value>>,
    ) -> Self {
        Self::at(schema, RequestTimestamp::now(), tag, transformation)
    }

    /// Builds the three metas at a fixed timestamp.
    pub fn at(
        schema: &str,
        timestamp: RequestTimestamp,
        tag: Option<&str>,
        transformation: Option<&Map<String, Value>>,
    ) -> Self {
        let mut meta = PhaseMeta::new(schema, timestamp);
        if let Some(tag) = tag {
            meta = meta.with_tag(tag);
        }
        if let Some(transformation) = transformation {
            meta = meta.with_transformation(transformation.clone());
        }
        Self {
            request: meta.clone(),
            success: meta.clone(),
            error: meta,
        }
    }

    /// The shared correlation timestamp.
    pub fn timestamp(&self) -> RequestTimestamp {
        self.request.timestamp
    }
}
