//! Request and transport configuration.

use crate::error::{ActionError, ActionResult};
use apistate_types::BodyInput;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Per-request configuration supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Target URL.
    pub endpoint: String,
    /// Request headers, conventionally including
    /// `Content-Type: application/vnd.api+json`.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Final body used when no item argument is given. Sent as-is, never
    /// wrapped in a document envelope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<BodyInput>,
    /// Status tag carried on the phase metas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Attribute rename map applied when the created object is stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transformation: Option<Map<String, Value>>,
}

impl RequestConfig {
    /// Creates a config targeting `endpoint`.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<BodyInput>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_transformation(mut self, transformation: Map<String, Value>) -> Self {
        self.transformation = Some(transformation);
        self
    }
}

impl TryFrom<&Value> for RequestConfig {
    type Error = ActionError;

    /// Reads a loosely-typed config object.
    ///
    /// `body` is kept verbatim: a string is used as the body text and an
    /// object is serialized unchanged. Header values that are not strings
    /// are rendered as JSON.
    fn try_from(value: &Value) -> ActionResult<Self> {
        let Value::Object(fields) = value else {
            return Err(ActionError::Config);
        };

        let endpoint = fields
            .get("endpoint")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        let headers = fields
            .get("headers")
            .and_then(Value::as_object)
            .map(|headers| {
                headers
                    .iter()
                    .map(|(k, v)| {
                        let v = v.as_str().map_or_else(|| v.to_string(), str::to_string);
                        (k.clone(), v)
                    })
                    .collect()
            })
            .unwrap_or_default();

        let body = match fields.get("body") {
            None | Some(Value::Null) => None,
            Some(Value::String(raw)) => Some(BodyInput::Raw(raw.clone())),
            Some(body) if body.is_object() => Some(BodyInput::Raw(body.to_string())),
            Some(_) => return Err(ActionError::Item),
        };

        Ok(Self {
            endpoint,
            headers,
            body,
            tag: fields.get("tag").and_then(Value::as_str).map(str::to_string),
            transformation: fields.get("transformation").and_then(Value::as_object).cloned(),
        })
    }
}

/// Configuration for [`crate::HttpTransport`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpTransportConfig {
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("apistate/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
