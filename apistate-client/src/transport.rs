//! Transport abstraction.
//!
//! A [`Transport`] executes a [`RequestDescriptor`] and yields either the
//! parsed response document or a [`TransportError`]. The lifecycle awaits
//! exactly one such call per operation.

use crate::config::HttpTransportConfig;
use crate::descriptor::RequestDescriptor;
use crate::error::{TransportError, TransportResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Executes create requests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the response document.
    async fn execute(&self, request: &RequestDescriptor) -> TransportResult<Value>;
}

/// HTTP transport backed by reqwest.
pub struct HttpTransport {
    config: HttpTransportConfig,
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with its own HTTP client.
    pub fn new(config: HttpTransportConfig) -> TransportResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &HttpTransportConfig {
        &self.config
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &RequestDescriptor) -> TransportResult<Value> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.endpoint.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(classify)?;
        let status = response.status();
        let text = response.text().await.map_err(classify)?;
        debug!(
            endpoint = %request.endpoint,
            status = status.as_u16(),
            bytes = text.len(),
            "Received response"
        );

        let document = if text.trim().is_empty() {
            None
        } else {
            serde_json::from_str::<Value>(&text).ok()
        };

        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
                response: document,
            });
        }

        match document {
            Some(document) => Ok(document),
            None if text.trim().is_empty() => Ok(Value::Null),
            None => Err(TransportError::InvalidResponse(
                "response body is not JSON".into(),
            )),
        }
    }
}

fn classify(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(err.to_string())
    }
}
