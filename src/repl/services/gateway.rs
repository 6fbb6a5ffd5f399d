//! # Request Gateway
//!
//! Wraps the two outbound JSON endpoints and decides, once, whether a call
//! succeeded, failed in transport, or was refused by the service.

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Failure of a gateway call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// No HTTP response was obtained, or its body was not JSON
    #[error("could not reach the service: {0}")]
    Network(String),
    /// The body was JSON but did not have the expected shape
    #[error("malformed response: {0}")]
    Malformed(String),
    /// The service reported an error in the payload
    #[error("{0}")]
    Application(String),
}

impl RequestError {
    /// True for failures shown to the user as a generic connectivity problem
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Malformed(_))
    }
}

/// The service endpoints this client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Analyze,
    Chat,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Analyze => "/analyze",
            Self::Chat => "/chat",
        }
    }
}

/// Outbound call seam used by the controllers' dispatcher
#[async_trait]
pub trait Gateway: Send + Sync {
    /// POST `payload` as JSON to `endpoint` and classify the outcome
    async fn send(&self, endpoint: Endpoint, payload: Value) -> Result<Value, RequestError>;
}

/// HTTP implementation of [`Gateway`] backed by reqwest
#[derive(Debug, Clone)]
pub struct RequestGateway {
    client: Client,
    base_url: Url,
}

impl RequestGateway {
    /// Create a gateway whose every request is bounded by `timeout`
    pub fn new(base_url: Url, timeout: Duration) -> anyhow::Result<Self> {
        tracing::debug!("Creating RequestGateway for {base_url} with timeout {timeout:?}");
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, RequestError> {
        self.base_url
            .join(endpoint.path())
            .map_err(|e| RequestError::Network(format!("invalid endpoint URL: {e}")))
    }
}

#[async_trait]
impl Gateway for RequestGateway {
    async fn send(&self, endpoint: Endpoint, payload: Value) -> Result<Value, RequestError> {
        let url = self.endpoint_url(endpoint)?;
        tracing::info!("POST {url}");

        let response = self
            .client
            .post(url.clone())
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Request to {url} failed: {e}");
                RequestError::Network(e.to_string())
            })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| RequestError::Network(format!("failed to read response body: {e}")))?;

        // Status codes carry no meaning here; only the body decides.
        let decoded: Value = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!("Response from {url} ({status}) is not JSON: {e}");
            RequestError::Network(format!("response is not JSON: {e}"))
        })?;

        if let Some(message) = error_message(&decoded) {
            tracing::info!("Service reported error ({status}): {message}");
            return Err(RequestError::Application(message));
        }

        tracing::debug!("Response from {url}: {status}");
        Ok(decoded)
    }
}

/// Extract a truthy `error` field from a decoded payload
pub fn error_message(payload: &Value) -> Option<String> {
    match payload.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) if message.is_empty() => None,
        Value::String(message) => Some(message.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}
