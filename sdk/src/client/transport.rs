//! The seam between `NodeClient` and the network.
//!
//! [`Transport`] moves one request to the node and brings back the raw
//! status and body. It knows nothing about envelopes, retries or timeouts;
//! the client layers those on top, so every transport (the real HTTP one
//! or a scripted stand-in) gets the same treatment.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::trace;

use crate::config::ClientConfig;
use crate::error::{SdkError, SdkResult};

/// HTTP verbs the node API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// One outbound call. `path` starts with `/` and is relative to the node's
/// base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
}

impl Request {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            body: Some(body),
        }
    }

    /// `"GET /status"`, used in logs and error messages.
    pub fn describe(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// Raw status code and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers requests to a node.
///
/// Implementations report connection-level trouble as
/// [`SdkError::Network`]. A response with a non-2xx status is still a
/// response and comes back as `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> SdkResult<Response>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: Request) -> SdkResult<Response> {
        (**self).send(request).await
    }
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// JSON over HTTP(S) with `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> SdkResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("relyo-sdk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SdkError::network(format!("failed to build HTTP client: {e}")))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &ClientConfig) -> SdkResult<Self> {
        Self::new(config.base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> SdkResult<Response> {
        let url = format!("{}{}", self.base_url, request.path);
        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        let builder = match &request.body {
            Some(body) => builder.json(body),
            None => builder,
        };

        let resp = builder
            .send()
            .await
            .map_err(|e| SdkError::network(format!("{}: {e}", request.describe())))?;
        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| SdkError::network(format!("{}: reading body: {e}", request.describe())))?;

        trace!(%url, status, bytes = body.len(), "http response");
        Ok(Response { status, body })
    }
}
