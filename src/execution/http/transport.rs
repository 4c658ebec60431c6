//! HTTP transport abstraction.
//!
//! The pipeline talks to the network only through [`HttpTransport`], so the
//! refresh state machine can be driven by a scripted transport in tests and
//! applications can plug in their own client stack. [`ReqwestTransport`] is
//! the default.

use super::interceptor::HttpRequestContext;
use crate::error::HyperwalletError;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use std::collections::BTreeMap;
use std::time::Duration;

/// One fully-built attempt.
#[derive(Debug, Clone)]
pub struct HttpTransportRequest {
    pub ctx: HttpRequestContext,
    pub method: reqwest::Method,
    pub url: String,
    pub query: BTreeMap<String, String>,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Status code plus raw body. Consumed within one pipeline invocation.
#[derive(Debug, Clone)]
pub struct HttpTransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpTransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the status and body.
///
/// Non-2xx statuses are not errors at this level; only failures to complete
/// the exchange (connect, DNS, timeout, unreadable body) are.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, HyperwalletError>;
}

/// [`HttpTransport`] over a shared `reqwest::Client`.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client with the given timeouts.
    pub fn with_timeouts(
        timeout: Option<Duration>,
        connect_timeout: Option<Duration>,
    ) -> Result<Self, HyperwalletError> {
        let mut builder = reqwest::Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        if let Some(t) = connect_timeout {
            builder = builder.connect_timeout(t);
        }
        let client = builder.build().map_err(|e| {
            HyperwalletError::ConfigurationError(format!("Failed to build HTTP client: {e}"))
        })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        request: HttpTransportRequest,
    ) -> Result<HttpTransportResponse, HyperwalletError> {
        let mut rb = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if !request.query.is_empty() {
            rb = rb.query(&request.query);
        }
        if let Some(body) = request.body {
            rb = rb.body(body);
        }
        let resp = rb.send().await?;
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.text().await?;
        Ok(HttpTransportResponse {
            status,
            headers,
            body,
        })
    }
}
