//! Request pipeline
//!
//! Owns one call: fetch the token, send, and on a 401 refresh the token once
//! and replay the identical request. A second 401 is surfaced as-is; there is
//! never more than one retry per call. The pipeline does not coordinate
//! refreshes across calls; that is up to the [`TokenProvider`].

use super::errors::{map_error, notify_error};
use super::http::headers::build_request_headers;
use super::http::interceptor::{HttpInterceptor, HttpRequestContext};
use super::http::transport::{HttpTransport, HttpTransportRequest, HttpTransportResponse};
use super::request::RequestDescriptor;
use crate::auth::{Token, TokenProvider};
use crate::error::HyperwalletError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Raw response body of a successful call; empty for no-content responses.
pub type RawBody = String;

const UNAUTHORIZED: u16 = 401;

#[derive(Clone)]
pub struct RequestPipeline {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    token_provider: Arc<dyn TokenProvider>,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
    default_headers: HashMap<String, String>,
    user_agent: Option<String>,
    retry_401: bool,
}

impl RequestPipeline {
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            token_provider,
            interceptors: Vec::new(),
            default_headers: HashMap::new(),
            user_agent: None,
            retry_401: true,
        }
    }

    pub fn with_interceptors(mut self, interceptors: Vec<Arc<dyn HttpInterceptor>>) -> Self {
        self.interceptors = interceptors;
        self
    }

    pub fn with_default_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.default_headers = headers;
        self
    }

    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Disable to surface the first 401 without refreshing.
    pub fn with_retry_401(mut self, retry_401: bool) -> Self {
        self.retry_401 = retry_401;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_provider(&self) -> &Arc<dyn TokenProvider> {
        &self.token_provider
    }

    /// Absolute URL for a descriptor path.
    pub fn url_for(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{base}{path}")
        } else {
            format!("{base}/{path}")
        }
    }

    /// Run one call to completion and return the raw success body.
    ///
    /// Every failure (token, transport, non-2xx) comes back as `Err`; nothing
    /// is retried except a single 401.
    pub async fn execute<T>(
        &self,
        descriptor: &RequestDescriptor<T>,
    ) -> Result<RawBody, HyperwalletError> {
        let url = self.url_for(descriptor.path());
        let mut ctx = HttpRequestContext::new(descriptor.method().clone(), url);

        let result = self.run(descriptor, &mut ctx).await;
        match &result {
            Ok(_) => {
                tracing::trace!(target: "hyperwallet::http", request_id=%ctx.request_id, attempt=ctx.attempt, "call succeeded");
            }
            Err(e) => {
                tracing::debug!(target: "hyperwallet::http", request_id=%ctx.request_id, url=%ctx.url, status=?e.status(), "call failed");
                notify_error(&ctx, &self.interceptors, e);
            }
        }
        result
    }

    async fn run<T>(
        &self,
        descriptor: &RequestDescriptor<T>,
        ctx: &mut HttpRequestContext,
    ) -> Result<RawBody, HyperwalletError> {
        // 1. Current token
        let token = self.token_provider.token().await?;

        // 2. First attempt
        let mut response = self.attempt(descriptor, ctx, &token).await?;

        // 3. 401 -> refresh once and replay
        if response.status == UNAUTHORIZED && self.retry_401 {
            let unauthorized = map_error(response.status, &response.body);
            tracing::debug!(target: "hyperwallet::http", request_id=%ctx.request_id, url=%ctx.url, "401 received; refreshing token");
            for it in &self.interceptors {
                it.on_retry(ctx, &unauthorized, 1);
            }
            let refreshed = self.token_provider.refresh_stale(&token).await?;
            ctx.attempt = 1;
            response = self.attempt(descriptor, ctx, &refreshed).await?;
        }

        // 4. Classify
        if response.is_success() {
            Ok(response.body)
        } else {
            Err(map_error(response.status, &response.body))
        }
    }

    async fn attempt<T>(
        &self,
        descriptor: &RequestDescriptor<T>,
        ctx: &HttpRequestContext,
        token: &Token,
    ) -> Result<HttpTransportResponse, HyperwalletError> {
        let headers = build_request_headers(
            self.user_agent.as_deref(),
            &self.default_headers,
            descriptor.headers(),
            token,
        )?;
        let mut request = HttpTransportRequest {
            ctx: ctx.clone(),
            method: descriptor.method().clone(),
            url: ctx.url.clone(),
            query: descriptor.query_params().clone(),
            headers,
            body: descriptor.body().map(str::to_string),
        };
        for it in &self.interceptors {
            it.on_before_send(ctx, &mut request)?;
        }

        tracing::debug!(target: "hyperwallet::http", request_id=%ctx.request_id, method=%ctx.method, url=%ctx.url, attempt=ctx.attempt, "sending request");
        let response = match self.transport.send(request).await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(target: "hyperwallet::http", request_id=%ctx.request_id, url=%ctx.url, err=%e, "transport failure");
                return Err(e);
            }
        };
        tracing::debug!(target: "hyperwallet::http", request_id=%ctx.request_id, status=response.status, "response received");

        for it in &self.interceptors {
            it.on_response(ctx, &response);
        }
        Ok(response)
    }
}

impl fmt::Debug for RequestPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestPipeline")
            .field("base_url", &self.base_url)
            .field("interceptors", &self.interceptors.len())
            .field("retry_401", &self.retry_401)
            .finish()
    }
}
