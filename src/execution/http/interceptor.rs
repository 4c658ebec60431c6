//! HTTP Interceptor interfaces
//!
//! Interceptors observe every attempt the pipeline makes. They can tweak the
//! outgoing request before send, observe responses, be told about the single
//! 401 retry, and be notified of terminal errors. Hooks are best-effort and
//! should avoid expensive work.

use super::transport::{HttpTransportRequest, HttpTransportResponse};
use crate::error::HyperwalletError;

/// Context passed to interceptors describing the request.
#[derive(Clone, Debug)]
pub struct HttpRequestContext {
    pub request_id: String,
    pub method: reqwest::Method,
    pub url: String,
    /// 0 for the original attempt, 1 for the post-refresh retry.
    pub attempt: u32,
}

impl HttpRequestContext {
    pub fn new(method: reqwest::Method, url: impl Into<String>) -> Self {
        Self {
            request_id: generate_request_id(),
            method,
            url: url.into(),
            attempt: 0,
        }
    }
}

/// Unique id used to correlate the attempts of one call in logs.
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// HTTP interceptor trait
pub trait HttpInterceptor: Send + Sync {
    /// Called before each attempt is sent. Returning an error short-circuits
    /// the call.
    fn on_before_send(
        &self,
        _ctx: &HttpRequestContext,
        _request: &mut HttpTransportRequest,
    ) -> Result<(), HyperwalletError> {
        Ok(())
    }

    /// Called for every response received, successful or not.
    fn on_response(&self, _ctx: &HttpRequestContext, _response: &HttpTransportResponse) {}

    /// Called when a 401 triggers the token refresh and retry.
    fn on_retry(&self, _ctx: &HttpRequestContext, _error: &HyperwalletError, _attempt: u32) {}

    /// Called when the call ends in an error.
    fn on_error(&self, _ctx: &HttpRequestContext, _error: &HyperwalletError) {}
}

/// A simple logging interceptor backed by `tracing` (no sensitive data).
///
/// Logs under `hyperwallet::interceptor` so it can be enabled separately
/// from the pipeline's own `hyperwallet::http` events.
#[derive(Clone, Default)]
pub struct LoggingInterceptor;

impl HttpInterceptor for LoggingInterceptor {
    fn on_before_send(
        &self,
        ctx: &HttpRequestContext,
        _request: &mut HttpTransportRequest,
    ) -> Result<(), HyperwalletError> {
        tracing::debug!(target: "hyperwallet::interceptor", request_id=%ctx.request_id, method=%ctx.method, url=%ctx.url, attempt=ctx.attempt, "before send");
        Ok(())
    }

    fn on_response(&self, ctx: &HttpRequestContext, response: &HttpTransportResponse) {
        tracing::debug!(target: "hyperwallet::interceptor", request_id=%ctx.request_id, url=%ctx.url, status=response.status, "on response");
    }

    fn on_retry(&self, ctx: &HttpRequestContext, error: &HyperwalletError, attempt: u32) {
        tracing::debug!(target: "hyperwallet::interceptor", request_id=%ctx.request_id, url=%ctx.url, attempt, err=%error, "on retry");
    }

    fn on_error(&self, ctx: &HttpRequestContext, error: &HyperwalletError) {
        tracing::debug!(target: "hyperwallet::interceptor", request_id=%ctx.request_id, url=%ctx.url, err=%error, "on error");
    }
}
