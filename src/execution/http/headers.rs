//! HTTP Headers Utility
//!
//! Builds the header set sent with every platform request.

use crate::auth::Token;
use crate::error::HyperwalletError;
use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT,
};
use std::collections::HashMap;

/// Authentication scheme prefix for the `Authorization` header.
pub const AUTHENTICATION_STRATEGY: &str = "Bearer";
const APPLICATION_JSON: &str = "application/json";

/// HTTP header builder for API requests
pub struct HttpHeaderBuilder {
    headers: HeaderMap,
}

impl HttpHeaderBuilder {
    pub fn new() -> Self {
        Self {
            headers: HeaderMap::new(),
        }
    }

    /// `Accept` and `Content-Type` set to JSON.
    pub fn with_json(mut self) -> Self {
        self.headers
            .insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        self
    }

    /// Add Bearer token authorization
    pub fn with_bearer_auth(mut self, token: &Token) -> Result<Self, HyperwalletError> {
        let mut value =
            HeaderValue::from_str(&format!("{AUTHENTICATION_STRATEGY} {}", token.expose()))
                .map_err(|e| HyperwalletError::TokenError(format!("Invalid token format: {e}")))?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(self)
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Result<Self, HyperwalletError> {
        self.headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).map_err(|e| {
                HyperwalletError::ConfigurationError(format!("Invalid user agent: {e}"))
            })?,
        );
        Ok(self)
    }

    /// Add custom headers; later calls override earlier values for the same name.
    pub fn with_custom_headers(
        mut self,
        custom_headers: &HashMap<String, String>,
    ) -> Result<Self, HyperwalletError> {
        for (key, value) in custom_headers {
            let header_name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                HyperwalletError::InvalidInput(format!("Invalid header name '{key}': {e}"))
            })?;
            self.headers.insert(
                header_name,
                HeaderValue::from_str(value).map_err(|e| {
                    HyperwalletError::InvalidInput(format!("Invalid header value '{value}': {e}"))
                })?,
            );
        }
        Ok(self)
    }

    pub fn build(self) -> HeaderMap {
        self.headers
    }
}

impl Default for HttpHeaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Headers for one attempt: JSON defaults, client-wide headers, per-request
/// headers, then the Bearer token (which callers cannot override).
pub fn build_request_headers(
    user_agent: Option<&str>,
    client_headers: &HashMap<String, String>,
    request_headers: &HashMap<String, String>,
    token: &Token,
) -> Result<HeaderMap, HyperwalletError> {
    let mut builder = HttpHeaderBuilder::new().with_json();
    if let Some(ua) = user_agent {
        builder = builder.with_user_agent(ua)?;
    }
    Ok(builder
        .with_custom_headers(client_headers)?
        .with_custom_headers(request_headers)?
        .with_bearer_auth(token)?
        .build())
}
