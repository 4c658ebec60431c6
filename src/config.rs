//! Client configuration.
//!
//! Priority for `base_url` and `user_token`: explicit builder value, then the
//! `HYPERWALLET_BASE_URL` / `HYPERWALLET_USER_TOKEN` environment variables.

use crate::defaults;
use crate::error::HyperwalletError;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Platform root, without a trailing slash.
    pub base_url: String,
    /// Token of the user the calls act on (`usr-...`).
    pub user_token: String,
    pub rest_path: String,
    pub graphql_path: String,
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    pub user_agent: Option<String>,
    /// Sent with every request; cannot override `Authorization`.
    pub headers: HashMap<String, String>,
    /// Refresh the token and retry once on 401.
    pub retry_401: bool,
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Configuration taken entirely from the environment.
    pub fn from_env() -> Result<Self, HyperwalletError> {
        Self::builder().build()
    }

    /// `{rest_path}{path}`, e.g. `/rest/v3/users/usr-1/bank-cards`.
    pub fn rest_url_path(&self, path: &str) -> String {
        format!("{}{}", self.rest_path.trim_end_matches('/'), path)
    }

    /// Path of the `users/{token}` resource with the user token encoded.
    pub fn user_path(&self, suffix: &str) -> String {
        self.rest_url_path(&format!(
            "/users/{}{}",
            urlencoding::encode(&self.user_token),
            suffix
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    user_token: Option<String>,
    rest_path: Option<String>,
    graphql_path: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    user_agent: Option<String>,
    headers: HashMap<String, String>,
    retry_401: Option<bool>,
}

impl ClientConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn user_token<S: Into<String>>(mut self, user_token: S) -> Self {
        self.user_token = Some(user_token.into());
        self
    }

    pub fn rest_path<S: Into<String>>(mut self, path: S) -> Self {
        self.rest_path = Some(path.into());
        self
    }

    pub fn graphql_path<S: Into<String>>(mut self, path: S) -> Self {
        self.graphql_path = Some(path.into());
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, connect_timeout: Option<Duration>) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: S) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn retry_401(mut self, enabled: bool) -> Self {
        self.retry_401 = Some(enabled);
        self
    }

    pub fn build(self) -> Result<ClientConfig, HyperwalletError> {
        self.build_with_env(|name| std::env::var(name).ok())
    }

    /// Build with a custom environment lookup.
    pub fn build_with_env<F>(self, env: F) -> Result<ClientConfig, HyperwalletError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = resolve(self.base_url, defaults::env::BASE_URL, &env).ok_or_else(|| {
            HyperwalletError::ConfigurationError(format!(
                "base URL is required (missing {} or explicit .base_url())",
                defaults::env::BASE_URL
            ))
        })?;
        let user_token =
            resolve(self.user_token, defaults::env::USER_TOKEN, &env).ok_or_else(|| {
                HyperwalletError::ConfigurationError(format!(
                    "user token is required (missing {} or explicit .user_token())",
                    defaults::env::USER_TOKEN
                ))
            })?;

        Ok(ClientConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_token,
            rest_path: self
                .rest_path
                .unwrap_or_else(|| defaults::endpoints::REST_PATH.to_string()),
            graphql_path: self
                .graphql_path
                .unwrap_or_else(|| defaults::endpoints::GRAPHQL_PATH.to_string()),
            timeout: self.timeout.or(Some(defaults::http::REQUEST_TIMEOUT)),
            connect_timeout: self
                .connect_timeout
                .or(Some(defaults::http::CONNECT_TIMEOUT)),
            user_agent: Some(
                self.user_agent
                    .unwrap_or_else(|| defaults::http::USER_AGENT.to_string()),
            ),
            headers: self.headers,
            retry_401: self.retry_401.unwrap_or(true),
        })
    }
}

fn resolve<F>(explicit: Option<String>, env_key: &str, env: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    explicit
        .filter(|v| !v.trim().is_empty())
        .or_else(|| env(env_key).filter(|v| !v.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
        move |name| {
            pairs
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn explicit_values_win_over_env() {
        let config = ClientConfig::builder()
            .base_url("https://explicit.test/")
            .user_token("usr-explicit")
            .build_with_env(env_of(&[
                ("HYPERWALLET_BASE_URL", "https://env.test"),
                ("HYPERWALLET_USER_TOKEN", "usr-env"),
            ]))
            .unwrap();
        assert_eq!(config.base_url, "https://explicit.test");
        assert_eq!(config.user_token, "usr-explicit");
    }

    #[test]
    fn env_fills_missing_values_and_defaults_apply() {
        let config = ClientConfig::builder()
            .build_with_env(env_of(&[
                ("HYPERWALLET_BASE_URL", "https://env.test"),
                ("HYPERWALLET_USER_TOKEN", "usr-env"),
            ]))
            .unwrap();
        assert_eq!(config.base_url, "https://env.test");
        assert_eq!(config.user_token, "usr-env");
        assert_eq!(config.rest_path, "/rest/v3");
        assert_eq!(config.graphql_path, "/graphql");
        assert_eq!(config.timeout, Some(defaults::http::REQUEST_TIMEOUT));
        assert!(config.retry_401);
    }

    #[test]
    fn missing_base_url_is_a_configuration_error() {
        let err = ClientConfig::builder()
            .user_token("usr-1")
            .build_with_env(|_| None)
            .unwrap_err();
        assert!(matches!(err, HyperwalletError::ConfigurationError(_)));

        let err = ClientConfig::builder()
            .base_url("   ")
            .user_token("usr-1")
            .build_with_env(|_| None)
            .unwrap_err();
        assert!(matches!(err, HyperwalletError::ConfigurationError(_)));
    }

    #[test]
    fn user_path_encodes_token() {
        let config = ClientConfig::builder()
            .base_url("https://api.test")
            .user_token("usr 1/2")
            .build_with_env(|_| None)
            .unwrap();
        assert_eq!(
            config.user_path("/bank-cards"),
            "/rest/v3/users/usr%201%2F2/bank-cards"
        );
    }
}
