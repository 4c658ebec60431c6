//! Authentication helpers and token providers.
//!
//! The request pipeline never stores credentials itself: it asks a
//! [`TokenProvider`] for the current Bearer token before every attempt and
//! asks it to `refresh` when the platform answers 401.

pub mod caching;

pub use caching::{CachingTokenProvider, TokenSource};

use crate::error::HyperwalletError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// An opaque Bearer credential.
///
/// Expiry is optional metadata; the pipeline discovers expiry through 401
/// responses rather than by inspecting it.
#[derive(Clone)]
pub struct Token {
    value: SecretString,
    expires_at: Option<DateTime<Utc>>,
    // Stamped by `CachingTokenProvider`; 0 for tokens it did not issue.
    generation: u64,
}

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: SecretString::from(value.into()),
            expires_at: None,
            generation: 0,
        }
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Raw token text, for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        self.value.expose_secret()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// True when the token carries an expiry that is not after `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| exp <= now)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Supplies Bearer tokens to the request pipeline.
///
/// Notes:
/// - Both operations may suspend (first-time provisioning, network refresh).
/// - `refresh` must invalidate the previously returned token.
/// - The pipeline does not coordinate refreshes across concurrent calls;
///   implementations that must avoid duplicate refreshes serialize them
///   internally (see [`CachingTokenProvider`]).
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns the current token.
    async fn token(&self) -> Result<Token, HyperwalletError>;

    /// Obtains a new token, replacing the current one.
    async fn refresh(&self) -> Result<Token, HyperwalletError>;

    /// Refresh on behalf of a call whose `rejected` token got a 401.
    ///
    /// Providers that know a newer token than `rejected` was already issued
    /// can return it instead of refreshing again. Defaults to [`refresh`].
    ///
    /// [`refresh`]: TokenProvider::refresh
    async fn refresh_stale(&self, rejected: &Token) -> Result<Token, HyperwalletError> {
        let _ = rejected;
        self.refresh().await
    }
}

/// A simple static token provider useful for tests and basic scenarios where
/// the token is managed externally. Refreshing returns the same token.
pub struct StaticTokenProvider {
    token: Token,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Token::new(token),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> Result<Token, HyperwalletError> {
        Ok(self.token.clone())
    }

    async fn refresh(&self) -> Result<Token, HyperwalletError> {
        Ok(self.token.clone())
    }
}
