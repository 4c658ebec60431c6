//! Caching token provider with single-flight refresh.
//!
//! Tokens are cached in-memory. Concurrent callers that detect an expired
//! token and call `refresh` at the same time share one fetch: whoever gets
//! the lock first fetches, the others observe the bumped generation and reuse
//! the fresh token. Every issued token carries the generation it was fetched
//! in, so a 401 for a token that was already replaced (`refresh_stale`)
//! reuses the replacement even when the other refresh finished long ago.

use super::{Token, TokenProvider};
use crate::error::HyperwalletError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

/// Fetches a brand-new token from wherever credentials come from
/// (the application backend, usually).
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn fetch(&self) -> Result<Token, HyperwalletError>;
}

#[derive(Default)]
struct CacheState {
    token: Option<Token>,
    generation: u64,
}

/// [`TokenProvider`] that caches the token of a [`TokenSource`] and
/// de-duplicates concurrent refreshes.
pub struct CachingTokenProvider<S> {
    source: S,
    state: Mutex<CacheState>,
    // Mirrors `CacheState::generation` so `refresh` can snapshot it before
    // queueing on the lock.
    generation: AtomicU64,
}

impl<S: TokenSource> CachingTokenProvider<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: Mutex::new(CacheState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Number of tokens fetched from the source so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    async fn fetch_into(&self, state: &mut CacheState) -> Result<Token, HyperwalletError> {
        let token = self
            .source
            .fetch()
            .await?
            .with_generation(state.generation + 1);
        state.token = Some(token.clone());
        state.generation += 1;
        self.generation.store(state.generation, Ordering::Release);
        tracing::debug!(target: "hyperwallet::auth", generation = state.generation, "token fetched");
        Ok(token)
    }
}

#[async_trait]
impl<S: TokenSource> TokenProvider for CachingTokenProvider<S> {
    async fn token(&self) -> Result<Token, HyperwalletError> {
        let mut state = self.state.lock().await;
        if let Some(token) = state.token.as_ref()
            && !token.is_expired_at(chrono::Utc::now())
        {
            return Ok(token.clone());
        }
        self.fetch_into(&mut state).await
    }

    async fn refresh(&self) -> Result<Token, HyperwalletError> {
        let seen = self.generation.load(Ordering::Acquire);
        let mut state = self.state.lock().await;
        if state.generation != seen
            && let Some(token) = state.token.as_ref()
        {
            // Another caller refreshed while we were waiting.
            return Ok(token.clone());
        }
        state.token = None;
        self.fetch_into(&mut state).await
    }

    async fn refresh_stale(&self, rejected: &Token) -> Result<Token, HyperwalletError> {
        if rejected.generation() == 0 {
            return self.refresh().await;
        }
        let mut state = self.state.lock().await;
        if rejected.generation() < state.generation
            && let Some(token) = state.token.as_ref()
        {
            tracing::debug!(target: "hyperwallet::auth", rejected = rejected.generation(), current = state.generation, "rejected token already replaced");
            return Ok(token.clone());
        }
        state.token = None;
        self.fetch_into(&mut state).await
    }
}
