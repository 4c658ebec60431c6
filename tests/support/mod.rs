//! Shared helpers for the wiremock-backed integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use hyperwallet_sdk::auth::{CachingTokenProvider, Token, TokenProvider, TokenSource};
use hyperwallet_sdk::{ClientConfig, HyperwalletClient, HyperwalletError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::MockServer;

pub const USER_TOKEN: &str = "usr-fbfd5848-60d0-43c5-8462-099c959b49c7";

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures_dir().join(name)).expect("read fixture")
}

pub fn fixture_json(name: &str) -> serde_json::Value {
    serde_json::from_str(&fixture(name)).expect("parse fixture")
}

pub fn users_path(suffix: &str) -> String {
    format!("/rest/v3/users/{USER_TOKEN}{suffix}")
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::builder()
        .base_url(server.uri())
        .user_token(USER_TOKEN)
        .build_with_env(|_| None)
        .expect("config")
}

pub fn client_for(server: &MockServer, provider: Arc<dyn TokenProvider>) -> HyperwalletClient {
    HyperwalletClient::builder()
        .config(config_for(server))
        .token_provider(provider)
        .build()
        .expect("client")
}

/// Hands out `token-1`, `token-2`, ... and counts how often it was asked.
#[derive(Clone, Default)]
pub struct SequenceSource {
    pub fetches: Arc<AtomicUsize>,
}

impl SequenceSource {
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenSource for SequenceSource {
    async fn fetch(&self) -> Result<Token, HyperwalletError> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Token::new(format!("token-{n}")))
    }
}

/// Caching provider over a [`SequenceSource`], plus a handle on the source
/// to inspect the fetch count.
pub fn sequence_provider() -> (Arc<CachingTokenProvider<SequenceSource>>, SequenceSource) {
    let source = SequenceSource::default();
    (Arc::new(CachingTokenProvider::new(source.clone())), source)
}
