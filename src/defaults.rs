//! Default Configuration Values
//!
//! Centralizes the default values used by the client.

use std::time::Duration;

/// HTTP client defaults
pub mod http {
    use super::*;

    /// Default request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    pub const USER_AGENT: &str = concat!("hyperwallet-sdk-rust/", env!("CARGO_PKG_VERSION"));
}

/// Platform endpoints
pub mod endpoints {
    /// REST root, relative to the base URL.
    pub const REST_PATH: &str = "/rest/v3";

    /// GraphQL endpoint, relative to the base URL.
    pub const GRAPHQL_PATH: &str = "/graphql";
}

/// Environment variables read by `ClientConfig::from_env`
pub mod env {
    pub const BASE_URL: &str = "HYPERWALLET_BASE_URL";
    pub const USER_TOKEN: &str = "HYPERWALLET_USER_TOKEN";
}
