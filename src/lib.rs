//! # hyperwallet-sdk
//!
//! Client SDK for managing a user's transfer methods (bank accounts, bank
//! cards, PayPal accounts, prepaid cards) and listing receipts against the
//! Hyperwallet REST and GraphQL APIs.
//!
#![deny(unsafe_code)]

//! ## Overview
//!
//! - **Request pipeline**: attaches the bearer token, sends the request and,
//!   on a 401, refreshes the token once and replays the call.
//! - **Model decoder**: field-bag models that keep unknown fields, polymorphic
//!   transfer methods, paged lists and the lazily materialised GraphQL
//!   configuration graph.
//! - **Error mapper**: every failure is a [`HyperwalletError`] carrying an
//!   ordered list of `{code, message, fieldName?}` entries.
//! - **Result dispatcher**: the listener API delivers exactly one callback per
//!   call, optionally on a caller supplied [`dispatch::Scheduler`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hyperwallet_sdk::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), HyperwalletError> {
//!     let client = HyperwalletClient::builder()
//!         .config(
//!             ClientConfig::builder()
//!                 .base_url("https://api.sandbox.hyperwallet.com")
//!                 .user_token("usr-fbfd5848-60d0-43c5-8462-099c959b49c7")
//!                 .build()?,
//!         )
//!         .token_provider(Arc::new(StaticTokenProvider::new("jwt-from-your-backend")))
//!         .build()?;
//!
//!     if let Some(page) = client.list_user_receipts(&ReceiptQueryParam::new()).await? {
//!         for receipt in page.data() {
//!             println!("{:?} {:?}", receipt.journal_id(), receipt.amount());
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod decode;
pub mod defaults;
pub mod dispatch;
pub mod error;
pub mod execution;
pub mod model;

pub use auth::{CachingTokenProvider, StaticTokenProvider, Token, TokenProvider, TokenSource};
pub use client::{HyperwalletClient, HyperwalletClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use decode::Decode;
pub use dispatch::{FnListener, Listener, Scheduler};
pub use error::{ErrorCategory, ErrorEntry, Errors, HyperwalletError};
pub use execution::{RawBody, RequestDescriptor, RequestPipeline};

/// Commonly used types.
pub mod prelude {
    pub use crate::auth::{
        CachingTokenProvider, StaticTokenProvider, Token, TokenProvider, TokenSource,
    };
    pub use crate::client::HyperwalletClient;
    pub use crate::config::ClientConfig;
    pub use crate::dispatch::{
        FnListener, ImmediateScheduler, Listener, QueueScheduler, Scheduler, TokioScheduler,
    };
    pub use crate::error::{ErrorCategory, Errors, HyperwalletError};
    pub use crate::execution::RequestDescriptor;
    pub use crate::execution::http::{HttpInterceptor, LoggingInterceptor};
    pub use crate::model::graphql::{KeyedNode, TransferMethodConfigurationKeys};
    pub use crate::model::{
        BankAccount, BankCard, JsonModel, PageList, PayPalAccount, PrepaidCard,
        PrepaidCardQueryParam, Receipt, ReceiptQueryParam, TransferMethod, TransferMethodFields,
        TransferMethodQueryParam,
    };
}
