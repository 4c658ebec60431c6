//! Error Handling Module
//!
//! This module provides the error taxonomy shared by every SDK operation:
//! - Core error type (`HyperwalletError`) and its `ErrorCategory`
//! - The server-side error collection (`Errors`, `ErrorEntry`)
//! - Type conversions from common error types
//!
//! # Example
//!
//! ```rust,ignore
//! use hyperwallet_sdk::error::{ErrorCategory, HyperwalletError};
//!
//! let error = HyperwalletError::api_error(500, "boom");
//! assert_eq!(error.category(), ErrorCategory::System);
//! ```

mod conversions;
pub mod types;

pub use types::*;
