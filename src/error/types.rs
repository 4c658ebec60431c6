//! Core error types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Synthetic code for connection, DNS and timeout failures.
pub const EC_IO_EXCEPTION: &str = "EC_IO_EXCEPTION";
/// Synthetic code for a success body that is not valid JSON for its shape.
pub const EC_JSON_EXCEPTION: &str = "EC_JSON_EXCEPTION";
/// Synthetic code for an error response whose body could not be parsed.
pub const EC_UNEXPECTED_EXCEPTION: &str = "EC_UNEXPECTED_EXCEPTION";
/// Synthetic code for a failing token provider.
pub const EC_AUTHENTICATION_TOKEN_PROVIDER_EXCEPTION: &str =
    "EC_AUTHENTICATION_TOKEN_PROVIDER_EXCEPTION";
/// Synthetic code for invalid client configuration.
pub const EC_CONFIGURATION_EXCEPTION: &str = "EC_CONFIGURATION_EXCEPTION";
/// Synthetic code for rejected caller input.
pub const EC_INVALID_INPUT: &str = "EC_INVALID_INPUT";

/// A single error reported by the platform.
///
/// `field_name` is only present for field-level validation errors and names
/// the request field the error refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(
        rename = "fieldName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub field_name: Option<String>,
}

impl ErrorEntry {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field_name: None,
        }
    }

    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }
}

/// Ordered error collection, in the order the server reported it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Errors {
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
}

impl Errors {
    pub fn new(errors: Vec<ErrorEntry>) -> Self {
        Self { errors }
    }

    /// A one-entry collection without a field name.
    pub fn single(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![ErrorEntry::new(code, message)],
        }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ErrorEntry> {
        self.errors.iter()
    }

    pub fn first(&self) -> Option<&ErrorEntry> {
        self.errors.first()
    }

    /// Entries bound to a request field, useful for form error mapping.
    pub fn field_errors(&self) -> impl Iterator<Item = &ErrorEntry> {
        self.errors.iter().filter(|e| e.field_name.is_some())
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for e in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            match &e.field_name {
                Some(field) => write!(f, "{} ({}): {}", e.code, field, e.message)?,
                None => write!(f, "{}: {}", e.code, e.message)?,
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a ErrorEntry;
    type IntoIter = std::slice::Iter<'a, ErrorEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Coarse classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS or timeout failure; no server error list.
    Transport,
    /// 401 that survived the refresh-and-retry attempt.
    Authentication,
    /// Any other 4xx.
    Validation,
    /// 5xx.
    System,
    /// Malformed JSON in an otherwise successful response.
    Decode,
    /// The token provider failed to supply or refresh a token.
    Token,
    /// Client misconfiguration or rejected caller input.
    Configuration,
}

/// Library error type.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HyperwalletError {
    /// Transport-level failure (connect, DNS, timeout, unreadable body).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Non-2xx response mapped from the platform error envelope.
    #[error("API error {status}: {errors}")]
    ApiError { status: u16, errors: Errors },

    /// A successful body that could not be decoded.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Token acquisition or refresh failed.
    #[error("Token provider error: {0}")]
    TokenError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl HyperwalletError {
    /// An `ApiError` carrying a single synthetic entry.
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        HyperwalletError::ApiError {
            status,
            errors: Errors::single(EC_UNEXPECTED_EXCEPTION, message),
        }
    }

    /// HTTP status of the response that produced this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            HyperwalletError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            HyperwalletError::HttpError(_) => ErrorCategory::Transport,
            HyperwalletError::ApiError { status, .. } => match *status {
                401 => ErrorCategory::Authentication,
                500..=599 => ErrorCategory::System,
                _ => ErrorCategory::Validation,
            },
            HyperwalletError::ParseError(_) => ErrorCategory::Decode,
            HyperwalletError::TokenError(_) => ErrorCategory::Token,
            HyperwalletError::ConfigurationError(_) | HyperwalletError::InvalidInput(_) => {
                ErrorCategory::Configuration
            }
        }
    }

    /// Structured error list for this failure.
    ///
    /// Variants without a server payload yield one synthetic entry with no
    /// field name.
    pub fn errors(&self) -> Errors {
        match self {
            HyperwalletError::ApiError { errors, .. } => errors.clone(),
            HyperwalletError::HttpError(msg) => Errors::single(EC_IO_EXCEPTION, msg.clone()),
            HyperwalletError::ParseError(msg) => Errors::single(EC_JSON_EXCEPTION, msg.clone()),
            HyperwalletError::TokenError(msg) => {
                Errors::single(EC_AUTHENTICATION_TOKEN_PROVIDER_EXCEPTION, msg.clone())
            }
            HyperwalletError::ConfigurationError(msg) => {
                Errors::single(EC_CONFIGURATION_EXCEPTION, msg.clone())
            }
            HyperwalletError::InvalidInput(msg) => Errors::single(EC_INVALID_INPUT, msg.clone()),
        }
    }

    pub fn is_authentication_error(&self) -> bool {
        self.category() == ErrorCategory::Authentication
    }
}
