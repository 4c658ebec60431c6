//! Model Decoder
//!
//! Turns a raw response body into the typed shape a request asked for.
//!
//! - An empty or whitespace-only body decodes to `None` ("no content", the
//!   204 case), which is distinct from an empty collection.
//! - Anything else must be valid JSON; unparseable text is a
//!   [`HyperwalletError::ParseError`] and never defaults to an empty model.
//! - The shape-specific rules live in each [`Decode`] implementation.

use crate::error::HyperwalletError;
use serde_json::{Map, Value};

/// A type a response body can decode into.
pub trait Decode: Sized + Send + 'static {
    fn decode_value(value: Value) -> Result<Self, HyperwalletError>;
}

/// Decode a raw body into `T`, or `None` for an empty body.
pub fn decode<T: Decode>(raw: &str) -> Result<Option<T>, HyperwalletError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(raw)?;
    T::decode_value(value).map(Some)
}

impl Decode for Value {
    fn decode_value(value: Value) -> Result<Self, HyperwalletError> {
        Ok(value)
    }
}

/// Unwrap a JSON object, naming the expected shape in the error otherwise.
pub(crate) fn expect_object(
    value: Value,
    shape: &str,
) -> Result<Map<String, Value>, HyperwalletError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(HyperwalletError::ParseError(format!(
            "expected JSON object for {shape}, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_body_is_no_content() {
        assert!(decode::<Value>("").unwrap().is_none());
        assert!(decode::<Value>("  \n\t").unwrap().is_none());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        match decode::<Value>("{\"token\": ") {
            Err(HyperwalletError::ParseError(_)) => {}
            other => panic!("expected ParseError, got: {other:?}"),
        }
    }

    #[test]
    fn expect_object_rejects_arrays() {
        let err = expect_object(serde_json::json!([1, 2]), "receipt").unwrap_err();
        assert!(err.to_string().contains("array"));
    }
}
