//! Error mapping for non-2xx responses.
//!
//! Turns a status and raw body into [`HyperwalletError::ApiError`]. Mapping
//! never fails: an empty, unparseable or error-less body is replaced with a
//! single synthetic entry carrying the status.

use crate::error::{EC_UNEXPECTED_EXCEPTION, ErrorEntry, Errors, HyperwalletError};
use crate::execution::http::interceptor::{HttpInterceptor, HttpRequestContext};
use serde_json::Value;
use std::sync::Arc;

/// Map a non-2xx response to an `ApiError`.
pub fn map_error(status: u16, body: &str) -> HyperwalletError {
    let errors = match parse_errors(body) {
        Some(errors) if !errors.is_empty() => errors,
        _ => Errors::new(vec![ErrorEntry::new(
            EC_UNEXPECTED_EXCEPTION,
            fallback_message(status),
        )]),
    };
    HyperwalletError::ApiError { status, errors }
}

/// Read `{"errors": [...]}` entry by entry. Non-object entries are skipped;
/// a missing or non-string `code`/`message` reads as empty, a non-string
/// `fieldName` as absent.
fn parse_errors(body: &str) -> Option<Errors> {
    if body.trim().is_empty() {
        return None;
    }
    let value: Value = serde_json::from_str(body).ok()?;
    let entries = value.get("errors")?.as_array()?;
    let errors = entries
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| {
            let text = |key: &str| entry.get(key).map(scalar_text).unwrap_or_default();
            let mut parsed = ErrorEntry::new(text("code"), text("message"));
            parsed.field_name = entry
                .get("fieldName")
                .and_then(Value::as_str)
                .map(str::to_string);
            parsed
        })
        .filter(|entry| !entry.code.is_empty() || !entry.message.is_empty())
        .collect();
    Some(Errors::new(errors))
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

fn fallback_message(status: u16) -> String {
    let reason = reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason());
    match reason {
        Some(reason) => format!("Unexpected response status {status} ({reason})"),
        None => format!("Unexpected response status {status}"),
    }
}

/// Notify every interceptor that the call ended in `error`.
pub fn notify_error(
    ctx: &HttpRequestContext,
    interceptors: &[Arc<dyn HttpInterceptor>],
    error: &HyperwalletError,
) {
    for it in interceptors {
        it.on_error(ctx, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;

    #[test]
    fn field_validation_error_keeps_code_and_field() {
        let body = r#"{"errors":[{"code":"CONSTRAINT_VIOLATIONS","fieldName":"transferMethodCountry","message":"You must provide a value for this field"}]}"#;
        let err = map_error(400, body);

        assert_eq!(err.status(), Some(400));
        assert_eq!(err.category(), ErrorCategory::Validation);
        let errors = err.errors();
        assert_eq!(errors.len(), 1);
        let entry = errors.first().unwrap();
        assert_eq!(entry.code, "CONSTRAINT_VIOLATIONS");
        assert_eq!(entry.field_name.as_deref(), Some("transferMethodCountry"));
    }

    #[test]
    fn server_order_is_preserved() {
        let body = r#"{"errors":[
            {"code":"INVALID_LENGTH","fieldName":"cardNumber","message":"a"},
            {"code":"EXPIRED_CARD","fieldName":"dateOfExpiry","message":"b"}
        ]}"#;
        let codes: Vec<String> = map_error(400, body)
            .errors()
            .iter()
            .map(|e| e.code.clone())
            .collect();
        assert_eq!(codes, vec!["INVALID_LENGTH", "EXPIRED_CARD"]);
    }

    #[test]
    fn system_error_without_field_name() {
        let body = r#"{"errors":[{"code":"SYSTEM_ERROR","message":"A system error has occurred. Please try again. If you continue to receive this error, please contact customer support for assistance (Ref ID: 99b4ad5c-4aac-4cc2-aa9b-4b4f4844ac9b)."}]}"#;
        let err = map_error(500, body);
        assert_eq!(err.category(), ErrorCategory::System);
        let errors = err.errors();
        assert_eq!(errors.first().unwrap().code, "SYSTEM_ERROR");
        assert!(errors.first().unwrap().field_name.is_none());
    }

    #[test]
    fn malformed_entries_do_not_discard_the_rest() {
        let body = r#"{"errors":[
            {"code":"CONSTRAINT_VIOLATIONS","fieldName":"transferMethodCountry","message":null},
            "not an object",
            {"code":1001,"message":"Numeric code"},
            {"message":"No code","fieldName":42},
            {}
        ]}"#;
        let errors = map_error(400, body).errors();

        assert_eq!(errors.len(), 3);
        assert_eq!(errors.errors[0].code, "CONSTRAINT_VIOLATIONS");
        assert_eq!(errors.errors[0].message, "");
        assert_eq!(
            errors.errors[0].field_name.as_deref(),
            Some("transferMethodCountry")
        );
        assert_eq!(errors.errors[1].code, "1001");
        assert_eq!(errors.errors[1].message, "Numeric code");
        assert_eq!(errors.errors[2].code, "");
        assert_eq!(errors.errors[2].message, "No code");
        assert!(errors.errors[2].field_name.is_none());
    }

    #[test]
    fn nothing_usable_falls_back_to_synthetic_entry() {
        for body in [r#"{"errors":[null, 3, {}]}"#, r#"{"errors":{"code":"X"}}"#] {
            let errors = map_error(422, body).errors();
            assert_eq!(errors.len(), 1, "body: {body}");
            assert_eq!(errors.errors[0].code, EC_UNEXPECTED_EXCEPTION);
        }
    }

    #[test]
    fn unparseable_bodies_are_synthesized() {
        for body in ["", "   ", "<html>Bad Gateway</html>", r#"{"errors":[]}"#, "{}"] {
            let err = map_error(502, body);
            assert_eq!(err.status(), Some(502));
            let errors = err.errors();
            assert_eq!(errors.len(), 1, "body: {body:?}");
            assert_eq!(errors.first().unwrap().code, EC_UNEXPECTED_EXCEPTION);
            assert!(errors.first().unwrap().message.contains("502"));
        }
    }

    #[test]
    fn unauthorized_is_authentication_category() {
        let err = map_error(401, r#"{"errors":[{"code":"JWT_EXPIRED","message":"JWT expired"}]}"#);
        assert!(err.is_authentication_error());
    }
}
