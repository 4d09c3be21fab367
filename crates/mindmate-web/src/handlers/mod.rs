//! HTTP handlers for all API routes.

pub mod system;
pub mod catalog;
pub mod knowledge;
pub mod analyze;
pub mod genai;
pub mod selfcheck;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use tracing::debug;

/// Unwrap a JSON body leniently. Anything unreadable becomes `Null`, so the
/// handler sees missing fields rather than a 4xx. Oversized bodies still
/// fail with 413.
pub(crate) fn lenient_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, JsonRejection> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => Err(rejection),
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "Unreadable request body, treating as empty");
            Ok(Value::Null)
        }
    }
}

/// Read `key` from a request object as text. Strings pass through, other
/// truthy scalars are stringified, and null / false / 0 / "" / absent
/// all read as empty.
pub(crate) fn text_field(body: &Value, key: &str) -> String {
    match body.get(key) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_field_stringifies_scalars() {
        let body = json!({"a": "hi", "b": 42, "c": true, "d": null, "e": false, "f": 0});
        assert_eq!(text_field(&body, "a"), "hi");
        assert_eq!(text_field(&body, "b"), "42");
        assert_eq!(text_field(&body, "c"), "true");
        assert_eq!(text_field(&body, "d"), "");
        assert_eq!(text_field(&body, "e"), "");
        assert_eq!(text_field(&body, "f"), "");
        assert_eq!(text_field(&body, "missing"), "");
        assert_eq!(text_field(&Value::Null, "a"), "");
    }
}
