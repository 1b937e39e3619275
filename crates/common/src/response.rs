//! Uniform response envelope
//!
//! Every outbound payload has the shape `{"code": <int>, "message": <string>, "data": <T|null>}`.
//! Success values are wrapped with the transport status and a default message, failures
//! carry `data: null` and the status of the error that produced them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const FIELD_CODE: &str = "code";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_DATA: &str = "data";

/// Wire envelope shared by all resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T = Value> {
    pub code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(code: u16, message: impl Into<String>, data: Option<T>) -> Self {
        Self { code, message: message.into(), data }
    }
}

/// Anything that can be reported through the failure envelope.
///
/// `status` defaults the envelope code to 500 when absent; `public_message` falls back
/// to [`default_error_message`] when absent.
pub trait EnvelopeError {
    fn status(&self) -> Option<u16>;
    fn public_message(&self) -> Option<String>;
}

pub fn success_message(status: u16) -> &'static str {
    match status {
        201 => "created",
        204 => "deleted",
        _ => "operation succeeded",
    }
}

pub fn default_error_message(status: u16) -> &'static str {
    match status {
        400 => "invalid request parameters",
        401 => "unauthorized",
        403 => "forbidden",
        404 => "resource not found",
        500 => "internal server error",
        _ => "operation failed",
    }
}

/// Structural passthrough check: an object holding exactly `code` (integer),
/// `message` (string) and `data`. Nothing else counts as an envelope.
pub fn is_envelope(value: &Value) -> bool {
    let Some(obj) = value.as_object() else { return false };
    obj.len() == 3
        && obj.get(FIELD_CODE).is_some_and(|c| c.is_u64() || c.is_i64())
        && obj.get(FIELD_MESSAGE).is_some_and(Value::is_string)
        && obj.contains_key(FIELD_DATA)
}

/// Wrap a handler value. Values that already are envelopes pass through unchanged.
pub fn wrap_success(value: Option<Value>, status: u16) -> Value {
    match value {
        Some(v) if is_envelope(&v) => v,
        other => {
            let data = other.unwrap_or(Value::Null);
            envelope_value(status, success_message(status), data)
        }
    }
}

/// Build the failure envelope and the transport status it must be sent with.
pub fn wrap_failure<E: EnvelopeError + ?Sized>(err: &E) -> (u16, ApiResponse<Value>) {
    let status = err.status().unwrap_or(500);
    let message = err
        .public_message()
        .unwrap_or_else(|| default_error_message(status).to_string());
    (status, ApiResponse::new(status, message, None))
}

fn envelope_value(code: u16, message: &str, data: Value) -> Value {
    let mut obj = Map::with_capacity(3);
    obj.insert(FIELD_CODE.into(), Value::from(code));
    obj.insert(FIELD_MESSAGE.into(), Value::from(message));
    obj.insert(FIELD_DATA.into(), data);
    Value::Object(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Failure {
        status: Option<u16>,
        message: Option<String>,
    }

    impl EnvelopeError for Failure {
        fn status(&self) -> Option<u16> { self.status }
        fn public_message(&self) -> Option<String> { self.message.clone() }
    }

    #[test]
    fn wraps_plain_value_with_status_message() {
        let out = wrap_success(Some(json!({"id": 1, "slug": "hello"})), 201);
        assert_eq!(out, json!({"code": 201, "message": "created", "data": {"id": 1, "slug": "hello"}}));
    }

    #[test]
    fn missing_value_becomes_null_data() {
        let out = wrap_success(None, 204);
        assert_eq!(out, json!({"code": 204, "message": "deleted", "data": null}));
        let out = wrap_success(Some(Value::Null), 200);
        assert_eq!(out["data"], Value::Null);
        assert!(out.as_object().unwrap().contains_key("data"));
    }

    #[test]
    fn envelope_passes_through_unchanged() {
        let inner = json!({"code": 200, "message": "custom", "data": [1, 2]});
        let once = wrap_success(Some(inner.clone()), 201);
        assert_eq!(once, inner);
        let twice = wrap_success(Some(once.clone()), 200);
        assert_eq!(twice, once);
    }

    #[test]
    fn partial_envelope_shape_is_wrapped() {
        let lookalike = json!({"code": 1, "data": "x"});
        let out = wrap_success(Some(lookalike.clone()), 200);
        assert_eq!(out["data"], lookalike);
        assert_eq!(out["message"], "operation succeeded");
    }

    #[test]
    fn extra_fields_or_wrong_types_are_not_envelopes() {
        assert!(!is_envelope(&json!({"code": 200, "message": "m", "data": null, "extra": true})));
        assert!(!is_envelope(&json!({"code": "200", "message": "m", "data": null})));
        assert!(!is_envelope(&json!({"code": 200, "message": 5, "data": null})));
        assert!(!is_envelope(&json!([1, 2, 3])));
        assert!(is_envelope(&json!({"code": 404, "message": "m", "data": null})));
    }

    #[test]
    fn unlisted_success_codes_use_default_message() {
        assert_eq!(success_message(202), "operation succeeded");
        assert_eq!(success_message(200), "operation succeeded");
    }

    #[test]
    fn failure_defaults_to_500_and_generic_message() {
        let (status, env) = wrap_failure(&Failure { status: None, message: None });
        assert_eq!(status, 500);
        assert_eq!(env, ApiResponse::new(500, "internal server error", None));
    }

    #[test]
    fn failure_keeps_explicit_message() {
        let (status, env) = wrap_failure(&Failure { status: Some(400), message: Some("slug already exists".into()) });
        assert_eq!(status, 400);
        assert_eq!(env.message, "slug already exists");
        assert!(env.data.is_none());
    }

    #[test]
    fn failure_default_messages_by_status() {
        for (code, msg) in [
            (400, "invalid request parameters"),
            (401, "unauthorized"),
            (403, "forbidden"),
            (404, "resource not found"),
            (418, "operation failed"),
        ] {
            let (_, env) = wrap_failure(&Failure { status: Some(code), message: None });
            assert_eq!(env.message, msg);
        }
    }

    #[test]
    fn failure_envelope_serializes_null_data() {
        let (_, env) = wrap_failure(&Failure { status: Some(404), message: None });
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v, json!({"code": 404, "message": "resource not found", "data": null}));
        assert!(is_envelope(&v));
    }
}
