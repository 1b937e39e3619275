//! Response normalization middleware.
//!
//! Every response leaving the API router is rewritten into the `{code, message, data}`
//! envelope: handler values are wrapped as success data, framework rejections (bad path
//! params, malformed bodies, unknown routes, wrong methods) become failure envelopes.

use axum::body::{to_bytes, Body};
use axum::extract::Request;
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use common::response::{default_error_message, is_envelope, wrap_failure, wrap_success, EnvelopeError};
use serde_json::Value;
use tracing::{error, warn};

use crate::observability;

/// A non-envelope error response produced outside the handlers.
struct Rejection {
    status: u16,
    message: Option<String>,
}

impl EnvelopeError for Rejection {
    fn status(&self) -> Option<u16> { Some(self.status) }

    fn public_message(&self) -> Option<String> {
        // server-side bodies may carry internals
        if self.status >= 500 {
            return None;
        }
        self.message.clone()
    }
}

fn is_json(parts: &axum::http::response::Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

fn json_response(mut parts: axum::http::response::Parts, value: &Value) -> Response {
    parts.headers.remove(header::CONTENT_LENGTH);
    parts
        .headers
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Response::from_parts(parts, Body::from(value.to_string()))
}

pub async fn normalize_response(req: Request, next: Next) -> Response {
    let res = next.run(req).await;
    let (mut parts, body) = res.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            error!(error = %e, "failed to buffer response body");
            observability::record_error_response(500);
            let (_, env) = wrap_failure(&Rejection { status: 500, message: None });
            return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(env)).into_response();
        }
    };
    let status = parts.status;
    let parsed: Option<Value> = if is_json(&parts) { serde_json::from_slice(&bytes).ok() } else { None };

    if status.is_success() {
        return match parsed {
            Some(v) => {
                let wrapped = wrap_success(Some(v), status.as_u16());
                json_response(parts, &wrapped)
            }
            None if bytes.is_empty() => json_response(parts, &wrap_success(None, status.as_u16())),
            // non-JSON payloads (text, html) are not ours to reshape
            None => Response::from_parts(parts, Body::from(bytes)),
        };
    }

    if !(status.is_client_error() || status.is_server_error()) {
        return Response::from_parts(parts, Body::from(bytes));
    }

    observability::record_error_response(status.as_u16());
    if let Some(v) = parsed.as_ref().filter(|v| is_envelope(v)) {
        return json_response(parts, v);
    }

    // body deserialization failures are input errors like any other
    if status == StatusCode::UNPROCESSABLE_ENTITY {
        parts.status = StatusCode::BAD_REQUEST;
    }
    let code = parts.status.as_u16();
    let text = String::from_utf8_lossy(&bytes).trim().to_string();
    if code >= 500 && !text.is_empty() {
        warn!(status = code, body = %text, "hiding server error body");
    }
    let (_, env) = wrap_failure(&Rejection {
        status: code,
        message: (!text.is_empty()).then_some(text),
    });
    let value = serde_json::to_value(&env).unwrap_or_else(|_| {
        serde_json::json!({ "code": code, "message": default_error_message(code), "data": null })
    });
    json_response(parts, &value)
}
