use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::response::wrap_failure;
use service::errors::ServiceError;
use tracing::error;

use crate::observability;

/// Handler error: a service failure rendered as the failure envelope.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self { ApiError(e) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.0 {
            e if e.is_internal() => error!(error = %e, "internal error"),
            ServiceError::Conflict(_) => observability::record_slug_conflict(),
            _ => {}
        }
        let (code, body) = wrap_failure(&self.0);
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
