use common::response::EnvelopeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Transport status for this error class.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) | ServiceError::Conflict(_) => 400,
            ServiceError::NotFound(_) => 404,
            ServiceError::Internal(_) => 500,
            ServiceError::Model(models::errors::ModelError::Validation(_)) => 400,
        }
    }

    pub fn is_internal(&self) -> bool { self.status_code() >= 500 }
}

impl EnvelopeError for ServiceError {
    fn status(&self) -> Option<u16> { Some(self.status_code()) }

    // internal detail never reaches the wire
    fn public_message(&self) -> Option<String> {
        match self {
            ServiceError::Validation(m) | ServiceError::Conflict(m) | ServiceError::NotFound(m) => Some(m.clone()),
            ServiceError::Model(models::errors::ModelError::Validation(m)) => Some(m.clone()),
            ServiceError::Internal(_) => None,
        }
    }
}
