//! Error handling - every failure renders as `{"error": "<message>"}`.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use blog_core::DomainError;
use blog_shared::ErrorResponse;

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Internal(detail) => tracing::error!("Internal error: {}", detail),
            AppError::NotFound(detail) => tracing::debug!("Not found: {}", detail),
            AppError::BadRequest(detail) => tracing::debug!("Bad request: {}", detail),
        }

        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}

// Conversion from domain errors. Storage messages pass through verbatim.
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        let message = err.to_string();
        match err {
            DomainError::InvalidArgument(_) => AppError::BadRequest(message),
            DomainError::NotFound { id } => {
                tracing::debug!(post_id = id, "Post lookup missed");
                AppError::NotFound(message)
            }
            DomainError::Storage(_) => AppError::Internal(message),
        }
    }
}

/// Malformed or non-JSON request bodies become a 400 with the usual error shape.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid JSON body: {}", err)).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
