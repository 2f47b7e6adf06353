use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::{
    auth::jwt::TokenError, response::ErrorBody, users::StoreError, validation::ValidationError,
};

/// Every failure a handler can surface. Converts into the error envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("User already exists")]
    Conflict,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error(transparent)]
    InvalidToken(#[from] TokenError),
    #[error("{0}")]
    Unauthorized(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict => AppError::Conflict,
            StoreError::Backend(e) => AppError::Internal(e),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Conflict => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials
            | AppError::InvalidToken(_)
            | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            AppError::Validation(detail) => ErrorBody::with_detail("Validation failed", detail),
            AppError::Internal(e) => {
                error!(error = ?e, "internal error");
                ErrorBody::new("Internal server error")
            }
            other => ErrorBody::new(other.to_string()),
        };
        (status, Json(body)).into_response()
    }
}
