//! API error handling
//!
//! Every failure is rendered as `{"error": "<message>"}`. Storage failures
//! are logged and reported with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use hr_core::error::ValidationErrors;
use hr_db::RepositoryError;
use serde::{Deserialize, Serialize};

pub const INTERNAL_ERROR_MESSAGE: &str = "internal error";

/// API error types
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    Validation(ValidationErrors),
    Unprocessable(String),
    Internal(String),
}

impl ApiError {
    pub fn unprocessable(msg: impl Into<String>) -> Self {
        ApiError::Unprocessable(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::Unprocessable(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message exposed to the caller
    pub fn message(&self) -> String {
        match self {
            ApiError::NotFound => "not found".to_string(),
            ApiError::Validation(errors) => errors
                .first_message()
                .unwrap_or("invalid payload")
                .to_string(),
            ApiError::Unprocessable(msg) => msg.clone(),
            ApiError::Internal(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Wire shape of every error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Internal(detail) => tracing::error!(%detail, "Request failed"),
            other => tracing::debug!(status = status.as_u16(), error = %other.message(), "Request rejected"),
        }

        let body = ErrorBody {
            error: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => ApiError::NotFound,
            RepositoryError::Validation(msg) => ApiError::Unprocessable(msg),
            RepositoryError::InvalidTransition(_) => ApiError::unprocessable("invalid transition"),
            RepositoryError::Database(e) => ApiError::internal(format!("Database error: {}", e)),
            RepositoryError::InvalidData(msg) => ApiError::internal(msg),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
