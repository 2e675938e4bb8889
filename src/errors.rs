//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion. Every variant is recovered at
//! the boundary of the request that produced it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Generic login failure message. Unknown user and wrong password share it.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication
    #[error("Authentication required")]
    Unauthorized,

    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    AuthenticationFailure,

    #[error("Username already taken")]
    DuplicateCredential,

    // Prediction
    #[error("Model unavailable: {0}")]
    ArtifactLoad(String),

    #[error("Invalid prediction input: {0}")]
    PredictionAssembly(String),

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Authentication error")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "UNAUTHORIZED",
            AppError::AuthenticationFailure => "INVALID_CREDENTIALS",
            AppError::DuplicateCredential => "DUPLICATE_CREDENTIAL",
            AppError::ArtifactLoad(_) => "MODEL_UNAVAILABLE",
            AppError::PredictionAssembly(_) => "PREDICTION_INPUT_INVALID",
            AppError::NotFound => "NOT_FOUND",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Jwt(_) => "AUTH_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::AuthenticationFailure | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::DuplicateCredential => StatusCode::CONFLICT,
            AppError::ArtifactLoad(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::PredictionAssembly(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::PredictionAssembly(msg) => format!("Invalid prediction input: {}", msg),

            // Hide details for internal/security errors
            AppError::ArtifactLoad(msg) => {
                tracing::warn!("Model artifact unavailable: {}", msg);
                "The prediction model is currently unavailable".to_string()
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("Session token rejected: {:?}", e);
                "Invalid or expired session".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }

            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    pub fn artifact_load(msg: impl Into<String>) -> Self {
        AppError::ArtifactLoad(msg.into())
    }

    pub fn prediction_assembly(msg: impl Into<String>) -> Self {
        AppError::PredictionAssembly(msg.into())
    }
}
