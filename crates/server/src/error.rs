//! Unified request error handling.
//!
//! Provides a single `AppError` type for route handlers; every user-facing
//! failure is terminal for the request and returns a structured
//! `{code, message}` JSON body. All route handlers should return
//! `Result<T, AppError>`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

use crate::services::AuthError;
use crate::store::StoreError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Record store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// A store file or record is absent.
    #[error("data not found: {0}")]
    DataNotFound(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid credential.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Structured error body returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::UserNotFound => StatusCode::NOT_FOUND,
                AuthError::PasswordMismatch => StatusCode::BAD_REQUEST,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
                AuthError::PasswordHash | AuthError::Token(_) | AuthError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::DataNotFound(_) | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Store(_) | Self::Internal(_) => "INTERNAL_ERROR",
            Self::Auth(err) => match err {
                AuthError::UserNotFound => "NOT_FOUND",
                AuthError::PasswordMismatch => "BAD_REQUEST",
                AuthError::UserAlreadyExists => "CONFLICT",
                AuthError::InvalidToken => "UNAUTHORIZED",
                AuthError::PasswordHash | AuthError::Token(_) | AuthError::Store(_) => {
                    "INTERNAL_ERROR"
                }
            },
            Self::DataNotFound(_) => "DATA_NOT_FOUND",
            Self::NotFound(_) => "NOT_FOUND",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Unauthorized(_) => "UNAUTHORIZED",
        }
    }

    /// Client-facing message. Internal error details stay in the logs.
    fn message(&self) -> String {
        match self {
            Self::Store(_) | Self::Internal(_) => "Internal server error".to_string(),
            Self::Auth(err) => match err {
                AuthError::UserNotFound => "User Not Found".to_string(),
                AuthError::PasswordMismatch => "Password Mismatch".to_string(),
                AuthError::UserAlreadyExists => {
                    "An account with this email already exists".to_string()
                }
                AuthError::InvalidToken => "Invalid access token".to_string(),
                AuthError::PasswordHash | AuthError::Token(_) | AuthError::Store(_) => {
                    "Internal server error".to_string()
                }
            },
            Self::DataNotFound(msg)
            | Self::NotFound(msg)
            | Self::BadRequest(msg)
            | Self::Unauthorized(msg) => msg.clone(),
        }
    }

    fn is_internal(&self) -> bool {
        self.status() == StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_internal() {
            tracing::error!(error = %self, "Request error");
        }

        let body = ErrorBody {
            code: self.code(),
            message: self.message(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
