//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system. Infrastructure
//! failures keep their detail for the server log but cross the HTTP
//! boundary as an opaque message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed request input (email format, password policy, code format)
    #[error("{0}")]
    Validation(String),

    /// Email already registered
    #[error("Email already registered")]
    EmailTaken,

    /// No identity for the given email
    #[error("Identity not found")]
    IdentityNotFound,

    /// Verification code missing, expired, or not matching
    #[error("Invalid or expired verification code")]
    InvalidOrExpiredCode,

    /// Invalid credentials (wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token failed signature or structural validation
    #[error("Invalid token")]
    TokenInvalid,

    /// Token is past its expiry
    #[error("Token expired")]
    TokenExpired,

    /// Token signing failed
    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Pending-state cache error
    #[error("Cache error: {0}")]
    Cache(String),

    /// Mail dispatch error
    #[error("Mail error: {0}")]
    Mail(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) | AuthError::InvalidOrExpiredCode => StatusCode::BAD_REQUEST,
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::IdentityNotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidCredentials | AuthError::TokenInvalid | AuthError::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::TokenIssuance(_)
            | AuthError::Database(_)
            | AuthError::Cache(_)
            | AuthError::Mail(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::InvalidOrExpiredCode => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::IdentityNotFound => ErrorKind::NotFound,
            AuthError::InvalidCredentials | AuthError::TokenInvalid | AuthError::TokenExpired => {
                ErrorKind::Unauthorized
            }
            AuthError::TokenIssuance(_)
            | AuthError::Database(_)
            | AuthError::Cache(_)
            | AuthError::Mail(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Server-side errors are replaced by an opaque message; their detail
    /// only ever appears in the log.
    pub fn to_app_error(&self) -> AppError {
        if self.kind().is_server_error() {
            AppError::new(self.kind(), "Internal server error")
        } else {
            AppError::new(self.kind(), self.to_string())
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Cache(msg) => {
                tracing::error!(message = %msg, "Pending-state cache error");
            }
            AuthError::Mail(msg) => {
                tracing::error!(message = %msg, "Verification mail dispatch failed");
            }
            AuthError::TokenIssuance(msg) => {
                tracing::error!(message = %msg, "Token signing failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenInvalid | AuthError::TokenExpired => {
                tracing::warn!(error = %self, "Refresh token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.kind().is_client_error() {
            AuthError::Validation(err.message().to_string())
        } else {
            AuthError::Internal(err.to_string())
        }
    }
}

impl From<PasswordPolicyError> for AuthError {
    fn from(err: PasswordPolicyError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
