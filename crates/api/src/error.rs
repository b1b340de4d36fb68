//! Unified error handling.
//!
//! Provides a unified `AppError` type that maps the domain error taxonomy to
//! HTTP status codes. All route handlers return `Result<T, AppError>`;
//! services return their own typed errors and never format HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::orders::OrderError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Order placement failed.
    #[error("order error: {0}")]
    Order(#[from] OrderError),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Missing, invalid, or expired credentials.
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// Malformed or invalid client input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error body sent to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Database(_) | Self::Internal(_)) {
            tracing::error!(error = %self, "request failed");
        }

        let status = match &self {
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials
                | AuthError::InvalidToken
                | AuthError::UserNotFound => StatusCode::UNAUTHORIZED,
                AuthError::UserAlreadyExists => StatusCode::CONFLICT,
                AuthError::InvalidEmail(_) | AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
                AuthError::Repository(_) | AuthError::PasswordHash | AuthError::TokenCreation => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Order(err) => match err {
                OrderError::CapNotFound(_) => StatusCode::NOT_FOUND,
                OrderError::InsufficientStock { .. }
                | OrderError::InvalidQuantity { .. }
                | OrderError::EmptyOrder => StatusCode::BAD_REQUEST,
                OrderError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        };

        // Don't expose internal error details to clients
        let detail = match &self {
            Self::Database(_) | Self::Internal(_) => "Internal server error".to_owned(),
            Self::Auth(err) => match err {
                AuthError::InvalidCredentials | AuthError::UserNotFound => {
                    "Invalid credentials".to_owned()
                }
                AuthError::InvalidToken => "Invalid or expired token".to_owned(),
                AuthError::UserAlreadyExists => "Email already registered".to_owned(),
                AuthError::Repository(_) | AuthError::PasswordHash | AuthError::TokenCreation => {
                    "Internal server error".to_owned()
                }
                other => other.to_string(),
            },
            Self::Order(err) => match err {
                OrderError::Repository(_) => "Internal server error".to_owned(),
                other => other.to_string(),
            },
            Self::NotFound(msg) | Self::Unauthenticated(msg) | Self::InvalidArgument(msg) => {
                msg.clone()
            }
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use caps_store_core::CapId;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Cap not found".to_owned());
        assert_eq!(err.to_string(), "not found: Cap not found");
    }

    #[test]
    fn test_taxonomy_status_codes() {
        assert_eq!(
            status_of(AppError::NotFound("x".to_owned())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Unauthenticated("x".to_owned())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::InvalidArgument("x".to_owned())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Internal("x".to_owned())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_error_status_codes() {
        assert_eq!(
            status_of(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::UserAlreadyExists)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::Auth(AuthError::WeakPassword(
                "too short".to_owned()
            ))),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_order_error_status_codes() {
        assert_eq!(
            status_of(AppError::Order(OrderError::CapNotFound(CapId::new(9)))),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Order(OrderError::InsufficientStock {
                cap_id: CapId::new(1),
                requested: 5,
                available: 2,
            })),
            StatusCode::BAD_REQUEST
        );
    }
}
