//! Auth Error Types
//!
//! The closed error taxonomy for the session subsystem. Every provider or
//! network failure is translated into exactly one of these variants before
//! it reaches a handler; handlers and middleware match exhaustively.
//! Integrates with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;
use uuid::Uuid;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login credentials rejected by the identity provider
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No session artifact presented
    #[error("Not authenticated")]
    Unauthenticated,

    /// Session artifact presented but rejected by the provider (expired/malformed)
    #[error("Session is invalid or expired")]
    InvalidSession,

    /// Authenticated but role is insufficient for the route
    #[error("Administrator role required")]
    Unauthorized,

    /// Identity exists at the provider but has no directory record.
    /// Operator-facing data-integrity defect, not user-recoverable.
    #[error("No role record found for user")]
    RoleNotFound,

    /// Identity account was created but the directory insert failed,
    /// leaving an orphaned provider account to reconcile.
    #[error("Account created but profile provisioning failed")]
    ProfileProvisioningFailed { identity_id: Uuid },

    /// Identity provider rejected the account creation (taken email,
    /// weak password, ...). Registration failures are 400 by contract.
    #[error("Registration rejected: {0}")]
    Registration(String),

    /// Transport-level or unexpected failure talking to the identity provider
    #[error("Identity provider unavailable: {0}")]
    Provider(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::Unauthenticated
            | AuthError::InvalidSession => StatusCode::UNAUTHORIZED,
            AuthError::Unauthorized => StatusCode::FORBIDDEN,
            AuthError::RoleNotFound => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::ProfileProvisioningFailed { .. } | AuthError::Registration(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthError::Provider(_) => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::Unauthenticated
            | AuthError::InvalidSession => ErrorKind::Unauthorized,
            AuthError::Unauthorized => ErrorKind::Forbidden,
            AuthError::RoleNotFound => ErrorKind::InternalServerError,
            AuthError::ProfileProvisioningFailed { .. } | AuthError::Registration(_) => {
                ErrorKind::BadRequest
            }
            AuthError::Provider(_) => ErrorKind::ServiceUnavailable,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::InvalidSession => {
                AppError::new(self.kind(), self.to_string()).with_action("Please sign in again")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::Provider(msg) => {
                tracing::error!(message = %msg, "Identity provider failure");
            }
            AuthError::RoleNotFound => {
                tracing::error!("User has no directory role record");
            }
            AuthError::ProfileProvisioningFailed { identity_id } => {
                tracing::error!(
                    identity_id = %identity_id,
                    "Directory insert failed after identity creation; orphaned account needs reconciliation"
                );
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
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
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping_matches_contract() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::InvalidSession.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Unauthorized.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            AuthError::RoleNotFound.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AuthError::ProfileProvisioningFailed {
                identity_id: Uuid::new_v4()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Registration("taken".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AuthError::Provider("down".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
