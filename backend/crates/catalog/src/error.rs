//! Catalog Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;
use kernel::error::kind::ErrorKind;

/// Catalog module errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Requested product does not exist
    #[error("Product not found")]
    NotFound,

    /// Request payload rejected before touching the store
    #[error("Invalid product data: {0}")]
    Validation(String),

    /// Object storage failure (image upload/delete)
    #[error("Object storage error: {0}")]
    Storage(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::NotFound => StatusCode::NOT_FOUND,
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::NotFound => ErrorKind::NotFound,
            CatalogError::Validation(_) => ErrorKind::BadRequest,
            CatalogError::Storage(_) => ErrorKind::ServiceUnavailable,
            CatalogError::Database(_) | CatalogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log with a severity matching the failure class
    fn log(&self) {
        match self {
            CatalogError::Database(err) => {
                tracing::error!(error = %err, "Catalog database error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(error = %msg, "Catalog internal error");
            }
            CatalogError::Storage(msg) => {
                tracing::warn!(error = %msg, "Object storage error");
            }
            CatalogError::NotFound | CatalogError::Validation(_) => {
                tracing::debug!(error = %self, "Catalog request rejected");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(CatalogError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            CatalogError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            CatalogError::Storage("down".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            CatalogError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
