use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::features::imports::dtos::ErrorResponseDto;

/// Errors returned by the bulk upload endpoints.
///
/// These endpoints speak a flat `{"error": "..."}` wire shape instead of
/// the standard response envelope, so they carry their own error type.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for ImportError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ImportError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ImportError::Database(e) => {
                error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponseDto { error: message })).into_response()
    }
}

pub type ImportResult<T> = std::result::Result<T, ImportError>;
