//! Error handling for the CropSim prediction service
//!
//! Maps service failures onto the JSON error bodies the API exposes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use shared::{FieldErrors, UnknownVariant};

/// Body text returned when a categorical value is unknown to the yield
/// encoders. Clients match on this string.
pub const INVALID_CATEGORY_MESSAGE: &str = "Invalid crop_type or soil_type";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Request errors
    #[error("request failed validation")]
    Validation(FieldErrors),

    #[error("crop_type or soil_type unknown to the stored encoders")]
    UnknownCategory,

    // Data integrity errors
    #[error("stored value no longer decodes: {0}")]
    Corrupted(#[from] UnknownVariant),

    // Database errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                tracing::debug!(?errors, "request failed validation");
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            AppError::UnknownCategory => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": INVALID_CATEGORY_MESSAGE })),
            )
                .into_response(),
            AppError::Corrupted(_) | AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!("Error: {:?}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
