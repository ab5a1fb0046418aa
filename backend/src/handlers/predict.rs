//! Prediction HTTP handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::Value;

use crate::error::AppError;
use crate::services::prediction::{round_yield, PredictionService};
use crate::AppState;
use shared::{GrowthStageRequest, YieldRequest};

/// Classify the growth stage for a set of field measurements
pub async fn predict_growth(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    tracing::debug!(%body, "growth stage prediction requested");
    let request = match GrowthStageRequest::parse(&body) {
        Ok(request) => request,
        Err(errors) => return AppError::Validation(errors).into_response(),
    };

    let service = PredictionService::new(state.db.clone(), state.artifacts.clone());

    match service.predict_growth_stage(request).await {
        Ok(stage) => (
            StatusCode::OK,
            Json(serde_json::json!({ "growth_stage": stage })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// Predict the crop yield for a set of field measurements
pub async fn predict_yield(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    tracing::debug!(%body, "yield prediction requested");
    let request = match YieldRequest::parse(&body) {
        Ok(request) => request,
        Err(errors) => return AppError::Validation(errors).into_response(),
    };

    let service = PredictionService::new(state.db.clone(), state.artifacts.clone());

    match service.predict_yield(request).await {
        Ok(value) => (
            StatusCode::OK,
            Json(serde_json::json!({ "predicted_yield": round_yield(value) })),
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
