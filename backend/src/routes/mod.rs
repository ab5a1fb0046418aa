//! Route definitions for the CropSim prediction service

use axum::{routing::post, Router};

use crate::{handlers, AppState};

/// Crop prediction routes.
///
/// The trailing slashes are part of the public contract; clients send
/// them and no redirect is issued for the slash-less form.
pub fn crop_routes() -> Router<AppState> {
    Router::new()
        .route("/predict-growth/", post(handlers::predict_growth))
        .route("/predict-yield/", post(handlers::predict_yield))
}
