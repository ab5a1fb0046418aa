//! Prediction pipeline: feature vectors, model inference, persistence

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::artifacts::{ArtifactStore, GROWTH_FEATURES, YIELD_FEATURES};
use crate::error::{AppError, AppResult};
use crate::services::observation::{NewObservation, ObservationService};
use shared::{stage_from_score, GrowthStage, GrowthStageRequest, YieldRequest};

/// Runs validated requests through the trained models and records the
/// outcome
#[derive(Clone)]
pub struct PredictionService {
    db: SqlitePool,
    artifacts: Arc<ArtifactStore>,
}

impl PredictionService {
    /// Create a new PredictionService instance
    pub fn new(db: SqlitePool, artifacts: Arc<ArtifactStore>) -> Self {
        Self { db, artifacts }
    }

    /// Classify the growth stage, then persist the observation together
    /// with a zero-yield prediction record.
    pub async fn predict_growth_stage(
        &self,
        request: GrowthStageRequest,
    ) -> AppResult<GrowthStage> {
        let features = growth_features(&request);
        let score = self.artifacts.classifier.predict(&features);
        let stage = stage_from_score(score);
        tracing::debug!(score, stage = %stage, "growth stage classified");

        let observations = ObservationService::new(self.db.clone());
        let crop_id = observations
            .get_or_create(&NewObservation {
                crop_type: request.crop_type.to_string(),
                soil_type: request.soil_type.to_string(),
                planting_date: request.planting_date,
                moisture: Some(request.moisture),
                temperature: request.temperature,
                sunlight: request.sunlight,
                humidity: request.humidity,
                rainfall: request.rainfall,
                soil_ph: request.soil_ph,
            })
            .await?;
        observations
            .record_prediction(crop_id, Some(stage), 0.0)
            .await?;

        Ok(stage)
    }

    /// Encode the categories, regress the yield, persist a stage-less
    /// prediction record. Returns the unrounded yield; rounding happens
    /// at the response edge.
    pub async fn predict_yield(&self, request: YieldRequest) -> AppResult<f64> {
        let encoders = &self.artifacts.encoders;
        let (crop_code, soil_code) = match (
            encoders.crop_type.transform(&request.crop_type),
            encoders.soil_type.transform(&request.soil_type),
        ) {
            (Some(crop_code), Some(soil_code)) => (crop_code, soil_code),
            _ => return Err(AppError::UnknownCategory),
        };

        let features = yield_features(crop_code, soil_code, &request);
        let predicted_yield = self.artifacts.regressor.predict(&features);
        tracing::debug!(predicted_yield, "yield predicted");

        let observations = ObservationService::new(self.db.clone());
        let crop_id = observations
            .get_or_create(&NewObservation {
                crop_type: request.crop_type.clone(),
                soil_type: request.soil_type.clone(),
                planting_date: request.planting_date,
                moisture: request.moisture,
                temperature: request.temperature,
                sunlight: request.sunlight,
                humidity: request.humidity,
                rainfall: request.rainfall,
                soil_ph: request.soil_ph,
            })
            .await?;
        observations
            .record_prediction(crop_id, None, predicted_yield)
            .await?;

        Ok(predicted_yield)
    }
}

/// Feature vector for the growth stage classifier, in training order
fn growth_features(request: &GrowthStageRequest) -> [f64; GROWTH_FEATURES] {
    [
        request.moisture,
        request.temperature,
        request.sunlight,
        request.humidity,
        request.rainfall,
        request.soil_ph,
    ]
}

/// Feature vector for the yield regressor, in training order: the two
/// categorical codes lead, then nutrients and weather
fn yield_features(crop_code: i64, soil_code: i64, request: &YieldRequest) -> [f64; YIELD_FEATURES] {
    [
        crop_code as f64,
        soil_code as f64,
        request.nitrogen,
        request.phosphorus,
        request.potassium,
        request.temperature,
        request.humidity,
        request.wind_speed,
        request.soil_ph,
    ]
}

/// Round a yield to the two decimal places the API responds with
pub fn round_yield(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
