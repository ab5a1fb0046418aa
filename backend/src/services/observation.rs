//! Crop observation persistence: get-or-create plus prediction records

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::error::AppResult;
use shared::{
    stage_from_label, stage_label, CropObservation, GrowthStage, PredictionRecord, UnknownVariant,
};

/// Service managing the crops and predictions tables
#[derive(Clone)]
pub struct ObservationService {
    db: SqlitePool,
}

/// Measurements stored when a (crop, soil, planting date) combination is
/// first seen. Later requests for the same combination leave them as-is.
#[derive(Debug, Clone)]
pub struct NewObservation {
    pub crop_type: String,
    pub soil_type: String,
    pub planting_date: NaiveDate,
    pub moisture: Option<f64>,
    pub temperature: f64,
    pub sunlight: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub soil_ph: f64,
}

/// Database row for a crop observation
#[derive(Debug, Clone, sqlx::FromRow)]
struct ObservationRow {
    id: i64,
    crop_type: String,
    soil_type: String,
    planting_date: NaiveDate,
    moisture: Option<f64>,
    temperature: f64,
    sunlight: f64,
    humidity: f64,
    rainfall: f64,
    soil_ph: f64,
    created_at: DateTime<Utc>,
}

impl TryFrom<ObservationRow> for CropObservation {
    type Error = UnknownVariant;

    fn try_from(row: ObservationRow) -> Result<Self, Self::Error> {
        Ok(CropObservation {
            id: row.id,
            crop_type: row.crop_type.parse()?,
            soil_type: row.soil_type.parse()?,
            planting_date: row.planting_date,
            moisture: row.moisture,
            temperature: row.temperature,
            sunlight: row.sunlight,
            humidity: row.humidity,
            rainfall: row.rainfall,
            soil_ph: row.soil_ph,
            created_at: row.created_at,
        })
    }
}

/// Database row for a prediction record
#[derive(Debug, Clone, sqlx::FromRow)]
struct PredictionRow {
    id: i64,
    crop_id: i64,
    growth_stage: String,
    predicted_yield: f64,
    prediction_date: NaiveDate,
}

impl TryFrom<PredictionRow> for PredictionRecord {
    type Error = UnknownVariant;

    fn try_from(row: PredictionRow) -> Result<Self, Self::Error> {
        Ok(PredictionRecord {
            id: row.id,
            crop_id: row.crop_id,
            growth_stage: stage_from_label(&row.growth_stage)?,
            predicted_yield: row.predicted_yield,
            prediction_date: row.prediction_date,
        })
    }
}

impl ObservationService {
    /// Create a new ObservationService instance
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Get or create the observation for a (crop, soil, planting date)
    /// combination.
    ///
    /// The conditional insert against the UNIQUE constraint keeps this
    /// safe under concurrent callers; whichever request inserts first
    /// owns the stored measurements.
    pub async fn get_or_create(&self, observation: &NewObservation) -> AppResult<i64> {
        sqlx::query(
            r#"
            INSERT INTO crops (crop_type, soil_type, planting_date, moisture,
                               temperature, sunlight, humidity, rainfall, soil_ph, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (crop_type, soil_type, planting_date) DO NOTHING
            "#,
        )
        .bind(&observation.crop_type)
        .bind(&observation.soil_type)
        .bind(observation.planting_date)
        .bind(observation.moisture)
        .bind(observation.temperature)
        .bind(observation.sunlight)
        .bind(observation.humidity)
        .bind(observation.rainfall)
        .bind(observation.soil_ph)
        .bind(Utc::now())
        .execute(&self.db)
        .await?;

        let id = sqlx::query_scalar::<_, i64>(
            "SELECT id FROM crops WHERE crop_type = ? AND soil_type = ? AND planting_date = ?",
        )
        .bind(&observation.crop_type)
        .bind(&observation.soil_type)
        .bind(observation.planting_date)
        .fetch_one(&self.db)
        .await?;

        Ok(id)
    }

    /// Append a prediction for an existing observation.
    ///
    /// The prediction date is assigned here from the server clock, never
    /// taken from the caller.
    pub async fn record_prediction(
        &self,
        crop_id: i64,
        growth_stage: Option<GrowthStage>,
        predicted_yield: f64,
    ) -> AppResult<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO predictions (crop_id, growth_stage, predicted_yield, prediction_date)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(crop_id)
        .bind(stage_label(growth_stage))
        .bind(predicted_yield)
        .bind(Utc::now().date_naive())
        .fetch_one(&self.db)
        .await?;

        Ok(id)
    }

    /// Stored observation for a combination, if there is one
    pub async fn find_observation(
        &self,
        crop_type: &str,
        soil_type: &str,
        planting_date: NaiveDate,
    ) -> AppResult<Option<CropObservation>> {
        let row = sqlx::query_as::<_, ObservationRow>(
            r#"
            SELECT id, crop_type, soil_type, planting_date, moisture, temperature,
                   sunlight, humidity, rainfall, soil_ph, created_at
            FROM crops
            WHERE crop_type = ? AND soil_type = ? AND planting_date = ?
            "#,
        )
        .bind(crop_type)
        .bind(soil_type)
        .bind(planting_date)
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(CropObservation::try_from).transpose()?)
    }

    /// All predictions recorded against an observation, oldest first
    pub async fn predictions_for(&self, crop_id: i64) -> AppResult<Vec<PredictionRecord>> {
        let rows = sqlx::query_as::<_, PredictionRow>(
            r#"
            SELECT id, crop_id, growth_stage, predicted_yield, prediction_date
            FROM predictions
            WHERE crop_id = ?
            ORDER BY id
            "#,
        )
        .bind(crop_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter()
            .map(|row| Ok(PredictionRecord::try_from(row)?))
            .collect()
    }
}
