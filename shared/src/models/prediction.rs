//! Prediction records and the score-to-stage mapping

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::UnknownVariant;

/// Growth stages a crop moves through
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GrowthStage {
    Seedling,
    Vegetative,
    Reproductive,
    Maturity,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 4] = [
        GrowthStage::Seedling,
        GrowthStage::Vegetative,
        GrowthStage::Reproductive,
        GrowthStage::Maturity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Seedling => "Seedling",
            GrowthStage::Vegetative => "Vegetative",
            GrowthStage::Reproductive => "Reproductive",
            GrowthStage::Maturity => "Maturity",
        }
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for GrowthStage {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GrowthStage::ALL
            .into_iter()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "growth stage",
                value: s.to_string(),
            })
    }
}

/// Label stored for predictions that carry no growth stage
pub const STAGE_NOT_APPLICABLE: &str = "N/A";

/// Storage label for an optional growth stage
pub fn stage_label(stage: Option<GrowthStage>) -> &'static str {
    match stage {
        Some(stage) => stage.as_str(),
        None => STAGE_NOT_APPLICABLE,
    }
}

/// Decode a storage label back into an optional growth stage
pub fn stage_from_label(label: &str) -> Result<Option<GrowthStage>, UnknownVariant> {
    if label == STAGE_NOT_APPLICABLE {
        return Ok(None);
    }
    label.parse().map(Some)
}

/// Map a raw classifier score onto a growth stage.
///
/// The boundaries are service policy, not model output: each upper bound
/// is exclusive, so a score of exactly 25 is already Vegetative.
pub fn stage_from_score(score: f64) -> GrowthStage {
    if score < 25.0 {
        GrowthStage::Seedling
    } else if score < 50.0 {
        GrowthStage::Vegetative
    } else if score < 75.0 {
        GrowthStage::Reproductive
    } else {
        GrowthStage::Maturity
    }
}

/// One stored inference result tied to a crop observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionRecord {
    pub id: i64,
    pub crop_id: i64,
    /// Absent for yield-only predictions
    pub growth_stage: Option<GrowthStage>,
    pub predicted_yield: f64,
    pub prediction_date: NaiveDate,
}
