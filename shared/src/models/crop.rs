//! Crop observation model and the fixed crop/soil vocabularies

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error for a string that does not belong to a fixed vocabulary
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{value:?} is not a known {kind}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Crop types the service recognizes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CropType {
    Wheat,
    Rice,
    Maize,
    Barley,
    Soybean,
}

impl CropType {
    pub const ALL: [CropType; 5] = [
        CropType::Wheat,
        CropType::Rice,
        CropType::Maize,
        CropType::Barley,
        CropType::Soybean,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Wheat => "Wheat",
            CropType::Rice => "Rice",
            CropType::Maize => "Maize",
            CropType::Barley => "Barley",
            CropType::Soybean => "Soybean",
        }
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CropType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CropType::ALL
            .into_iter()
            .find(|crop| crop.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "crop type",
                value: s.to_string(),
            })
    }
}

/// Soil types the service recognizes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SoilType {
    Loamy,
    Clay,
    Sandy,
    Peaty,
}

impl SoilType {
    pub const ALL: [SoilType; 4] = [
        SoilType::Loamy,
        SoilType::Clay,
        SoilType::Sandy,
        SoilType::Peaty,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SoilType::Loamy => "Loamy",
            SoilType::Clay => "Clay",
            SoilType::Sandy => "Sandy",
            SoilType::Peaty => "Peaty",
        }
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SoilType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SoilType::ALL
            .into_iter()
            .find(|soil| soil.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "soil type",
                value: s.to_string(),
            })
    }
}

/// One stored combination of crop, soil and planting date, together with
/// the environmental measurements captured when the combination was first
/// seen. Later requests for the same combination do not update these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropObservation {
    pub id: i64,
    pub crop_type: CropType,
    pub soil_type: SoilType,
    pub planting_date: NaiveDate,
    /// Absent when the observation came from a yield request without one
    pub moisture: Option<f64>,
    pub temperature: f64,
    pub sunlight: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub soil_ph: f64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_type_round_trip() {
        for crop in CropType::ALL {
            assert_eq!(crop.as_str().parse::<CropType>(), Ok(crop));
        }
    }

    #[test]
    fn test_soil_type_round_trip() {
        for soil in SoilType::ALL {
            assert_eq!(soil.as_str().parse::<SoilType>(), Ok(soil));
        }
    }

    #[test]
    fn test_unknown_crop_type_rejected() {
        let err = "Cactus".parse::<CropType>().unwrap_err();
        assert_eq!(err.value, "Cactus");
    }

    #[test]
    fn test_vocabulary_is_case_sensitive() {
        assert!("wheat".parse::<CropType>().is_err());
        assert!("LOAMY".parse::<SoilType>().is_err());
    }

    #[test]
    fn test_serializes_to_wire_name() {
        let json = serde_json::to_string(&CropType::Soybean).unwrap();
        assert_eq!(json, "\"Soybean\"");
        let json = serde_json::to_string(&SoilType::Peaty).unwrap();
        assert_eq!(json, "\"Peaty\"");
    }
}
