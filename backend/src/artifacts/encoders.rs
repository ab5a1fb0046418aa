//! Categorical label encoders for the yield model

use serde::Deserialize;
use std::collections::BTreeSet;

/// Encoder with scikit-learn `LabelEncoder` semantics: the code of a
/// value is its index in the ordered class list, and unseen values have
/// no code.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    /// Integer code for `value`, or `None` when the category is unseen.
    pub fn transform(&self, value: &str) -> Option<i64> {
        self.classes
            .iter()
            .position(|class| class == value)
            .map(|index| index as i64)
    }

    fn validate(&self, name: &str) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err(format!("{name} encoder has no classes"));
        }
        let mut seen = BTreeSet::new();
        for class in &self.classes {
            if !seen.insert(class) {
                return Err(format!("{name} encoder lists {class:?} twice"));
            }
        }
        Ok(())
    }
}

/// The two encoders the yield model was trained with
#[derive(Debug, Clone, Deserialize)]
pub struct LabelEncoderSet {
    #[serde(rename = "Crop_Type")]
    pub crop_type: LabelEncoder,
    #[serde(rename = "Soil_Type")]
    pub soil_type: LabelEncoder,
}

impl LabelEncoderSet {
    pub(super) fn validate(&self) -> Result<(), String> {
        self.crop_type.validate("Crop_Type")?;
        self.soil_type.validate("Soil_Type")?;
        Ok(())
    }
}
