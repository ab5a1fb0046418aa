//! Request validation for the CropSim prediction endpoints
//!
//! Each endpoint has its own typed schema, parsed out of a raw JSON body
//! with per-field error collection so one response can name every problem
//! at once. Error texts match what API clients already handle.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::models::{CropType, SoilType};

/// Wire format for planting dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

const REQUIRED: &str = "This field is required.";
const NOT_A_NUMBER: &str = "A valid number is required.";
const NOT_A_STRING: &str = "Not a valid string.";
const BAD_DATE: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
const NOT_AN_OBJECT: &str = "Invalid data. Expected a JSON object.";

// ============================================================================
// Field Errors
// ============================================================================

/// Field name to error messages, returned as the body of a 400 response.
///
/// Backed by an ordered map so responses list fields deterministically.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }
}

// ============================================================================
// Request Schemas
// ============================================================================

/// Validated body of a growth stage request
#[derive(Debug, Clone, PartialEq)]
pub struct GrowthStageRequest {
    pub crop_type: CropType,
    pub soil_type: SoilType,
    pub planting_date: NaiveDate,
    pub moisture: f64,
    pub temperature: f64,
    pub sunlight: f64,
    pub humidity: f64,
    pub rainfall: f64,
    pub soil_ph: f64,
}

impl GrowthStageRequest {
    /// Parse and validate a raw JSON body, collecting every field error.
    pub fn parse(body: &Value) -> Result<Self, FieldErrors> {
        let map = as_object(body)?;
        let mut errors = FieldErrors::default();

        let crop_type = require_choice::<CropType>(map, "crop_type", &mut errors);
        let soil_type = require_choice::<SoilType>(map, "soil_type", &mut errors);
        let planting_date = require_date(map, "planting_date", &mut errors);
        let moisture = require_number(map, "moisture", &mut errors);
        let temperature = require_number(map, "temperature", &mut errors);
        let sunlight = require_number(map, "sunlight", &mut errors);
        let humidity = require_number(map, "humidity", &mut errors);
        let rainfall = require_number(map, "rainfall", &mut errors);
        let soil_ph = require_number(map, "soil_ph", &mut errors);

        if let (
            Some(crop_type),
            Some(soil_type),
            Some(planting_date),
            Some(moisture),
            Some(temperature),
            Some(sunlight),
            Some(humidity),
            Some(rainfall),
            Some(soil_ph),
        ) = (
            crop_type,
            soil_type,
            planting_date,
            moisture,
            temperature,
            sunlight,
            humidity,
            rainfall,
            soil_ph,
        ) {
            Ok(GrowthStageRequest {
                crop_type,
                soil_type,
                planting_date,
                moisture,
                temperature,
                sunlight,
                humidity,
                rainfall,
                soil_ph,
            })
        } else {
            Err(errors)
        }
    }
}

/// Validated body of a yield request.
///
/// `crop_type` and `soil_type` stay free-form strings on this path: the
/// stored label encoders, not the schema, decide which categories exist.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldRequest {
    pub crop_type: String,
    pub soil_type: String,
    pub planting_date: NaiveDate,
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    pub soil_ph: f64,
    /// Stored as-is when present, never defaulted
    pub moisture: Option<f64>,
    pub sunlight: f64,
    pub rainfall: f64,
}

impl YieldRequest {
    /// Parse and validate a raw JSON body, collecting every field error.
    pub fn parse(body: &Value) -> Result<Self, FieldErrors> {
        let map = as_object(body)?;
        let mut errors = FieldErrors::default();

        let crop_type = require_text(map, "crop_type", &mut errors);
        let soil_type = require_text(map, "soil_type", &mut errors);
        let planting_date = require_date(map, "planting_date", &mut errors);
        let nitrogen = require_number(map, "N", &mut errors);
        let phosphorus = require_number(map, "P", &mut errors);
        let potassium = require_number(map, "K", &mut errors);
        let temperature = require_number(map, "Temperature", &mut errors);
        let humidity = require_number(map, "Humidity", &mut errors);
        let wind_speed = require_number(map, "Wind_Speed", &mut errors);
        let soil_ph = require_number(map, "Soil_pH", &mut errors);

        let moisture = optional_number(map, "moisture", &mut errors);
        let sunlight = optional_number(map, "sunlight", &mut errors).unwrap_or(0.0);
        let rainfall = optional_number(map, "rainfall", &mut errors).unwrap_or(0.0);

        if let (
            Some(crop_type),
            Some(soil_type),
            Some(planting_date),
            Some(nitrogen),
            Some(phosphorus),
            Some(potassium),
            Some(temperature),
            Some(humidity),
            Some(wind_speed),
            Some(soil_ph),
        ) = (
            crop_type,
            soil_type,
            planting_date,
            nitrogen,
            phosphorus,
            potassium,
            temperature,
            humidity,
            wind_speed,
            soil_ph,
        ) {
            if errors.is_empty() {
                Ok(YieldRequest {
                    crop_type,
                    soil_type,
                    planting_date,
                    nitrogen,
                    phosphorus,
                    potassium,
                    temperature,
                    humidity,
                    wind_speed,
                    soil_ph,
                    moisture,
                    sunlight,
                    rainfall,
                })
            } else {
                Err(errors)
            }
        } else {
            Err(errors)
        }
    }
}

// ============================================================================
// Field Parsers
// ============================================================================

fn as_object(body: &Value) -> Result<&Map<String, Value>, FieldErrors> {
    body.as_object().ok_or_else(|| {
        let mut errors = FieldErrors::default();
        errors.push("non_field_errors", NOT_AN_OBJECT);
        errors
    })
}

/// Accept JSON numbers and numeric strings, as form-encoded clients send.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn require_number(map: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<f64> {
    match map.get(field) {
        None | Some(Value::Null) => {
            errors.push(field, REQUIRED);
            None
        }
        Some(value) => match coerce_number(value) {
            Some(n) => Some(n),
            None => {
                errors.push(field, NOT_A_NUMBER);
                None
            }
        },
    }
}

/// Absent and null are fine for optional fields; present values must
/// still be numeric.
fn optional_number(map: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<f64> {
    match map.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => match coerce_number(value) {
            Some(n) => Some(n),
            None => {
                errors.push(field, NOT_A_NUMBER);
                None
            }
        },
    }
}

fn require_text(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<String> {
    match map.get(field) {
        None | Some(Value::Null) => {
            errors.push(field, REQUIRED);
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            errors.push(field, NOT_A_STRING);
            None
        }
    }
}

fn require_choice<T>(map: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<T>
where
    T: std::str::FromStr,
{
    let raw = match map.get(field) {
        None | Some(Value::Null) => {
            errors.push(field, REQUIRED);
            return None;
        }
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(field, format!("\"{raw}\" is not a valid choice."));
            None
        }
    }
}

fn require_date(
    map: &Map<String, Value>,
    field: &str,
    errors: &mut FieldErrors,
) -> Option<NaiveDate> {
    let raw = match map.get(field) {
        None | Some(Value::Null) => {
            errors.push(field, REQUIRED);
            return None;
        }
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            errors.push(field, BAD_DATE);
            return None;
        }
    };
    match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(field, BAD_DATE);
            None
        }
    }
}
