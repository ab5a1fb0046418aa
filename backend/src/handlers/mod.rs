//! HTTP handlers for the CropSim prediction service

pub mod health;
pub mod predict;

pub use health::health_check;
pub use predict::{predict_growth, predict_yield};
