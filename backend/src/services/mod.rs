//! Business logic services for the CropSim prediction service

pub mod observation;
pub mod prediction;

pub use observation::ObservationService;
pub use prediction::PredictionService;
