//! Domain models for the CropSim prediction service

mod crop;
mod prediction;

pub use crop::*;
pub use prediction::*;
