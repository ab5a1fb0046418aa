//! Shared types and models for the CropSim prediction service
//!
//! This crate contains the domain model and request validation used by the
//! backend and its integration tests.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
