//! Domain layer: Core business types and logic.
//!
//! This module contains plain Rust types with no I/O.
//! All types are serializable; form inputs are interpreted leniently.

pub mod numeric;
mod risk;
mod sickness;
mod stroke;

pub use risk::RiskLevel;
pub use sickness::{Condition, SicknessInput, SicknessResult, Symptom};
pub use stroke::{
    AlcoholConsumption, CategoryScheme, Contribution, RiskFactor, SmokingStatus,
    StrokeAssessmentInput, StrokeRiskResult,
};

/// Shown alongside every result.
pub const DISCLAIMER: &str = "This is only a prediction based on the information provided and should not be considered a medical diagnosis. Please consult with a healthcare professional for proper evaluation.";
