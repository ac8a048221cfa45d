//! # vitalrisk
//!
//! Rule-based health risk assessment for patient-reported form data.
//!
//! This crate provides:
//! - Stroke risk scoring (additive weights, clamped 0-100, categorised)
//! - Symptom-based sickness prediction (ordered rules plus risk escalation)
//! - A submission orchestrator with simulated processing latency
//!
//! Scoring is hand-written threshold logic, not a learned model.
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Core business types (form inputs, results, risk levels)
//! - `ports`: Trait definitions for the scoring engines and notifications
//! - `adapters`: Concrete implementations (rule engines, log notifier, log sanitizer)
//! - `application`: Use cases orchestrating domain and ports
//! - `config`: Environment-driven settings

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use domain::{
    Condition, RiskLevel, SicknessInput, SicknessResult, StrokeAssessmentInput, StrokeRiskResult,
    Symptom,
};

/// Result type for vitalrisk operations
pub type Result<T> = std::result::Result<T, VitalRiskError>;

/// Main error type for vitalrisk
#[derive(Debug, thiserror::Error)]
pub enum VitalRiskError {
    #[error("Invalid submission: {0}")]
    Validation(String),

    #[error("Scoring policy error: {0}")]
    Policy(#[from] adapters::PolicyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Submission worker failed: {0}")]
    Worker(String),
}
