//! Scoring ports: Traits for the two risk engines.
//!
//! Both contracts are total: implementations must return a result for every
//! input, treating unreadable fields as absent instead of failing.

use crate::domain::{SicknessInput, SicknessResult, StrokeAssessmentInput, StrokeRiskResult};

/// Maps a stroke assessment to a bounded score and category.
pub trait StrokeScorer: Send + Sync {
    /// Score a stroke assessment.
    ///
    /// The returned score is always within `0..=100`.
    fn score(&self, input: &StrokeAssessmentInput) -> StrokeRiskResult;

    /// Name of the active scoring policy, for logs.
    fn policy_name(&self) -> &str;
}

/// Maps a symptom/history record to a condition label and risk level.
pub trait SicknessClassifier: Send + Sync {
    /// Classify a sickness submission.
    fn classify(&self, input: &SicknessInput) -> SicknessResult;
}
