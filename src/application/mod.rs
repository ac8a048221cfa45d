//! Application layer: Use cases and services.
//!
//! This module orchestrates domain logic with ports to implement
//! the core use cases of the application.

mod assessment;
mod worker;

pub use assessment::{
    Assessment, AssessmentOutcome, AssessmentService, SicknessSubmission, Submission,
};
pub use worker::{SubmissionHandle, SubmissionProgress, SubmissionWorker};
