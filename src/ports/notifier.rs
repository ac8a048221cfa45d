//! Notifier port: completion notices for the presentation layer.

use serde::{Deserialize, Serialize};

/// User-facing completion notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Notice emitted after a stroke assessment.
    #[must_use]
    pub fn stroke_complete() -> Self {
        Self::new(
            "Stroke Risk Analysis Complete",
            "The risk analysis has been completed successfully.",
        )
    }

    /// Notice emitted after a sickness prediction.
    #[must_use]
    pub fn prediction_complete() -> Self {
        Self::new(
            "Prediction Complete",
            "Your health data has been analyzed successfully.",
        )
    }
}

/// Delivers completion notices (toast, log line, ...).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}
