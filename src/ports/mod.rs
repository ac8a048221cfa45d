//! Ports layer: Trait definitions for the scoring engines and notifications.
//!
//! These traits define the boundaries between the application layer and the
//! concrete rule engines / presentation sinks.

mod notifier;
mod scoring;

pub use notifier::{Notification, Notifier};
pub use scoring::{SicknessClassifier, StrokeScorer};
