//! Adapters layer: Concrete implementations of ports.
//!
//! - `rules`: hand-written stroke scorer and sickness classifier
//! - `notify`: log-backed completion notifications
//! - `sanitize`: patient identifier filtering for logs

pub mod notify;
pub mod rules;
pub mod sanitize;

pub use notify::LogNotifier;
pub use rules::{OrderedRuleClassifier, PolicyError, StrokePolicy, WeightedStrokeScorer};
