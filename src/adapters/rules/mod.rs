//! Hand-written rule engines implementing the scoring ports.
//!
//! - `policy`: stroke scoring constants (presets and JSON policy files)
//! - `stroke`: weighted additive stroke scorer
//! - `sickness`: first-match-wins symptom classifier

pub mod policy;
pub mod sickness;
pub mod stroke;

pub use policy::{PolicyError, StrokePolicy};
pub use sickness::OrderedRuleClassifier;
pub use stroke::WeightedStrokeScorer;
