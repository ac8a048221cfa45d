//! Risk level shared by the stroke scorer and the sickness classifier.

use serde::{Deserialize, Serialize};

/// Coarse risk bucket.
///
/// Variants are declared in ascending order so `Ord` follows severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Few or no risk indicators
    Low,
    /// Some indicators, follow-up recommended
    Medium,
    /// Multiple significant indicators, consultation advised
    High,
}

impl RiskLevel {
    /// Move one level toward `High`. `High` stays `High`.
    #[must_use]
    pub fn escalate(self) -> Self {
        match self {
            Self::Low => Self::Medium,
            Self::Medium | Self::High => Self::High,
        }
    }

    /// Get a human-readable description.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Low => "Low risk - No significant indicators",
            Self::Medium => "Medium risk - Follow-up recommended",
            Self::High => "High risk - Immediate consultation advised",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::High => write!(f, "HIGH"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escalate_moves_one_level() {
        assert_eq!(RiskLevel::Low.escalate(), RiskLevel::Medium);
        assert_eq!(RiskLevel::Medium.escalate(), RiskLevel::High);
        assert_eq!(RiskLevel::High.escalate(), RiskLevel::High);
    }

    #[test]
    fn test_ordering_follows_severity() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            assert!(level.escalate() >= level);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&RiskLevel::Medium).expect("Should serialize");
        assert_eq!(json, "\"medium\"");
        let parsed: RiskLevel = serde_json::from_str("\"high\"").expect("Should parse");
        assert_eq!(parsed, RiskLevel::High);
    }
}
