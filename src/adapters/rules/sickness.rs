//! Ordered rule classifier for symptom-based sickness prediction.
//!
//! Rules are evaluated top to bottom and the first match decides the
//! condition and base risk. An escalation pass then raises (never lowers)
//! the risk according to the number of comorbidity/lifestyle flags.

use crate::domain::{Condition, RiskLevel, SicknessInput, SicknessResult, Symptom};
use crate::ports::SicknessClassifier;

/// Flag count at which risk is forced to `High`.
pub const FORCE_HIGH_FACTOR_COUNT: usize = 3;

/// Appended when the final risk level is high.
pub const HIGH_RISK_ADVICE: &str =
    "Your overall risk level is high. Arrange a consultation with a healthcare professional promptly.";

/// One entry of the ordered rule list.
#[derive(Clone, Copy)]
pub struct ClassificationRule {
    /// Short identifier for logs
    pub name: &'static str,
    pub matches: fn(&SicknessInput) -> bool,
    pub condition: Condition,
    pub risk: RiskLevel,
}

impl std::fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("name", &self.name)
            .field("condition", &self.condition)
            .field("risk", &self.risk)
            .finish_non_exhaustive()
    }
}

/// The rule list in priority order.
///
/// The final fallback (`Unknown`, low) is not a rule; it applies when
/// nothing matches.
#[must_use]
pub fn default_rules() -> Vec<ClassificationRule> {
    vec![
        ClassificationRule {
            name: "fever+cough",
            matches: |i| i.has_all(&[Symptom::Fever, Symptom::Cough]),
            condition: Condition::CommonColdOrFlu,
            risk: RiskLevel::Low,
        },
        ClassificationRule {
            name: "headache+nausea",
            matches: |i| i.has_all(&[Symptom::Headache, Symptom::Nausea]),
            condition: Condition::Migraine,
            risk: RiskLevel::Medium,
        },
        ClassificationRule {
            name: "chest-pain+shortness-of-breath",
            matches: |i| i.has_all(&[Symptom::ChestPain, Symptom::ShortnessOfBreath]),
            condition: Condition::PotentialCardiacIssue,
            risk: RiskLevel::High,
        },
        ClassificationRule {
            name: "fatigue+diabetes",
            matches: |i| i.has(Symptom::Fatigue) && i.diabetes,
            condition: Condition::DiabetesComplication,
            risk: RiskLevel::Medium,
        },
        ClassificationRule {
            name: "shortness-of-breath",
            matches: |i| i.has(Symptom::ShortnessOfBreath),
            condition: Condition::RespiratoryCondition,
            risk: RiskLevel::Medium,
        },
        ClassificationRule {
            name: "any-symptom",
            matches: |i| !i.symptoms.is_empty(),
            condition: Condition::GeneralMalaise,
            risk: RiskLevel::Low,
        },
    ]
}

/// Raise `base` according to the number of risk flags.
///
/// `>= 3` flags force `High`; `>= 1` escalates one level; `0` leaves it.
#[must_use]
pub fn escalate(base: RiskLevel, factor_count: usize) -> RiskLevel {
    if factor_count >= FORCE_HIGH_FACTOR_COUNT {
        RiskLevel::High
    } else if factor_count >= 1 {
        base.escalate()
    } else {
        base
    }
}

/// First-match-wins classifier over an ordered rule list.
#[derive(Debug, Clone)]
pub struct OrderedRuleClassifier {
    rules: Vec<ClassificationRule>,
}

impl OrderedRuleClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    #[must_use]
    pub fn with_rules(rules: Vec<ClassificationRule>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// First matching rule, if any.
    #[must_use]
    pub fn matching_rule(&self, input: &SicknessInput) -> Option<&ClassificationRule> {
        self.rules.iter().find(|rule| (rule.matches)(input))
    }
}

impl Default for OrderedRuleClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SicknessClassifier for OrderedRuleClassifier {
    fn classify(&self, input: &SicknessInput) -> SicknessResult {
        let (condition, base_risk) = match self.matching_rule(input) {
            Some(rule) => {
                tracing::debug!("Sickness rule `{}` matched", rule.name);
                (rule.condition, rule.risk)
            }
            None => (Condition::Unknown, RiskLevel::Low),
        };

        let factor_count = input.risk_factor_count();
        let risk_level = escalate(base_risk, factor_count);
        if risk_level != base_risk {
            tracing::debug!(
                "Risk escalated {} -> {} ({} risk factor(s))",
                base_risk,
                risk_level,
                factor_count
            );
        }

        let mut recommendations = vec![condition.guidance().to_string()];
        if risk_level == RiskLevel::High {
            recommendations.push(HIGH_RISK_ADVICE.to_string());
        }

        SicknessResult {
            predicted_condition: condition,
            risk_level,
            recommendations,
        }
    }
}
