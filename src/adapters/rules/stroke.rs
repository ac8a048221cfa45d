//! Weighted stroke risk scorer.
//!
//! Additive point accumulation over the form's risk factors, clamped to
//! `0..=100`, then mapped onto a category by the policy's scheme.

use crate::domain::{Contribution, RiskFactor, StrokeAssessmentInput, StrokeRiskResult};
use crate::ports::StrokeScorer;

use super::policy::{StrokePolicy, MAX_POINTS};

/// Always appended when recommendations are enabled.
pub const GENERAL_RECOMMENDATIONS: [&str; 2] = [
    "Aim for at least 150 minutes of moderate physical activity per week.",
    "Eat a diet rich in fruits, vegetables and whole grains, and limit salt intake.",
];

/// Advisory sentence for a factor, if it has one.
#[must_use]
pub fn factor_recommendation(factor: RiskFactor) -> Option<&'static str> {
    match factor {
        RiskFactor::Hypertension => Some(
            "Monitor blood pressure regularly and follow the prescribed antihypertensive treatment.",
        ),
        RiskFactor::HeartDisease => Some(
            "Keep up regular cardiology follow-up and take heart medication as prescribed.",
        ),
        RiskFactor::HighGlucose => Some(
            "Have blood glucose checked and discuss diabetes screening with a physician.",
        ),
        RiskFactor::HighBmi => Some(
            "Work toward a healthy weight through a balanced diet and regular exercise.",
        ),
        RiskFactor::Smoking => Some(
            "Stop smoking and ask a healthcare provider about cessation programmes.",
        ),
        RiskFactor::Age | RiskFactor::Alcohol => None,
    }
}

/// Stroke scorer driven by a [`StrokePolicy`].
#[derive(Debug, Clone, Default)]
pub struct WeightedStrokeScorer {
    policy: StrokePolicy,
}

impl WeightedStrokeScorer {
    #[must_use]
    pub fn new(policy: StrokePolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &StrokePolicy {
        &self.policy
    }

    /// Points per factor, in form field order. Zero-point factors are omitted.
    #[must_use]
    pub fn contributions(&self, input: &StrokeAssessmentInput) -> Vec<Contribution> {
        let policy = &self.policy;

        let age_points = input
            .age_years()
            .and_then(|age| policy.age_bands.iter().find(|band| age > band.above))
            .map_or(0, |band| band.points);

        let hypertension_points = if input.has_hypertension() {
            policy.hypertension_points
        } else {
            0
        };

        let heart_disease_points = if input.has_heart_disease() {
            policy.heart_disease_points
        } else {
            0
        };

        let glucose_points = match input.glucose() {
            Some(level) if level > policy.glucose.cutoff => policy.glucose.points,
            _ => 0,
        };

        let bmi_points = policy.bmi.points(input.body_mass_index());
        let smoking_points = policy.smoking.points(input.smoking());
        let alcohol_points = policy
            .alcohol
            .as_ref()
            .map_or(0, |weights| weights.points(input.alcohol()));

        [
            (RiskFactor::Age, age_points),
            (RiskFactor::Hypertension, hypertension_points),
            (RiskFactor::HeartDisease, heart_disease_points),
            (RiskFactor::HighGlucose, glucose_points),
            (RiskFactor::HighBmi, bmi_points),
            (RiskFactor::Smoking, smoking_points),
            (RiskFactor::Alcohol, alcohol_points),
        ]
        .into_iter()
        .filter(|(_, points)| *points > 0)
        .map(|(factor, points)| Contribution { factor, points })
        .collect()
    }
}

/// Factor-specific sentences in factor order, then the general ones.
fn recommendations_for(contributions: &[Contribution]) -> Vec<String> {
    contributions
        .iter()
        .filter_map(|c| factor_recommendation(c.factor))
        .chain(GENERAL_RECOMMENDATIONS)
        .map(str::to_string)
        .collect()
}

impl StrokeScorer for WeightedStrokeScorer {
    fn score(&self, input: &StrokeAssessmentInput) -> StrokeRiskResult {
        let contributions = self.contributions(input);

        let total = contributions
            .iter()
            .fold(0u32, |acc, c| acc.saturating_add(c.points));
        let score = u8::try_from(total.min(MAX_POINTS)).unwrap_or(u8::MAX);
        let category = self.policy.categories.categorize(score);

        let recommendations = if self.policy.recommendations {
            recommendations_for(&contributions)
        } else {
            Vec::new()
        };

        tracing::debug!(
            "Stroke score {} (raw {}) from {} factor(s) under policy `{}`",
            score,
            total,
            contributions.len(),
            self.policy.name
        );

        StrokeRiskResult {
            score,
            category,
            scheme: self.policy.categories,
            factors: contributions,
            recommendations,
        }
    }

    fn policy_name(&self) -> &str {
        &self.policy.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::rules::policy::four_tier_age_bands;
    use crate::domain::{CategoryScheme, RiskLevel};

    fn field(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn maximal_input(glucose: &str) -> StrokeAssessmentInput {
        StrokeAssessmentInput {
            age: field("70"),
            hypertension: field("yes"),
            heart_disease: field("yes"),
            smoking_status: field("smokes"),
            alcohol_consumption: field("heavy"),
            glucose_level: field(glucose),
            bmi: field("32"),
            ..Default::default()
        }
    }

    fn healthy_input() -> StrokeAssessmentInput {
        StrokeAssessmentInput {
            age: field("40"),
            hypertension: field("no"),
            heart_disease: field("no"),
            smoking_status: field("never-smoked"),
            alcohol_consumption: field("none"),
            glucose_level: field("5.0"),
            bmi: field("22"),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_factors_clamp_to_100() {
        let scorer = WeightedStrokeScorer::new(StrokePolicy::detailed());
        let result = scorer.score(&maximal_input("7.5"));
        // 30 + 20 + 20 + 15 + 10 + 15 + 15 = 125
        assert_eq!(result.score, 100);
        assert_eq!(result.category, RiskLevel::High);

        let scorer = WeightedStrokeScorer::new(StrokePolicy::advisory());
        let result = scorer.score(&maximal_input("180"));
        assert_eq!(result.score, 100);
        assert_eq!(result.category, RiskLevel::High);
    }

    #[test]
    fn test_healthy_adult_scores_zero() {
        for policy in [StrokePolicy::detailed(), StrokePolicy::advisory()] {
            let scorer = WeightedStrokeScorer::new(policy);
            let result = scorer.score(&healthy_input());
            assert_eq!(result.score, 0);
            assert_eq!(result.category, RiskLevel::Low);
            assert!(result.factors.is_empty());
        }
    }

    #[test]
    fn test_three_tier_age_ladder() {
        let scorer = WeightedStrokeScorer::default();
        let score_for = |age: &str| {
            scorer
                .score(&StrokeAssessmentInput {
                    age: field(age),
                    ..Default::default()
                })
                .score
        };
        assert_eq!(score_for("66"), 30);
        assert_eq!(score_for("65"), 20);
        assert_eq!(score_for("56"), 20);
        assert_eq!(score_for("55"), 10);
        assert_eq!(score_for("46"), 10);
        assert_eq!(score_for("45"), 0);
        assert_eq!(score_for("31"), 0);
    }

    #[test]
    fn test_two_and_four_tier_age_ladders() {
        let advisory = WeightedStrokeScorer::new(StrokePolicy::advisory());
        let four_tier = WeightedStrokeScorer::new(StrokePolicy {
            age_bands: four_tier_age_bands(),
            ..StrokePolicy::detailed()
        });
        let age = |value: &str| StrokeAssessmentInput {
            age: field(value),
            ..Default::default()
        };

        assert_eq!(advisory.score(&age("60")).score, 15);
        assert_eq!(advisory.score(&age("70")).score, 30);
        assert_eq!(advisory.score(&age("40")).score, 0);

        assert_eq!(four_tier.score(&age("35")).score, 5);
        assert_eq!(four_tier.score(&age("30")).score, 0);
        assert_eq!(four_tier.score(&age("50")).score, 10);
    }

    #[test]
    fn test_malformed_numbers_behave_as_absent() {
        let scorer = WeightedStrokeScorer::default();
        let malformed = StrokeAssessmentInput {
            age: field("abc"),
            glucose_level: field("high"),
            bmi: field("n/a"),
            hypertension: field("yes"),
            ..Default::default()
        };
        let absent = StrokeAssessmentInput {
            hypertension: field("yes"),
            ..Default::default()
        };
        assert_eq!(scorer.score(&malformed), scorer.score(&absent));
        assert_eq!(scorer.score(&malformed).score, 20);
    }

    #[test]
    fn test_non_ascii_digits_score_as_absent() {
        let scorer = WeightedStrokeScorer::default();
        let input = StrokeAssessmentInput {
            age: field("\u{667}\u{660}"),
            glucose_level: field("\u{667}.\u{665}"),
            bmi: field("\u{663}\u{662}"),
            ..Default::default()
        };
        let result = scorer.score(&input);
        assert_eq!(result, scorer.score(&StrokeAssessmentInput::default()));
        assert_eq!(result.score, 0);
        assert!(result.factors.is_empty());
    }

    #[test]
    fn test_glucose_cutoff_depends_on_unit() {
        let glucose = |value: &str| StrokeAssessmentInput {
            glucose_level: field(value),
            ..Default::default()
        };
        let mmol = WeightedStrokeScorer::new(StrokePolicy::detailed());
        let mg = WeightedStrokeScorer::new(StrokePolicy::advisory());

        assert_eq!(mmol.score(&glucose("6.1")).score, 15);
        assert_eq!(mmol.score(&glucose("6")).score, 0);
        assert_eq!(mg.score(&glucose("141")).score, 15);
        assert_eq!(mg.score(&glucose("140")).score, 0);
        // A mg/dL reading is far above the mmol/L cutoff.
        assert_eq!(mmol.score(&glucose("100")).score, 15);
    }

    #[test]
    fn test_smoking_and_alcohol_weights() {
        let input = |smoking: &str, alcohol: &str| StrokeAssessmentInput {
            smoking_status: field(smoking),
            alcohol_consumption: field(alcohol),
            ..Default::default()
        };
        let detailed = WeightedStrokeScorer::new(StrokePolicy::detailed());
        assert_eq!(detailed.score(&input("formerly-smoked", "light")).score, 8);
        assert_eq!(detailed.score(&input("smokes", "moderate")).score, 23);

        // Advisory policy does not collect alcohol.
        let advisory = WeightedStrokeScorer::new(StrokePolicy::advisory());
        assert_eq!(advisory.score(&input("formerly-smoked", "heavy")).score, 10);
    }

    #[test]
    fn test_contributions_in_field_order() {
        let scorer = WeightedStrokeScorer::default();
        let result = scorer.score(&maximal_input("9"));
        let factors: Vec<RiskFactor> = result.risk_factors().collect();
        assert_eq!(
            factors,
            vec![
                RiskFactor::Age,
                RiskFactor::Hypertension,
                RiskFactor::HeartDisease,
                RiskFactor::HighGlucose,
                RiskFactor::HighBmi,
                RiskFactor::Smoking,
                RiskFactor::Alcohol,
            ]
        );
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn test_advisory_recommendations() {
        let scorer = WeightedStrokeScorer::new(StrokePolicy::advisory());
        let input = StrokeAssessmentInput {
            hypertension: field("yes"),
            bmi: field("27"),
            smoking_status: field("smokes"),
            ..Default::default()
        };
        let result = scorer.score(&input);

        assert_eq!(result.score, 35);
        assert_eq!(result.category, RiskLevel::Medium);
        assert_eq!(result.scheme, CategoryScheme::Graded);
        assert_eq!(result.headline(), "Moderate Risk");

        let expected: Vec<String> = [
            factor_recommendation(RiskFactor::Hypertension),
            factor_recommendation(RiskFactor::HighBmi),
            factor_recommendation(RiskFactor::Smoking),
        ]
        .into_iter()
        .flatten()
        .chain(GENERAL_RECOMMENDATIONS)
        .map(str::to_string)
        .collect();
        assert_eq!(result.recommendations, expected);
    }

    #[test]
    fn test_general_recommendations_always_present() {
        let scorer = WeightedStrokeScorer::new(StrokePolicy::advisory());
        let result = scorer.score(&StrokeAssessmentInput::default());
        assert_eq!(result.recommendations, GENERAL_RECOMMENDATIONS.map(str::to_string));
    }

    #[test]
    fn test_score_bounded_over_input_grid() {
        let ages = ["", "abc", "-5", "20", "50", "60", "90", "99999999999999999999"];
        let flags = ["", "yes", "no"];
        let smoking = ["", "never-smoked", "formerly-smoked", "smokes"];
        let numbers = ["", "x", "0", "27", "31", "500"];

        for policy in [StrokePolicy::detailed(), StrokePolicy::advisory()] {
            let scorer = WeightedStrokeScorer::new(policy);
            for age in ages {
                for flag in flags {
                    for status in smoking {
                        for number in numbers {
                            let input = StrokeAssessmentInput {
                                age: field(age),
                                hypertension: field(flag),
                                heart_disease: field(flag),
                                smoking_status: field(status),
                                alcohol_consumption: field("heavy"),
                                glucose_level: field(number),
                                bmi: field(number),
                                ..Default::default()
                            };
                            let result = scorer.score(&input);
                            assert!(result.score <= 100);
                            assert_eq!(
                                result.category,
                                result.scheme.categorize(result.score)
                            );
                        }
                    }
                }
            }
        }
    }
}
