//! Stroke assessment types.
//!
//! The input mirrors the stroke risk form: every field is an optional,
//! unvalidated string. Typed accessors interpret the strings leniently and
//! return `None` for anything absent or unreadable, so scoring never fails.

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::numeric::{optional_decimal, optional_int};
use super::risk::RiskLevel;

/// Raw stroke assessment form submission.
///
/// Field names follow the form (camelCase in JSON).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StrokeAssessmentInput {
    /// Patient name (contextual, never scored or logged)
    pub patient_name: Option<String>,
    /// Age in years
    pub age: Option<String>,
    /// Gender (contextual)
    pub gender: Option<String>,
    /// "yes" / "no"
    pub hypertension: Option<String>,
    /// "yes" / "no"
    pub heart_disease: Option<String>,
    /// Marital status (contextual)
    pub married: Option<String>,
    /// Work type (contextual)
    pub work_type: Option<String>,
    /// Residence type (contextual)
    pub residence_type: Option<String>,
    /// Average glucose level, unit defined by the scoring policy
    pub glucose_level: Option<String>,
    /// Body mass index
    pub bmi: Option<String>,
    /// "never-smoked" / "formerly-smoked" / "smokes"
    pub smoking_status: Option<String>,
    /// "none" / "light" / "moderate" / "heavy"
    pub alcohol_consumption: Option<String>,
}

impl StrokeAssessmentInput {
    /// Age in whole years, if readable.
    #[must_use]
    pub fn age_years(&self) -> Option<i64> {
        optional_int(self.age.as_deref())
    }

    #[must_use]
    pub fn has_hypertension(&self) -> bool {
        is_yes(self.hypertension.as_deref())
    }

    #[must_use]
    pub fn has_heart_disease(&self) -> bool {
        is_yes(self.heart_disease.as_deref())
    }

    /// Smoking status, `None` when absent or not one of the form's options.
    #[must_use]
    pub fn smoking(&self) -> Option<SmokingStatus> {
        self.smoking_status.as_deref().and_then(SmokingStatus::from_form)
    }

    /// Alcohol consumption, `None` when absent or not one of the form's options.
    #[must_use]
    pub fn alcohol(&self) -> Option<AlcoholConsumption> {
        self.alcohol_consumption
            .as_deref()
            .and_then(AlcoholConsumption::from_form)
    }

    /// Glucose level as entered, if readable.
    #[must_use]
    pub fn glucose(&self) -> Option<f64> {
        optional_decimal(self.glucose_level.as_deref())
    }

    /// BMI as entered, if readable.
    #[must_use]
    pub fn body_mass_index(&self) -> Option<f64> {
        optional_decimal(self.bmi.as_deref())
    }

    /// Wipe every free-text buffer from memory and clear the fields.
    ///
    /// Intended to be called once the submission has been scored.
    pub fn clear_sensitive(&mut self) {
        for field in [
            &mut self.patient_name,
            &mut self.age,
            &mut self.gender,
            &mut self.hypertension,
            &mut self.heart_disease,
            &mut self.married,
            &mut self.work_type,
            &mut self.residence_type,
            &mut self.glucose_level,
            &mut self.bmi,
            &mut self.smoking_status,
            &mut self.alcohol_consumption,
        ] {
            if let Some(value) = field.as_mut() {
                value.zeroize();
            }
            *field = None;
        }
    }
}

fn is_yes(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("yes"))
}

/// Smoking status options of the stroke form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SmokingStatus {
    NeverSmoked,
    FormerlySmoked,
    Smokes,
}

impl SmokingStatus {
    /// Parse a form value (`"never-smoked"`, `"formerly-smoked"`, `"smokes"`).
    #[must_use]
    pub fn from_form(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "never-smoked" => Some(Self::NeverSmoked),
            "formerly-smoked" => Some(Self::FormerlySmoked),
            "smokes" => Some(Self::Smokes),
            _ => None,
        }
    }
}

/// Alcohol consumption options of the stroke form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlcoholConsumption {
    /// No alcohol
    None,
    /// 1-2 drinks/week
    Light,
    /// 3-7 drinks/week
    Moderate,
    /// 8+ drinks/week
    Heavy,
}

impl AlcoholConsumption {
    #[must_use]
    pub fn from_form(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "light" => Some(Self::Light),
            "moderate" => Some(Self::Moderate),
            "heavy" => Some(Self::Heavy),
            _ => None,
        }
    }
}

/// A stroke risk factor that contributed points to a score.
///
/// Declared in form field order; contributions are reported in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskFactor {
    Age,
    Hypertension,
    HeartDisease,
    HighGlucose,
    HighBmi,
    Smoking,
    Alcohol,
}

impl std::fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Age => "age",
            Self::Hypertension => "hypertension",
            Self::HeartDisease => "heart disease",
            Self::HighGlucose => "high glucose",
            Self::HighBmi => "high BMI",
            Self::Smoking => "smoking",
            Self::Alcohol => "alcohol",
        };
        f.write_str(name)
    }
}

/// Points added by one risk factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    pub factor: RiskFactor,
    pub points: u32,
}

/// Score-to-category threshold scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryScheme {
    /// high ≥ 70, medium ≥ 40, else low
    Standard,
    /// high ≥ 50, moderate ≥ 20, else low
    Graded,
}

impl CategoryScheme {
    /// Minimum score for (high, medium).
    #[must_use]
    pub fn thresholds(&self) -> (u8, u8) {
        match self {
            Self::Standard => (70, 40),
            Self::Graded => (50, 20),
        }
    }

    /// Map a score onto a risk category.
    #[must_use]
    pub fn categorize(&self, score: u8) -> RiskLevel {
        let (high, medium) = self.thresholds();
        if score >= high {
            RiskLevel::High
        } else if score >= medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Display label of a category under this scheme.
    #[must_use]
    pub fn label(&self, level: RiskLevel) -> &'static str {
        match (self, level) {
            (_, RiskLevel::High) => "High Risk",
            (Self::Standard, RiskLevel::Medium) => "Medium Risk",
            (Self::Graded, RiskLevel::Medium) => "Moderate Risk",
            (_, RiskLevel::Low) => "Low Risk",
        }
    }
}

/// Outcome of stroke risk scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeRiskResult {
    /// Risk score, always within 0..=100
    pub score: u8,
    pub category: RiskLevel,
    pub scheme: CategoryScheme,
    /// Factors that added points, in form field order
    pub factors: Vec<Contribution>,
    pub recommendations: Vec<String>,
}

impl StrokeRiskResult {
    /// Risk factors present in this result, without their points.
    pub fn risk_factors(&self) -> impl Iterator<Item = RiskFactor> + '_ {
        self.factors.iter().map(|c| c.factor)
    }

    /// Category label, e.g. "Moderate Risk".
    #[must_use]
    pub fn headline(&self) -> &'static str {
        self.scheme.label(self.category)
    }

    /// Guidance sentence shown with the category.
    #[must_use]
    pub fn guidance(&self) -> &'static str {
        match self.category {
            RiskLevel::High => "The patient has multiple significant risk factors for stroke. Immediate medical consultation is recommended.",
            RiskLevel::Medium => "The patient has some risk factors for stroke. Regular check-ups and lifestyle modifications are advised.",
            RiskLevel::Low => "The patient has few risk factors for stroke. Maintaining a healthy lifestyle is recommended.",
        }
    }
}
