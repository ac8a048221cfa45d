//! Stroke scoring policies.
//!
//! A policy bundles every constant the weighted stroke scorer uses. Two
//! presets ship with the crate (`detailed`, `advisory`); further policies can
//! be loaded from JSON files, e.g.
//!
//! ```json
//! {
//!   "name": "clinic",
//!   "age_bands": [{"above": 65, "points": 30}, {"above": 45, "points": 15}],
//!   "hypertension_points": 20,
//!   "heart_disease_points": 20,
//!   "smoking": {"mode": "combined", "points": 10},
//!   "alcohol": null,
//!   "glucose": {"unit": "mg-per-dl", "cutoff": 140.0, "points": 15},
//!   "bmi": {"obese_above": 30.0, "obese_points": 10, "overweight_above": 25.0, "overweight_points": 5},
//!   "categories": "graded",
//!   "recommendations": true
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{AlcoholConsumption, CategoryScheme, SmokingStatus};

/// Upper bound for any single weight; the final score is clamped to this too.
pub const MAX_POINTS: u32 = 100;

/// Errors raised while resolving or validating a policy.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("Unknown policy preset: {0} (expected `detailed`, `advisory` or a .json path)")]
    UnknownPreset(String),

    #[error("Failed to read policy file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed policy JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid policy `{name}`: {reason}")]
    Invalid { name: String, reason: String },
}

/// Points awarded when age is strictly above `above`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeBand {
    pub above: i64,
    pub points: u32,
}

impl AgeBand {
    #[must_use]
    pub const fn new(above: i64, points: u32) -> Self {
        Self { above, points }
    }
}

/// >65 → 30, >55 → 20, >45 → 10
#[must_use]
pub fn three_tier_age_bands() -> Vec<AgeBand> {
    vec![AgeBand::new(65, 30), AgeBand::new(55, 20), AgeBand::new(45, 10)]
}

/// >65 → 30, >45 → 15
#[must_use]
pub fn two_tier_age_bands() -> Vec<AgeBand> {
    vec![AgeBand::new(65, 30), AgeBand::new(45, 15)]
}

/// >65 → 30, >55 → 20, >45 → 10, >30 → 5
#[must_use]
pub fn four_tier_age_bands() -> Vec<AgeBand> {
    vec![
        AgeBand::new(65, 30),
        AgeBand::new(55, 20),
        AgeBand::new(45, 10),
        AgeBand::new(30, 5),
    ]
}

/// How smoking status is weighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum SmokingWeights {
    /// Current and former smokers weighted separately.
    Graded { smokes: u32, formerly: u32 },
    /// Current and former smokers share one weight.
    Combined { points: u32 },
}

impl SmokingWeights {
    #[must_use]
    pub fn points(&self, status: Option<SmokingStatus>) -> u32 {
        match (self, status) {
            (Self::Graded { smokes, .. }, Some(SmokingStatus::Smokes)) => *smokes,
            (Self::Graded { formerly, .. }, Some(SmokingStatus::FormerlySmoked)) => *formerly,
            (
                Self::Combined { points },
                Some(SmokingStatus::Smokes | SmokingStatus::FormerlySmoked),
            ) => *points,
            _ => 0,
        }
    }

    fn max_points(&self) -> u32 {
        match self {
            Self::Graded { smokes, formerly } => (*smokes).max(*formerly),
            Self::Combined { points } => *points,
        }
    }
}

/// Alcohol weights; "none" always scores zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlcoholWeights {
    pub light: u32,
    pub moderate: u32,
    pub heavy: u32,
}

impl AlcoholWeights {
    #[must_use]
    pub fn points(&self, level: Option<AlcoholConsumption>) -> u32 {
        match level {
            Some(AlcoholConsumption::Heavy) => self.heavy,
            Some(AlcoholConsumption::Moderate) => self.moderate,
            Some(AlcoholConsumption::Light) => self.light,
            Some(AlcoholConsumption::None) | None => 0,
        }
    }
}

impl Default for AlcoholWeights {
    fn default() -> Self {
        Self {
            light: 3,
            moderate: 8,
            heavy: 15,
        }
    }
}

/// Unit the glucose field is entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GlucoseUnit {
    MmolPerL,
    MgPerDl,
}

impl GlucoseUnit {
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::MmolPerL => "mmol/L",
            Self::MgPerDl => "mg/dL",
        }
    }

    /// Conventional high-glucose cutoff in this unit.
    #[must_use]
    pub fn default_cutoff(&self) -> f64 {
        match self {
            Self::MmolPerL => 6.0,
            Self::MgPerDl => 140.0,
        }
    }
}

/// Points awarded when glucose is strictly above `cutoff`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlucoseRule {
    pub unit: GlucoseUnit,
    pub cutoff: f64,
    pub points: u32,
}

impl GlucoseRule {
    #[must_use]
    pub fn for_unit(unit: GlucoseUnit) -> Self {
        Self {
            unit,
            cutoff: unit.default_cutoff(),
            points: 15,
        }
    }
}

/// BMI bands: obese wins over overweight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiRule {
    pub obese_above: f64,
    pub obese_points: u32,
    pub overweight_above: f64,
    pub overweight_points: u32,
}

impl BmiRule {
    #[must_use]
    pub fn points(&self, bmi: Option<f64>) -> u32 {
        match bmi {
            Some(v) if v > self.obese_above => self.obese_points,
            Some(v) if v > self.overweight_above => self.overweight_points,
            _ => 0,
        }
    }
}

impl Default for BmiRule {
    fn default() -> Self {
        Self {
            obese_above: 30.0,
            obese_points: 10,
            overweight_above: 25.0,
            overweight_points: 5,
        }
    }
}

/// Complete set of stroke scoring constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokePolicy {
    pub name: String,
    /// Evaluated top to bottom, first match wins
    pub age_bands: Vec<AgeBand>,
    pub hypertension_points: u32,
    pub heart_disease_points: u32,
    pub smoking: SmokingWeights,
    /// `None` when the policy does not collect alcohol consumption
    pub alcohol: Option<AlcoholWeights>,
    pub glucose: GlucoseRule,
    pub bmi: BmiRule,
    pub categories: CategoryScheme,
    /// Attach advisory sentences to results
    pub recommendations: bool,
}

impl StrokePolicy {
    /// Preset names accepted by [`StrokePolicy::preset`].
    pub const PRESETS: [&'static str; 2] = ["detailed", "advisory"];
    pub const DEFAULT_PRESET: &'static str = "detailed";

    /// Finer-grained policy: three-tier ages, graded smoking, alcohol,
    /// glucose in mmol/L, standard categories, no recommendations.
    #[must_use]
    pub fn detailed() -> Self {
        Self {
            name: "detailed".to_string(),
            age_bands: three_tier_age_bands(),
            hypertension_points: 20,
            heart_disease_points: 20,
            smoking: SmokingWeights::Graded {
                smokes: 15,
                formerly: 5,
            },
            alcohol: Some(AlcoholWeights::default()),
            glucose: GlucoseRule::for_unit(GlucoseUnit::MmolPerL),
            bmi: BmiRule::default(),
            categories: CategoryScheme::Standard,
            recommendations: false,
        }
    }

    /// Simpler policy with recommendations: two-tier ages, combined
    /// smoking, no alcohol, glucose in mg/dL, graded categories.
    #[must_use]
    pub fn advisory() -> Self {
        Self {
            name: "advisory".to_string(),
            age_bands: two_tier_age_bands(),
            hypertension_points: 20,
            heart_disease_points: 20,
            smoking: SmokingWeights::Combined { points: 10 },
            alcohol: None,
            glucose: GlucoseRule::for_unit(GlucoseUnit::MgPerDl),
            bmi: BmiRule::default(),
            categories: CategoryScheme::Graded,
            recommendations: true,
        }
    }

    /// Look up a preset by name.
    ///
    /// # Errors
    /// Returns `PolicyError::UnknownPreset` for unrecognised names.
    pub fn preset(name: &str) -> Result<Self, PolicyError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "detailed" => Ok(Self::detailed()),
            "advisory" => Ok(Self::advisory()),
            _ => Err(PolicyError::UnknownPreset(name.to_string())),
        }
    }

    /// Load and validate a policy from a JSON file.
    ///
    /// # Errors
    /// Returns error if the file cannot be read, parsed, or fails validation.
    pub fn from_file(path: &Path) -> Result<Self, PolicyError> {
        let content = std::fs::read_to_string(path).map_err(|source| PolicyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let policy = Self::from_json(&content)?;

        tracing::info!(
            "Loaded stroke policy `{}` from {:?} (age_bands={}, glucose={} {}, categories={:?})",
            policy.name,
            path,
            policy.age_bands.len(),
            policy.glucose.cutoff,
            policy.glucose.unit.symbol(),
            policy.categories
        );
        Ok(policy)
    }

    /// Parse and validate a policy from JSON text.
    ///
    /// # Errors
    /// Returns error if the JSON is malformed or the policy is invalid.
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Resolve a preset name or a path to a policy JSON file.
    ///
    /// # Errors
    /// Returns error if neither a preset nor a loadable file matches.
    pub fn resolve(source: &str) -> Result<Self, PolicyError> {
        let path = Path::new(source);
        let looks_like_file = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
            || path.is_file();
        if looks_like_file {
            Self::from_file(path)
        } else {
            Self::preset(source)
        }
    }

    /// Check structural invariants of the policy.
    ///
    /// # Errors
    /// Returns `PolicyError::Invalid` describing the first violation.
    pub fn validate(&self) -> Result<(), PolicyError> {
        let invalid = |reason: String| PolicyError::Invalid {
            name: self.name.clone(),
            reason,
        };

        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty".to_string()));
        }

        for pair in self.age_bands.windows(2) {
            if pair[1].above >= pair[0].above {
                return Err(invalid(format!(
                    "age bands must be strictly descending, got >{} after >{}",
                    pair[1].above, pair[0].above
                )));
            }
        }

        let mut weights = vec![
            ("hypertension_points", self.hypertension_points),
            ("heart_disease_points", self.heart_disease_points),
            ("smoking", self.smoking.max_points()),
            ("glucose.points", self.glucose.points),
            ("bmi.obese_points", self.bmi.obese_points),
            ("bmi.overweight_points", self.bmi.overweight_points),
        ];
        weights.extend(self.age_bands.iter().map(|b| ("age_bands.points", b.points)));
        if let Some(alcohol) = &self.alcohol {
            weights.extend([
                ("alcohol.light", alcohol.light),
                ("alcohol.moderate", alcohol.moderate),
                ("alcohol.heavy", alcohol.heavy),
            ]);
        }
        if let Some((field, value)) = weights.into_iter().find(|(_, v)| *v > MAX_POINTS) {
            return Err(invalid(format!("{field} = {value} exceeds {MAX_POINTS}")));
        }

        if !self.glucose.cutoff.is_finite() || self.glucose.cutoff <= 0.0 {
            return Err(invalid(format!(
                "glucose cutoff must be a positive number, got {}",
                self.glucose.cutoff
            )));
        }

        if !self.bmi.obese_above.is_finite()
            || !self.bmi.overweight_above.is_finite()
            || self.bmi.obese_above <= self.bmi.overweight_above
        {
            return Err(invalid(format!(
                "bmi bands must be finite with obese_above > overweight_above, got {} and {}",
                self.bmi.obese_above, self.bmi.overweight_above
            )));
        }

        Ok(())
    }
}

impl Default for StrokePolicy {
    fn default() -> Self {
        Self::detailed()
    }
}
