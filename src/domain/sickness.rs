//! Sickness prediction types: symptom catalog, input record and result.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use super::risk::RiskLevel;

/// Symptoms offered by the sickness form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Symptom {
    Fever,
    Cough,
    Fatigue,
    Headache,
    Nausea,
    Vomiting,
    Dizziness,
    ChestPain,
    ShortnessOfBreath,
    AbdominalPain,
    JointPain,
    MusclePain,
    Rash,
    SoreThroat,
    RunnyNose,
}

impl Symptom {
    /// The full catalog, in form order.
    pub const ALL: [Symptom; 15] = [
        Self::Fever,
        Self::Cough,
        Self::Fatigue,
        Self::Headache,
        Self::Nausea,
        Self::Vomiting,
        Self::Dizziness,
        Self::ChestPain,
        Self::ShortnessOfBreath,
        Self::AbdominalPain,
        Self::JointPain,
        Self::MusclePain,
        Self::Rash,
        Self::SoreThroat,
        Self::RunnyNose,
    ];

    /// Form identifier, e.g. `"chest-pain"`.
    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Self::Fever => "fever",
            Self::Cough => "cough",
            Self::Fatigue => "fatigue",
            Self::Headache => "headache",
            Self::Nausea => "nausea",
            Self::Vomiting => "vomiting",
            Self::Dizziness => "dizziness",
            Self::ChestPain => "chest-pain",
            Self::ShortnessOfBreath => "shortness-of-breath",
            Self::AbdominalPain => "abdominal-pain",
            Self::JointPain => "joint-pain",
            Self::MusclePain => "muscle-pain",
            Self::Rash => "rash",
            Self::SoreThroat => "sore-throat",
            Self::RunnyNose => "runny-nose",
        }
    }

    /// Display label, e.g. `"Chest Pain"`.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fever => "Fever",
            Self::Cough => "Cough",
            Self::Fatigue => "Fatigue",
            Self::Headache => "Headache",
            Self::Nausea => "Nausea",
            Self::Vomiting => "Vomiting",
            Self::Dizziness => "Dizziness",
            Self::ChestPain => "Chest Pain",
            Self::ShortnessOfBreath => "Shortness of Breath",
            Self::AbdominalPain => "Abdominal Pain",
            Self::JointPain => "Joint Pain",
            Self::MusclePain => "Muscle Pain",
            Self::Rash => "Skin Rash",
            Self::SoreThroat => "Sore Throat",
            Self::RunnyNose => "Runny Nose",
        }
    }

    /// Look up a symptom by its form identifier.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL.into_iter().find(|s| s.id().eq_ignore_ascii_case(id))
    }
}

impl std::fmt::Display for Symptom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Structured sickness form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SicknessInput {
    /// Patient name (contextual, never scored or logged)
    pub patient_name: Option<String>,
    /// Age (contextual)
    pub age: Option<String>,
    /// Gender (contextual)
    pub gender: Option<String>,
    pub symptoms: BTreeSet<Symptom>,
    /// How long symptoms have lasted, e.g. "2-3-days" (contextual)
    pub duration: Option<String>,
    pub previous_history: bool,
    pub diabetes: bool,
    pub hypertension: bool,
    pub smoking: bool,
    pub alcohol_consumption: bool,
}

impl SicknessInput {
    /// Create an input with the given symptoms and no risk factors.
    #[must_use]
    pub fn with_symptoms(symptoms: impl IntoIterator<Item = Symptom>) -> Self {
        Self {
            symptoms: symptoms.into_iter().collect(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn has(&self, symptom: Symptom) -> bool {
        self.symptoms.contains(&symptom)
    }

    #[must_use]
    pub fn has_all(&self, symptoms: &[Symptom]) -> bool {
        symptoms.iter().all(|s| self.symptoms.contains(s))
    }

    /// Number of comorbidity/lifestyle flags set (0..=5).
    #[must_use]
    pub fn risk_factor_count(&self) -> usize {
        [
            self.previous_history,
            self.diabetes,
            self.hypertension,
            self.smoking,
            self.alcohol_consumption,
        ]
        .into_iter()
        .filter(|&flag| flag)
        .count()
    }

    /// Wipe free-text fields from memory and clear them.
    pub fn clear_sensitive(&mut self) {
        for field in [
            &mut self.patient_name,
            &mut self.age,
            &mut self.gender,
            &mut self.duration,
        ] {
            if let Some(value) = field.as_mut() {
                value.zeroize();
            }
            *field = None;
        }
    }
}

/// Conditions the classifier can predict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "Common Cold or Flu")]
    CommonColdOrFlu,
    #[serde(rename = "Migraine")]
    Migraine,
    #[serde(rename = "Potential Cardiac Issue")]
    PotentialCardiacIssue,
    #[serde(rename = "Diabetes Complication")]
    DiabetesComplication,
    #[serde(rename = "Respiratory Condition")]
    RespiratoryCondition,
    #[serde(rename = "General Malaise")]
    GeneralMalaise,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Condition {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::CommonColdOrFlu => "Common Cold or Flu",
            Self::Migraine => "Migraine",
            Self::PotentialCardiacIssue => "Potential Cardiac Issue",
            Self::DiabetesComplication => "Diabetes Complication",
            Self::RespiratoryCondition => "Respiratory Condition",
            Self::GeneralMalaise => "General Malaise",
            Self::Unknown => "Unknown",
        }
    }

    /// Advisory sentence for this condition.
    #[must_use]
    pub fn guidance(&self) -> &'static str {
        match self {
            Self::CommonColdOrFlu => "Rest, stay hydrated and monitor your temperature. See a doctor if symptoms last more than a week.",
            Self::Migraine => "Rest in a quiet, dark room and keep a headache diary. Consult a doctor about recurring episodes.",
            Self::PotentialCardiacIssue => "Chest pain with shortness of breath needs urgent medical evaluation. Call emergency services if it is severe.",
            Self::DiabetesComplication => "Check your blood glucose and contact the clinician who manages your diabetes.",
            Self::RespiratoryCondition => "Avoid exertion and airborne irritants, and have your breathing assessed by a healthcare professional.",
            Self::GeneralMalaise => "Rest and keep track of your symptoms. Seek medical advice if they get worse.",
            Self::Unknown => "No symptoms were selected. Select the symptoms you are experiencing to get a prediction.",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of sickness classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SicknessResult {
    pub predicted_condition: Condition,
    pub risk_level: RiskLevel,
    pub recommendations: Vec<String>,
}
