//! Assessment service: Orchestrates scoring of form submissions.
//!
//! This service coordinates:
//! - Turning raw submissions into structured records
//! - Calling the stroke scorer or sickness classifier
//! - Wiping free-text form buffers once scored
//! - Completion notifications

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{
    SicknessInput, SicknessResult, StrokeAssessmentInput, StrokeRiskResult, Symptom,
};
use crate::ports::{Notification, Notifier, SicknessClassifier, StrokeScorer};
use crate::VitalRiskError;

/// Raw sickness form submission; symptoms are still form identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SicknessSubmission {
    pub patient_name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub symptoms: Vec<String>,
    pub duration: Option<String>,
    pub previous_history: bool,
    pub diabetes: bool,
    pub hypertension: bool,
    pub smoking: bool,
    pub alcohol_consumption: bool,
}

impl SicknessSubmission {
    /// Convert into a structured record.
    ///
    /// Duplicate symptom ids collapse into one.
    ///
    /// # Errors
    /// Returns `VitalRiskError::Validation` listing every unknown symptom id.
    pub fn into_input(self) -> Result<SicknessInput, VitalRiskError> {
        let mut unknown = Vec::new();
        let symptoms = self
            .symptoms
            .iter()
            .filter_map(|id| {
                let symptom = Symptom::from_id(id);
                if symptom.is_none() {
                    unknown.push(id.clone());
                }
                symptom
            })
            .collect();

        if !unknown.is_empty() {
            return Err(VitalRiskError::Validation(format!(
                "Unknown symptom id(s): {}",
                unknown.join(", ")
            )));
        }

        Ok(SicknessInput {
            patient_name: self.patient_name,
            age: self.age,
            gender: self.gender,
            symptoms,
            duration: self.duration,
            previous_history: self.previous_history,
            diabetes: self.diabetes,
            hypertension: self.hypertension,
            smoking: self.smoking,
            alcohol_consumption: self.alcohol_consumption,
        })
    }
}

/// A submission awaiting assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Stroke(StrokeAssessmentInput),
    Sickness(SicknessSubmission),
}

/// A scored submission with metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment<T> {
    /// Unique identifier
    pub id: String,
    pub result: T,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl<T> Assessment<T> {
    #[must_use]
    pub fn new(result: T) -> Self {
        Self {
            id: uuid_v4(),
            result,
            created_at: chrono::Utc::now(),
        }
    }
}

/// Outcome of either assessment kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AssessmentOutcome {
    Stroke(Assessment<StrokeRiskResult>),
    Sickness(Assessment<SicknessResult>),
}

impl AssessmentOutcome {
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Stroke(a) => &a.id,
            Self::Sickness(a) => &a.id,
        }
    }

    /// Completion notice for this outcome.
    #[must_use]
    pub fn notification(&self) -> Notification {
        match self {
            Self::Stroke(_) => Notification::stroke_complete(),
            Self::Sickness(_) => Notification::prediction_complete(),
        }
    }
}

/// Service for scoring form submissions.
pub struct AssessmentService<S, C, N>
where
    S: StrokeScorer,
    C: SicknessClassifier,
    N: Notifier,
{
    stroke: Arc<S>,
    sickness: Arc<C>,
    notifier: Arc<N>,
}

impl<S, C, N> AssessmentService<S, C, N>
where
    S: StrokeScorer,
    C: SicknessClassifier,
    N: Notifier,
{
    /// Create a new assessment service.
    pub fn new(stroke: Arc<S>, sickness: Arc<C>, notifier: Arc<N>) -> Self {
        Self {
            stroke,
            sickness,
            notifier,
        }
    }

    /// Name of the active stroke scoring policy.
    #[must_use]
    pub fn stroke_policy(&self) -> &str {
        self.stroke.policy_name()
    }

    /// Score a stroke submission. Never fails.
    ///
    /// The input's free-text buffers are wiped after scoring.
    pub fn assess_stroke(&self, mut input: StrokeAssessmentInput) -> Assessment<StrokeRiskResult> {
        let result = self.stroke.score(&input);
        input.clear_sensitive();

        tracing::info!(
            "Stroke assessment complete: score={}, category={}, policy={}, factors={}",
            result.score,
            result.category,
            self.stroke.policy_name(),
            result.factors.len()
        );

        Assessment::new(result)
    }

    /// Classify a sickness submission.
    ///
    /// # Errors
    /// Returns `VitalRiskError::Validation` if the submission names unknown symptoms.
    pub fn predict_sickness(
        &self,
        submission: SicknessSubmission,
    ) -> Result<Assessment<SicknessResult>, VitalRiskError> {
        let mut input = submission.into_input()?;
        let result = self.sickness.classify(&input);
        input.clear_sensitive();

        tracing::info!(
            "Sickness prediction complete: condition={}, risk={}, symptoms={}",
            result.predicted_condition,
            result.risk_level,
            input.symptoms.len()
        );

        Ok(Assessment::new(result))
    }

    /// Score any submission without notifying.
    ///
    /// # Errors
    /// Returns error if the submission fails validation.
    pub fn evaluate(&self, submission: Submission) -> Result<AssessmentOutcome, VitalRiskError> {
        match submission {
            Submission::Stroke(input) => Ok(AssessmentOutcome::Stroke(self.assess_stroke(input))),
            Submission::Sickness(form) => {
                Ok(AssessmentOutcome::Sickness(self.predict_sickness(form)?))
            }
        }
    }

    /// Emit the completion notice for a delivered outcome.
    pub fn notify_complete(&self, outcome: &AssessmentOutcome) {
        self.notifier.notify(&outcome.notification());
    }

    /// Score a submission and notify immediately.
    ///
    /// # Errors
    /// Returns error if the submission fails validation.
    pub fn submit(&self, submission: Submission) -> Result<AssessmentOutcome, VitalRiskError> {
        let outcome = self.evaluate(submission)?;
        self.notify_complete(&outcome);
        Ok(outcome)
    }
}

/// Generate a simple UUID v4 (random) using CSPRNG.
fn uuid_v4() -> String {
    use rand::Rng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    let mut rng = ChaCha20Rng::from_entropy();
    let bytes: [u8; 16] = rng.gen();

    format!(
        "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3],
        bytes[4], bytes[5],
        (bytes[6] & 0x0f) | 0x40, bytes[7],
        (bytes[8] & 0x3f) | 0x80, bytes[9],
        bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::adapters::{OrderedRuleClassifier, StrokePolicy, WeightedStrokeScorer};
    use crate::domain::{Condition, RiskLevel};
    use std::sync::Mutex;

    /// Notifier that records every notice.
    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        pub(crate) received: Mutex<Vec<Notification>>,
    }

    impl RecordingNotifier {
        pub(crate) fn count(&self) -> usize {
            self.received.lock().map(|r| r.len()).unwrap_or(0)
        }
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, notification: &Notification) {
            if let Ok(mut received) = self.received.lock() {
                received.push(notification.clone());
            }
        }
    }

    pub(crate) type TestService =
        AssessmentService<WeightedStrokeScorer, OrderedRuleClassifier, RecordingNotifier>;

    pub(crate) fn create_test_service(policy: StrokePolicy) -> (TestService, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let service = AssessmentService::new(
            Arc::new(WeightedStrokeScorer::new(policy)),
            Arc::new(OrderedRuleClassifier::new()),
            notifier.clone(),
        );
        (service, notifier)
    }

    #[test]
    fn test_stroke_submission_high_risk() {
        let (service, notifier) = create_test_service(StrokePolicy::detailed());
        let input = StrokeAssessmentInput {
            patient_name: Some("Jane Roe".into()),
            age: Some("70".into()),
            hypertension: Some("yes".into()),
            heart_disease: Some("yes".into()),
            smoking_status: Some("smokes".into()),
            glucose_level: Some("6.8".into()),
            bmi: Some("32".into()),
            ..Default::default()
        };

        let outcome = service.submit(Submission::Stroke(input)).expect("Should score");
        let AssessmentOutcome::Stroke(assessment) = &outcome else {
            panic!("Expected stroke outcome");
        };
        assert_eq!(assessment.result.score, 100);
        assert_eq!(assessment.result.category, RiskLevel::High);
        assert_eq!(service.stroke_policy(), "detailed");

        assert_eq!(notifier.count(), 1);
        let received = notifier.received.lock().expect("Lock");
        assert_eq!(received[0], Notification::stroke_complete());
    }

    #[test]
    fn test_sickness_submission() {
        let (service, notifier) = create_test_service(StrokePolicy::default());
        let form = SicknessSubmission {
            symptoms: vec!["fever".into(), "cough".into(), "fever".into()],
            diabetes: true,
            hypertension: true,
            smoking: true,
            ..Default::default()
        };

        let outcome = service.evaluate(Submission::Sickness(form)).expect("Should classify");
        let AssessmentOutcome::Sickness(assessment) = &outcome else {
            panic!("Expected sickness outcome");
        };
        assert_eq!(assessment.result.predicted_condition, Condition::CommonColdOrFlu);
        assert_eq!(assessment.result.risk_level, RiskLevel::High);
        // evaluate() does not notify
        assert_eq!(notifier.count(), 0);
    }

    #[test]
    fn test_unknown_symptom_rejected() {
        let (service, _) = create_test_service(StrokePolicy::default());
        let form = SicknessSubmission {
            symptoms: vec!["fever".into(), "sneezing".into(), "hiccups".into()],
            ..Default::default()
        };
        let err = service
            .predict_sickness(form)
            .expect_err("Should reject unknown symptoms");
        let message = err.to_string();
        assert!(message.contains("sneezing"));
        assert!(message.contains("hiccups"));
    }

    #[test]
    fn test_submission_from_form_json() {
        let json = r#"{"patientName":"A","symptoms":["headache","nausea"],"duration":"1-week","smoking":true}"#;
        let form: SicknessSubmission = serde_json::from_str(json).expect("Should parse");
        let input = form.into_input().expect("Should convert");
        assert!(input.has_all(&[Symptom::Headache, Symptom::Nausea]));
        assert!(input.smoking);
        assert_eq!(input.duration.as_deref(), Some("1-week"));
    }

    #[test]
    fn test_outcome_serializes_with_kind() {
        let (service, _) = create_test_service(StrokePolicy::advisory());
        let outcome = service
            .evaluate(Submission::Stroke(StrokeAssessmentInput::default()))
            .expect("Should score");
        let value = serde_json::to_value(&outcome).expect("Should serialize");
        assert_eq!(value["kind"], "stroke");
        assert_eq!(value["result"]["score"], 0);
        assert_eq!(value["result"]["category"], "low");
        assert_eq!(value["id"].as_str().map(str::len), Some(36));
    }

    #[test]
    fn test_uuid_generation() {
        let id1 = uuid_v4();
        let id2 = uuid_v4();
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 36);
        assert_eq!(&id1[14..15], "4");
    }
}
