//! vitalrisk: Rule-based stroke and sickness risk assessment
//!
//! Headless entry point. Reads one JSON form submission from a file or
//! stdin, runs it through the submission worker and prints the result.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::io::{IsTerminal, Read};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use zeroize::Zeroize;

use vitalrisk::adapters::sanitize::SanitizingMakeWriter;
use vitalrisk::adapters::{LogNotifier, OrderedRuleClassifier, StrokePolicy, WeightedStrokeScorer};
use vitalrisk::application::{
    AssessmentOutcome, AssessmentService, SicknessSubmission, Submission, SubmissionProgress,
    SubmissionWorker,
};
use vitalrisk::config::{LogMode, Settings};
use vitalrisk::domain::{Symptom, DISCLAIMER};

#[derive(Debug, Parser)]
#[command(
    name = "vitalrisk",
    version,
    about = "Rule-based stroke risk scoring and symptom-based sickness prediction",
    long_about = "vitalrisk scores a patient-reported health form with hand-written rules.\n\n\
        The result is a prediction, not a diagnosis.\n\n\
        EXAMPLES:\n\
        \n  vitalrisk stroke form.json                    Score a stroke form\n\
        \n  vitalrisk stroke --policy advisory form.json  Use the advisory policy\n\
        \n  echo '{\"symptoms\":[\"fever\"]}' | vitalrisk sickness --delay-ms 0\n\
        \n  vitalrisk symptoms                            List symptom ids",
    after_help = "Environment: VITALRISK_STROKE_POLICY, VITALRISK_SUBMISSION_DELAY_MS,\n\
        VITALRISK_LOG_MODE (stderr|file), VITALRISK_LOG_FILE, RUST_LOG"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a stroke risk form
    Stroke(AssessArgs),

    /// Predict a condition from a symptom form
    Sickness(AssessArgs),

    /// List the symptom catalog (form id and label)
    Symptoms,
}

#[derive(Debug, Args, Clone, PartialEq, Eq)]
struct AssessArgs {
    /// JSON submission file ('-' reads stdin)
    #[arg(value_name = "FILE", default_value = "-")]
    input: String,

    /// Stroke scoring policy: detailed, advisory, or a JSON policy file
    #[arg(long, value_name = "POLICY")]
    policy: Option<String>,

    /// Simulated processing delay in milliseconds
    #[arg(long = "delay-ms", value_name = "MS")]
    delay_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormKind {
    Stroke,
    Sickness,
}

fn read_submission(input: &str) -> Result<String> {
    if input == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read submission from stdin")?;
        Ok(raw)
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read submission file {input}"))
    }
}

fn parse_submission(kind: FormKind, raw: &str) -> Result<Submission> {
    let submission = match kind {
        FormKind::Stroke => Submission::Stroke(
            serde_json::from_str(raw).context("Invalid stroke submission JSON")?,
        ),
        FormKind::Sickness => Submission::Sickness(
            serde_json::from_str::<SicknessSubmission>(raw)
                .context("Invalid sickness submission JSON")?,
        ),
    };
    Ok(submission)
}

fn render(outcome: &AssessmentOutcome) -> serde_json::Value {
    let (headline, summary, guidance) = match outcome {
        AssessmentOutcome::Stroke(a) => (
            a.result.headline(),
            a.result.category.description(),
            a.result.guidance(),
        ),
        AssessmentOutcome::Sickness(a) => (
            a.result.predicted_condition.label(),
            a.result.risk_level.description(),
            a.result.predicted_condition.guidance(),
        ),
    };

    serde_json::json!({
        "assessment": outcome,
        "headline": headline,
        "summary": summary,
        "guidance": guidance,
        "disclaimer": DISCLAIMER,
    })
}

fn symptom_catalog() -> serde_json::Value {
    Symptom::ALL
        .iter()
        .map(|s| serde_json::json!({ "id": s.id(), "label": s.label() }))
        .collect()
}

fn init_logging(settings: &Settings) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    // stdout carries the result JSON, so logs never go there.
    let (writer, guard) = match settings.log_mode {
        LogMode::File => {
            if let Some(parent) = settings.log_file.parent() {
                // Best-effort: don't fail startup just because the directory is missing.
                let _ = std::fs::create_dir_all(parent);
            }

            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&settings.log_file)
                .with_context(|| format!("Failed to open log file {}", settings.log_file.display()))?;
            tracing_appender::non_blocking(file)
        }
        LogMode::Stderr => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(settings.log_mode == LogMode::Stderr && std::io::stderr().is_terminal())
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .init();

    Ok(guard)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (kind, args) = match cli.command {
        Command::Stroke(args) => (FormKind::Stroke, args),
        Command::Sickness(args) => (FormKind::Sickness, args),
        Command::Symptoms => {
            println!("{}", serde_json::to_string_pretty(&symptom_catalog())?);
            return Ok(());
        }
    };

    let mut settings = Settings::from_env();
    if let Some(policy) = args.policy.clone() {
        settings.stroke_policy = policy;
    }
    if let Some(ms) = args.delay_ms {
        settings.submission_delay = Duration::from_millis(ms);
    }

    let _guard = init_logging(&settings)?;
    settings.log_ignored();

    let policy: StrokePolicy = settings
        .load_stroke_policy()
        .with_context(|| format!("Failed to load stroke policy {:?}", settings.stroke_policy))?;
    tracing::info!("Starting vitalrisk (stroke policy: {})", policy.name);

    let mut raw = read_submission(&args.input)?;
    let submission = parse_submission(kind, &raw);
    raw.zeroize();
    let submission = submission?;

    let service = Arc::new(AssessmentService::new(
        Arc::new(WeightedStrokeScorer::new(policy)),
        Arc::new(OrderedRuleClassifier::new()),
        Arc::new(LogNotifier),
    ));

    let show_progress = std::io::stderr().is_terminal();
    let handle = SubmissionWorker::spawn(service, submission, settings.submission_delay);
    let outcome = handle.wait_with(|progress| {
        if show_progress && *progress == SubmissionProgress::Analyzing {
            eprintln!("Analyzing...");
        }
    })?;

    let rendered = serde_json::to_string_pretty(&render(&outcome))?;
    println!("{rendered}");

    tracing::info!("vitalrisk finished.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn assess_args(cli: Cli) -> AssessArgs {
        match cli.command {
            Command::Stroke(args) | Command::Sickness(args) => args,
            Command::Symptoms => panic!("Expected an assessment command"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "vitalrisk",
            "stroke",
            "form.json",
            "--policy",
            "advisory",
            "--delay-ms",
            "0",
        ])
        .expect("Should parse");
        assert!(matches!(cli.command, Command::Stroke(_)));
        assert_eq!(
            assess_args(cli),
            AssessArgs {
                input: "form.json".to_string(),
                policy: Some("advisory".to_string()),
                delay_ms: Some(0),
            }
        );
    }

    #[test]
    fn test_parse_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["vitalrisk", "sickness"]).expect("Should parse");
        assert!(matches!(cli.command, Command::Sickness(_)));
        let args = assess_args(cli);
        assert_eq!(args.input, "-");
        assert_eq!(args.policy, None);
        assert_eq!(args.delay_ms, None);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Cli::try_parse_from(["vitalrisk"]).is_err());
        assert!(Cli::try_parse_from(["vitalrisk", "diagnose"]).is_err());
        assert!(Cli::try_parse_from(["vitalrisk", "stroke", "--delay-ms", "soon"]).is_err());
        assert!(Cli::try_parse_from(["vitalrisk", "stroke", "a.json", "b.json"]).is_err());
    }

    #[test]
    fn test_render_sickness() {
        let submission = parse_submission(
            FormKind::Sickness,
            r#"{"symptoms":["chest-pain","shortness-of-breath"]}"#,
        )
        .expect("Should parse");
        let service = AssessmentService::new(
            Arc::new(WeightedStrokeScorer::default()),
            Arc::new(OrderedRuleClassifier::new()),
            Arc::new(LogNotifier),
        );
        let outcome = service.evaluate(submission).expect("Should classify");
        let value = render(&outcome);
        assert_eq!(value["headline"], "Potential Cardiac Issue");
        assert_eq!(value["assessment"]["result"]["riskLevel"], "high");
        assert_eq!(value["disclaimer"], DISCLAIMER);
    }

    #[test]
    fn test_render_stroke_headline() {
        let submission = parse_submission(
            FormKind::Stroke,
            r#"{"age":"70","hypertension":"yes","heartDisease":"yes"}"#,
        )
        .expect("Should parse");
        let service = AssessmentService::new(
            Arc::new(WeightedStrokeScorer::new(StrokePolicy::detailed())),
            Arc::new(OrderedRuleClassifier::new()),
            Arc::new(LogNotifier),
        );
        let outcome = service.evaluate(submission).expect("Should score");
        let value = render(&outcome);
        // 30 + 20 + 20
        assert_eq!(value["assessment"]["result"]["score"], 70);
        assert_eq!(value["headline"], "High Risk");
        assert_eq!(value["summary"], "High risk - Immediate consultation advised");
        assert_eq!(value["assessment"]["result"]["factors"][0]["factor"], "age");
    }

    #[test]
    fn test_symptom_catalog_labels() {
        let catalog = symptom_catalog();
        let entries = catalog.as_array().expect("Array");
        assert_eq!(entries.len(), 15);
        assert!(entries
            .iter()
            .any(|e| e["id"] == "rash" && e["label"] == "Skin Rash"));
        assert!(entries
            .iter()
            .any(|e| e["id"] == "shortness-of-breath" && e["label"] == "Shortness of Breath"));
    }
}
