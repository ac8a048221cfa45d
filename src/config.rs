//! Runtime settings resolved from `VITALRISK_*` environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::adapters::{PolicyError, StrokePolicy};

pub const ENV_STROKE_POLICY: &str = "VITALRISK_STROKE_POLICY";
pub const ENV_SUBMISSION_DELAY_MS: &str = "VITALRISK_SUBMISSION_DELAY_MS";
pub const ENV_LOG_MODE: &str = "VITALRISK_LOG_MODE";
pub const ENV_LOG_FILE: &str = "VITALRISK_LOG_FILE";

/// Simulated processing delay applied before a result is delivered.
pub const DEFAULT_SUBMISSION_DELAY_MS: u64 = 1500;
pub const DEFAULT_LOG_FILE: &str = "vitalrisk.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogMode {
    /// Standard error; stdout carries results
    #[default]
    Stderr,
    File,
}

impl LogMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stderr" => Some(Self::Stderr),
            "file" => Some(Self::File),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Preset name or path to a policy JSON file
    pub stroke_policy: String,
    pub submission_delay: Duration,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    /// Rejected variables, kept until logging is up
    pub ignored: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stroke_policy: StrokePolicy::DEFAULT_PRESET.to_string(),
            submission_delay: Duration::from_millis(DEFAULT_SUBMISSION_DELAY_MS),
            log_mode: LogMode::default(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            ignored: Vec::new(),
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    ///
    /// Unparseable values fall back to their defaults and are recorded in
    /// `ignored`; call [`Settings::log_ignored`] once a subscriber exists.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(policy) = get(ENV_STROKE_POLICY) {
            settings.stroke_policy = policy.trim().to_string();
        }

        if let Some(raw) = get(ENV_SUBMISSION_DELAY_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => settings.submission_delay = Duration::from_millis(ms),
                Err(_) => settings.ignored.push(format!(
                    "Ignoring invalid {}={:?}, using {} ms",
                    ENV_SUBMISSION_DELAY_MS, raw, DEFAULT_SUBMISSION_DELAY_MS
                )),
            }
        }

        if let Some(raw) = get(ENV_LOG_MODE) {
            match LogMode::parse(&raw) {
                Some(mode) => settings.log_mode = mode,
                None => settings.ignored.push(format!(
                    "Ignoring unknown {}={:?}, logging to stderr",
                    ENV_LOG_MODE, raw
                )),
            }
        }

        if let Some(path) = get(ENV_LOG_FILE) {
            settings.log_file = PathBuf::from(path);
        }

        settings
    }

    /// Emit a warning for every rejected variable.
    pub fn log_ignored(&self) {
        for message in &self.ignored {
            tracing::warn!("{}", message);
        }
    }

    /// Resolve the configured stroke policy.
    ///
    /// # Errors
    /// Returns error if the preset is unknown or the policy file is invalid.
    pub fn load_stroke_policy(&self) -> Result<StrokePolicy, PolicyError> {
        StrokePolicy::resolve(&self.stroke_policy)
    }
}
