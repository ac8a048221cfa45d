//! Background submission worker.
//!
//! Runs an assessment off the caller's thread, reporting progress over a
//! channel so an interactive front end can show a loading state while the
//! simulated processing delay elapses. A submission cancelled before the
//! delay ends delivers no result and emits no notification.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use super::assessment::{AssessmentOutcome, AssessmentService, Submission};
use crate::ports::{Notifier, SicknessClassifier, StrokeScorer};
use crate::VitalRiskError;

/// Granularity of the cancellation check while waiting.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Progress updates from the submission worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionProgress {
    /// Submission accepted
    Received,
    /// Simulated processing under way
    Analyzing,
    /// Assessment delivered
    Complete(AssessmentOutcome),
    /// Cancelled before completion; no result is delivered
    Cancelled,
    /// Submission was rejected
    Error(String),
}

impl SubmissionProgress {
    /// Whether no further updates follow.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete(_) | Self::Cancelled | Self::Error(_))
    }
}

/// Handle to a running submission.
pub struct SubmissionHandle {
    progress_rx: Receiver<SubmissionProgress>,
    cancelled: Arc<AtomicBool>,
    _handle: JoinHandle<()>,
}

impl SubmissionHandle {
    /// Try to receive the next progress update (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<SubmissionProgress> {
        self.progress_rx.try_recv().ok()
    }

    /// Block until the next progress update. `None` once the worker is gone.
    #[must_use]
    pub fn recv(&self) -> Option<SubmissionProgress> {
        self.progress_rx.recv().ok()
    }

    /// Request cancellation. Has no effect once the result is delivered.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Block until the submission finishes, calling `on_progress` for every
    /// update including the terminal one.
    ///
    /// # Errors
    /// Returns the validation error for rejected submissions and
    /// `VitalRiskError::Worker` if cancelled or the worker disappeared.
    pub fn wait_with<F>(self, mut on_progress: F) -> Result<AssessmentOutcome, VitalRiskError>
    where
        F: FnMut(&SubmissionProgress),
    {
        while let Some(progress) = self.recv() {
            on_progress(&progress);
            match progress {
                SubmissionProgress::Complete(outcome) => return Ok(outcome),
                SubmissionProgress::Cancelled => {
                    return Err(VitalRiskError::Worker("Submission cancelled".to_string()))
                }
                SubmissionProgress::Error(message) => {
                    return Err(VitalRiskError::Validation(message))
                }
                SubmissionProgress::Received | SubmissionProgress::Analyzing => {}
            }
        }
        Err(VitalRiskError::Worker(
            "Worker exited without a result".to_string(),
        ))
    }

    /// Block until the submission finishes.
    ///
    /// # Errors
    /// See [`SubmissionHandle::wait_with`].
    pub fn wait(self) -> Result<AssessmentOutcome, VitalRiskError> {
        self.wait_with(|_| {})
    }
}

/// Worker that runs a submission in the background.
pub struct SubmissionWorker;

impl SubmissionWorker {
    /// Spawn a background submission.
    ///
    /// Returns a handle to receive progress updates.
    pub fn spawn<S, C, N>(
        service: Arc<AssessmentService<S, C, N>>,
        submission: Submission,
        delay: Duration,
    ) -> SubmissionHandle
    where
        S: StrokeScorer + 'static,
        C: SicknessClassifier + 'static,
        N: Notifier + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();

        let handle = thread::spawn(move || {
            Self::run_with_progress(&service, submission, delay, &flag, &tx);
        });

        SubmissionHandle {
            progress_rx: rx,
            cancelled,
            _handle: handle,
        }
    }

    fn run_with_progress<S, C, N>(
        service: &AssessmentService<S, C, N>,
        submission: Submission,
        delay: Duration,
        cancelled: &AtomicBool,
        tx: &Sender<SubmissionProgress>,
    ) where
        S: StrokeScorer,
        C: SicknessClassifier,
        N: Notifier,
    {
        let _ = tx.send(SubmissionProgress::Received);
        let _ = tx.send(SubmissionProgress::Analyzing);

        if !Self::wait_unless_cancelled(delay, cancelled) {
            tracing::info!("Submission cancelled before completion");
            let _ = tx.send(SubmissionProgress::Cancelled);
            return;
        }

        match service.evaluate(submission) {
            Ok(outcome) => {
                service.notify_complete(&outcome);
                let _ = tx.send(SubmissionProgress::Complete(outcome));
            }
            Err(e) => {
                tracing::warn!("Submission rejected: {}", e);
                let _ = tx.send(SubmissionProgress::Error(e.to_string()));
            }
        }
    }

    /// Sleep for `delay` in short slices. Returns `false` if cancelled.
    fn wait_unless_cancelled(delay: Duration, cancelled: &AtomicBool) -> bool {
        let deadline = Instant::now() + delay;
        loop {
            if cancelled.load(Ordering::SeqCst) {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep(POLL_INTERVAL.min(deadline - now));
        }
    }
}
