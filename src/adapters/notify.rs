//! Notifier adapter that emits completion notices as log events.

use crate::ports::{Notification, Notifier};

/// Writes each notification to the `tracing` pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        tracing::info!(
            title = %notification.title,
            "{}",
            notification.description
        );
    }
}
