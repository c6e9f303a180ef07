//! User-facing notices: blocking alerts, yes/no prompts and timed toasts.

use std::time::{Duration, Instant};

/// Blocking dialogs provided by the host UI.
pub trait Notifier: Send + Sync {
    /// Show a message the user must dismiss.
    fn alert(&self, message: &str);

    /// Ask a yes/no question; `true` means the user confirmed.
    fn confirm(&self, message: &str) -> bool;
}

/// Headless notifier: alerts go to the log and every prompt is declined.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&self, message: &str) {
        tracing::warn!(alert = message, "User alert");
    }

    fn confirm(&self, message: &str) -> bool {
        tracing::info!(prompt = message, "Declining prompt (no interactive UI)");
        false
    }
}

/// A message that hides itself after a fixed duration.
#[derive(Debug, Clone)]
pub struct Toast {
    message: String,
    shown_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, shown_at: Instant, duration: Duration) -> Self {
        Self {
            message: message.into(),
            shown_at,
            duration,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) < self.duration
    }
}
