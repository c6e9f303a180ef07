use std::time::{Duration, Instant};

/// Holds the latest input until it has been quiet for a fixed period.
///
/// Every `push` replaces the pending value and restarts the timer; `poll`
/// releases the value once the deadline has passed.
#[derive(Debug)]
pub struct Debouncer<T> {
    quiet: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.quiet));
    }

    /// Take the pending value if its quiet period is over.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, d)| *d)
    }
}
