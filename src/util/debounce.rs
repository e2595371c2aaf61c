//! Single-slot deferred task for trailing-edge debouncing.

use web_time::{Duration, Instant};

/// One pending deadline at most. Scheduling replaces any outstanding
/// deadline; the task fires once, on the first poll at or after it.
///
/// The debouncer carries no payload. Whoever polls it reads whatever state
/// is live at fire time.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    /// Debouncer with the given quiet period.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Cancel any pending deadline and start a new one at `now + delay`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Drop the pending deadline, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a deadline is outstanding.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once per scheduled deadline, on the first call
    /// with `now` at or past it.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// The quiet period.
    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}
