//! Trailing-edge debouncing with an injected clock.
//!
//! Callers feed `Instant`s in, which keeps the behaviour deterministic under
//! test and lets the host decide how it schedules ticks.

use std::time::{Duration, Instant};

/// Collapses a burst of triggers into a single firing after a quiet period.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Register a trigger at `now`, restarting the quiet period.
    pub fn trigger(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Returns true exactly once when the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}
