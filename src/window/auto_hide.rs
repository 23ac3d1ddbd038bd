//! Fullscreen control bar auto-hide timer
//!
//! A cancellable one-shot deadline polled from the UI loop. Restarting it
//! replaces the pending deadline; there is never more than one.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct AutoHideTimer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl AutoHideTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Cancel any pending deadline and schedule a new one from `now`
    pub fn restart(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Returns `true` exactly once, on the first poll at or after the deadline
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Time left before the deadline, if armed
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
