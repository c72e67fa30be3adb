//! Coalescing redraw scheduler
//!
//! The first request arms a deadline; further requests before it fires are
//! absorbed into the same pending redraw.

use std::time::{Duration, Instant};

/// Delay between the first request and the refresh it triggers
pub const REDRAW_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct RedrawScheduler {
    delay: Duration,
    due: Option<Instant>,
    /// Requests absorbed into the pending redraw
    coalesced: u64,
}

impl Default for RedrawScheduler {
    fn default() -> Self {
        Self::new(REDRAW_DELAY)
    }
}

impl RedrawScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            due: None,
            coalesced: 0,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Mark that the view needs an update
    pub fn request(&mut self) {
        self.request_at(Instant::now());
    }

    pub fn request_at(&mut self, now: Instant) {
        match self.due {
            Some(_) => self.coalesced += 1,
            None => self.due = Some(now + self.delay),
        }
    }

    pub fn is_due(&self) -> bool {
        self.is_due_at(Instant::now())
    }

    pub fn is_due_at(&self, now: Instant) -> bool {
        self.due.is_some_and(|due| now >= due)
    }

    /// Time until the pending redraw, if any
    #[cfg(test)]
    pub(crate) fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }

    /// Disarm after the refresh ran. Returns how many requests it absorbed.
    pub fn complete(&mut self) -> u64 {
        self.due = None;
        std::mem::take(&mut self.coalesced)
    }
}
