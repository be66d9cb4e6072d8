//! Per-character reveal used by long terminal output and the splash status.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Typewriter {
    started: Instant,
    total: usize,
    per_char: Duration,
}

impl Typewriter {
    pub fn new(started: Instant, total: usize, per_char: Duration) -> Self {
        Self {
            started,
            total,
            per_char,
        }
    }

    /// Number of characters visible at `now`.
    pub fn revealed(&self, now: Instant) -> usize {
        if self.per_char.is_zero() {
            return self.total;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let chars = (elapsed.as_millis() / self.per_char.as_millis()) as usize;
        chars.min(self.total)
    }

    pub fn done(&self, now: Instant) -> bool {
        self.revealed(now) >= self.total
    }
}
