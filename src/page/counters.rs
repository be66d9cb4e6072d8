//! Animated hero statistics.
//!
//! Counters ease from zero to their target once started (on page entry),
//! matching the count-up the site ran when the stats scrolled into view.

use crate::fx::easing::ease_out_cubic;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Counter {
    pub label: &'static str,
    pub target: f64,
    pub suffix: &'static str,
}

pub const HERO_STATS: [Counter; 3] = [
    Counter {
        label: "Total Supply",
        target: 1_000_000_000.0,
        suffix: "CORE",
    },
    Counter {
        label: "Throughput",
        target: 65_000.0,
        suffix: "TPS",
    },
    Counter {
        label: "Confirmation",
        target: 400.0,
        suffix: "ms",
    },
];

#[derive(Debug)]
pub struct CounterSet {
    counters: Vec<Counter>,
    started: Option<Instant>,
    duration: Duration,
}

impl CounterSet {
    pub fn hero() -> Self {
        Self {
            counters: HERO_STATS.to_vec(),
            started: None,
            duration: Duration::from_millis(1200),
        }
    }

    /// Start the count-up. Subsequent calls are ignored (one-shot).
    pub fn start(&mut self, now: Instant) {
        if self.started.is_none() {
            self.started = Some(now);
        }
    }

    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    fn progress(&self, now: Instant) -> f32 {
        match self.started {
            None => 0.0,
            Some(started) => {
                let elapsed = now.saturating_duration_since(started).as_secs_f32();
                ease_out_cubic(elapsed / self.duration.as_secs_f32())
            }
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.started.is_some() && self.progress(now) < 1.0
    }

    pub fn value(&self, index: usize, now: Instant) -> f64 {
        let target = self.counters.get(index).map(|c| c.target).unwrap_or(0.0);
        target * self.progress(now) as f64
    }

    /// "1,000,000,000 CORE" style display for one counter.
    pub fn display(&self, index: usize, now: Instant) -> String {
        let Some(counter) = self.counters.get(index) else {
            return String::new();
        };
        format!(
            "{} {}",
            group_digits(self.value(index, now).round() as u64),
            counter.suffix
        )
    }
}

/// Thousands separators, e.g. 65000 -> "65,000".
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(400), "400");
        assert_eq!(group_digits(65_000), "65,000");
        assert_eq!(group_digits(1_000_000_000), "1,000,000,000");
    }

    #[test]
    fn test_counters_hold_zero_until_started() {
        let set = CounterSet::hero();
        assert_eq!(set.value(0, Instant::now()), 0.0);
        assert!(!set.is_animating(Instant::now()));
    }

    #[test]
    fn test_count_up_reaches_target() {
        let mut set = CounterSet::hero();
        let t0 = Instant::now();
        set.start(t0);

        let mid = set.value(1, t0 + Duration::from_millis(600));
        assert!(mid > 0.0 && mid < 65_000.0);
        assert!(set.is_animating(t0 + Duration::from_millis(600)));

        let done = t0 + Duration::from_secs(2);
        assert_eq!(set.value(1, done), 65_000.0);
        assert_eq!(set.display(1, done), "65,000 TPS");
        assert!(!set.is_animating(done));
    }

    #[test]
    fn test_start_is_one_shot() {
        let mut set = CounterSet::hero();
        let t0 = Instant::now();
        set.start(t0);
        set.start(t0 + Duration::from_secs(100));
        assert_eq!(set.value(0, t0 + Duration::from_secs(2)), 1_000_000_000.0);
    }
}
