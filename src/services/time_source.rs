//! Time source abstraction for testability.
//!
//! Animations, staged effects, and timers all read time through a
//! `TimeSource`, so production code uses real system time while tests drive a
//! controllable mock for fast, deterministic runs.

use chrono::Utc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Abstraction over time-related operations.
pub trait TimeSource: Send + Sync + std::fmt::Debug {
    /// Get the current instant for measuring elapsed time.
    fn now(&self) -> Instant;

    /// Get today's date as YYYY-MM-DD string.
    fn today_date_string(&self) -> String;

    /// Calculate elapsed time since an earlier instant.
    fn elapsed_since(&self, earlier: Instant) -> Duration {
        self.now().saturating_duration_since(earlier)
    }
}

/// Type alias for shared time source.
pub type SharedTimeSource = Arc<dyn TimeSource>;

/// Production implementation using actual system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealTimeSource;

impl RealTimeSource {
    pub fn new() -> Self {
        Self
    }

    pub fn shared() -> SharedTimeSource {
        Arc::new(Self)
    }
}

impl TimeSource for RealTimeSource {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn today_date_string(&self) -> String {
        Utc::now().format("%Y-%m-%d").to_string()
    }
}

/// Test implementation with controllable time.
///
/// `now()` returns a logical instant derived from a base instant plus an
/// offset that only moves when `advance()` is called.
#[derive(Debug)]
pub struct TestTimeSource {
    base: Instant,
    offset_nanos: AtomicU64,
}

impl TestTimeSource {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset_nanos: AtomicU64::new(0),
        }
    }

    pub fn shared() -> Arc<TestTimeSource> {
        Arc::new(Self::new())
    }

    /// Advance logical time by the given duration.
    pub fn advance(&self, duration: Duration) {
        self.offset_nanos
            .fetch_add(duration.as_nanos() as u64, Ordering::SeqCst);
    }
}

impl Default for TestTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for TestTimeSource {
    fn now(&self) -> Instant {
        self.base + Duration::from_nanos(self.offset_nanos.load(Ordering::SeqCst))
    }

    fn today_date_string(&self) -> String {
        "2024-01-01".to_string()
    }
}
