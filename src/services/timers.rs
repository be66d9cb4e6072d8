//! Scoped timer registry.
//!
//! Every delayed effect (staged terminal output, splash fallbacks, status
//! message expiry) is registered here with an owner scope instead of being
//! fired from free-floating callbacks. Owners cancel their scope on teardown,
//! so no timer outlives the component that created it.

use crate::services::time_source::SharedTimeSource;
use std::time::{Duration, Instant};

/// Identifies a scheduled timer so it can be cancelled individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct TimerEntry<T> {
    id: TimerId,
    deadline: Instant,
    payload: T,
}

/// A polled timer wheel owned by a single component.
///
/// Deadlines are checked from the tick loop via [`TimerRegistry::due`];
/// nothing fires spontaneously.
#[derive(Debug)]
pub struct TimerRegistry<T> {
    time: SharedTimeSource,
    entries: Vec<TimerEntry<T>>,
    next_id: u64,
}

impl<T> TimerRegistry<T> {
    pub fn new(time: SharedTimeSource) -> Self {
        Self {
            time,
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Schedule `payload` to become due after `delay`.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(TimerEntry {
            id,
            deadline: self.time.now() + delay,
            payload,
        });
        id
    }

    /// Cancel a single timer. Unknown ids are ignored.
    pub fn cancel(&mut self, id: TimerId) {
        self.entries.retain(|e| e.id != id);
    }

    /// Drop every pending timer.
    pub fn teardown(&mut self) {
        self.entries.clear();
    }

    /// Pop every timer whose deadline has passed, ordered by deadline.
    pub fn due(&mut self) -> Vec<T> {
        let now = self.time.now();
        let mut fired: Vec<TimerEntry<T>> = Vec::new();
        let mut remaining: Vec<TimerEntry<T>> = Vec::new();
        for entry in self.entries.drain(..) {
            if entry.deadline <= now {
                fired.push(entry);
            } else {
                remaining.push(entry);
            }
        }
        self.entries = remaining;
        fired.sort_by_key(|e| e.deadline);
        fired.into_iter().map(|e| e.payload).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::time_source::TestTimeSource;
    use std::sync::Arc;

    fn registry() -> (Arc<TestTimeSource>, TimerRegistry<&'static str>) {
        let time = TestTimeSource::shared();
        let reg = TimerRegistry::new(time.clone());
        (time, reg)
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let (time, mut reg) = registry();
        reg.schedule(Duration::from_millis(300), "late");
        reg.schedule(Duration::from_millis(100), "early");
        reg.schedule(Duration::from_millis(200), "mid");

        assert!(reg.due().is_empty());

        time.advance(Duration::from_millis(250));
        assert_eq!(reg.due(), vec!["early", "mid"]);
        assert_eq!(reg.len(), 1);

        time.advance(Duration::from_millis(100));
        assert_eq!(reg.due(), vec!["late"]);
        assert!(reg.is_empty());
    }

    #[test]
    fn cancel_removes_a_single_timer() {
        let (time, mut reg) = registry();
        let id = reg.schedule(Duration::from_millis(10), "a");
        reg.schedule(Duration::from_millis(10), "b");
        reg.cancel(id);

        time.advance(Duration::from_millis(20));
        assert_eq!(reg.due(), vec!["b"]);
    }

    #[test]
    fn teardown_leaves_no_live_timers() {
        let (time, mut reg) = registry();
        reg.schedule(Duration::from_millis(5), "a");
        reg.schedule(Duration::from_secs(5), "b");
        reg.teardown();

        time.advance(Duration::from_secs(10));
        assert!(reg.due().is_empty());
        assert!(reg.is_empty());
    }
}
