//! Smooth scrolling of the virtual page offset.
//!
//! Durations scale with distance; a new request replaces the in-flight
//! animation, and manual scrolling cancels it.

use crate::events::{AppEvent, EventBus};
use crate::fx::easing::ease_in_out_cubic;
use std::time::{Duration, Instant};

const MIN_DURATION: Duration = Duration::from_millis(400);
const MAX_DURATION: Duration = Duration::from_millis(1200);
/// Row distance that maps to the 800 ms mid-range duration.
const BASE_DISTANCE: f32 = 100.0;

#[derive(Debug)]
struct ScrollAnim {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

#[derive(Debug, Default)]
pub struct ScrollAnimator {
    offset: f32,
    max: f32,
    anim: Option<ScrollAnim>,
}

impl ScrollAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_animating(&self) -> bool {
        self.anim.is_some()
    }

    /// Clamp range changes with the page layout.
    pub fn set_max(&mut self, max: f32) {
        self.max = max.max(0.0);
        self.offset = self.offset.clamp(0.0, self.max);
    }

    pub fn duration_for(distance: f32) -> Duration {
        let ms = (distance.abs() / BASE_DISTANCE) * 800.0 + MIN_DURATION.as_millis() as f32;
        Duration::from_millis(ms as u64).clamp(MIN_DURATION, MAX_DURATION)
    }

    /// Animate to the target row, replacing any in-flight animation.
    pub fn scroll_to(&mut self, target: f32, now: Instant) {
        let target = target.clamp(0.0, self.max);
        let distance = target - self.offset;
        if distance.abs() < 0.5 {
            self.offset = target;
            self.anim = None;
            return;
        }
        self.anim = Some(ScrollAnim {
            from: self.offset,
            to: target,
            started: now,
            duration: Self::duration_for(distance),
        });
    }

    /// Manual scroll (wheel / arrow keys): jumps immediately and cancels any
    /// animation in flight.
    pub fn scroll_by(&mut self, delta: f32) {
        self.anim = None;
        self.offset = (self.offset + delta).clamp(0.0, self.max);
    }

    /// Advance the animation. Returns true while the offset is changing.
    pub fn tick(&mut self, now: Instant, bus: &mut EventBus) -> bool {
        let Some(anim) = &self.anim else {
            return false;
        };
        let elapsed = now.saturating_duration_since(anim.started);
        let progress = elapsed.as_secs_f32() / anim.duration.as_secs_f32();

        if progress >= 1.0 {
            self.offset = anim.to;
            self.anim = None;
            bus.emit(AppEvent::SmoothScrollComplete);
            return true;
        }

        self.offset = anim.from + (anim.to - anim.from) * ease_in_out_cubic(progress);
        true
    }
}
