//! Viewport-intersection reveal animations.
//!
//! Targets are registered with their absolute row span on the virtual page;
//! when the scrolling viewport reaches them they run a one-shot transition
//! and emit `ElementRevealed`. With animations disabled everything reveals
//! immediately, which is also the fallback when the terminal can't animate.

use crate::events::{AppEvent, EventBus};
use crate::fx::easing::ease_out_cubic;
use std::time::{Duration, Instant};

/// Rows of headroom before a target counts as visible.
const REVEAL_MARGIN: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum RevealState {
    Hidden,
    /// Visible but still waiting out its stagger delay
    Pending { since: Instant },
    Animating { started: Instant },
    Revealed,
}

#[derive(Debug)]
struct RevealTarget {
    id: String,
    top: f32,
    height: f32,
    delay: Duration,
    state: RevealState,
}

#[derive(Debug)]
pub struct RevealEngine {
    targets: Vec<RevealTarget>,
    animations_enabled: bool,
    transition: Duration,
}

impl RevealEngine {
    pub fn new(animations_enabled: bool) -> Self {
        Self {
            targets: Vec::new(),
            animations_enabled,
            transition: Duration::from_millis(600),
        }
    }

    /// Register a target by absolute row span. Re-observing a known id moves
    /// it (layout changed) without resetting its reveal state.
    pub fn observe(&mut self, id: impl Into<String>, top: f32, height: f32, delay: Duration) {
        let id = id.into();
        if let Some(existing) = self.targets.iter_mut().find(|t| t.id == id) {
            existing.top = top;
            existing.height = height;
            existing.delay = delay;
            return;
        }
        self.targets.push(RevealTarget {
            id,
            top,
            height,
            delay,
            state: RevealState::Hidden,
        });
    }

    pub fn teardown(&mut self) {
        self.targets.clear();
    }

    pub fn tick(&mut self, now: Instant, view_top: f32, view_height: f32, bus: &mut EventBus) {
        let view_bottom = view_top + view_height;
        for target in &mut self.targets {
            let intersects = target.top < view_bottom - REVEAL_MARGIN
                && target.top + target.height > view_top;

            match target.state {
                RevealState::Hidden if intersects => {
                    if !self.animations_enabled {
                        target.state = RevealState::Revealed;
                        bus.emit(AppEvent::ElementRevealed {
                            id: target.id.clone(),
                        });
                    } else if target.delay.is_zero() {
                        target.state = RevealState::Animating { started: now };
                        bus.emit(AppEvent::ElementRevealed {
                            id: target.id.clone(),
                        });
                    } else {
                        target.state = RevealState::Pending { since: now };
                    }
                }
                RevealState::Pending { since } => {
                    if now.saturating_duration_since(since) >= target.delay {
                        target.state = RevealState::Animating { started: now };
                        bus.emit(AppEvent::ElementRevealed {
                            id: target.id.clone(),
                        });
                    }
                }
                RevealState::Animating { started } => {
                    if now.saturating_duration_since(started) >= self.transition {
                        target.state = RevealState::Revealed;
                    }
                }
                _ => {}
            }
        }
    }

    /// Transition progress for a target: 0.0 hidden, eased 0..1 while
    /// animating, 1.0 once revealed. Unknown ids read as revealed so content
    /// never vanishes over a bookkeeping slip.
    pub fn progress(&self, id: &str, now: Instant) -> f32 {
        let Some(target) = self.targets.iter().find(|t| t.id == id) else {
            return 1.0;
        };
        match target.state {
            RevealState::Hidden | RevealState::Pending { .. } => 0.0,
            RevealState::Animating { started } => {
                let elapsed = now.saturating_duration_since(started).as_secs_f32();
                ease_out_cubic(elapsed / self.transition.as_secs_f32())
            }
            RevealState::Revealed => 1.0,
        }
    }

    pub fn is_revealed(&self, id: &str, now: Instant) -> bool {
        self.progress(id, now) >= 1.0
    }

    /// True while any target is mid-transition (keeps the render loop hot).
    pub fn is_animating(&self) -> bool {
        self.targets.iter().any(|t| {
            matches!(
                t.state,
                RevealState::Pending { .. } | RevealState::Animating { .. }
            )
        })
    }
}
