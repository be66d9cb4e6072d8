//! The roadmap timeline.
//!
//! Items slide in from alternating sides as they scroll into view, each
//! reveal staggered behind the previous one and reflected in the progress
//! line fill. Reveals are one-shot.

use crate::events::{AppEvent, EventBus};
use crate::fx::easing::ease_out_cubic;
use std::time::{Duration, Instant};

/// Rows each timeline item occupies, marker row included.
pub const ITEM_HEIGHT: u16 = 5;
/// Rows between the section top and the first item.
pub const HEADER_HEIGHT: u16 = 4;

const STAGGER: Duration = Duration::from_millis(150);
const TRANSITION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct RoadmapItem {
    pub phase: &'static str,
    pub title: &'static str,
    pub details: &'static [&'static str],
}

pub const ROADMAP_ITEMS: [RoadmapItem; 6] = [
    RoadmapItem {
        phase: "Phase 1",
        title: "Genesis",
        details: &["Token launch on Solana", "Community channels open"],
    },
    RoadmapItem {
        phase: "Phase 2",
        title: "Foundation",
        details: &["Liquidity pool locked", "CORE terminal goes live"],
    },
    RoadmapItem {
        phase: "Phase 3",
        title: "Expansion",
        details: &["CEX listings", "10,000 holders of the essence"],
    },
    RoadmapItem {
        phase: "Phase 4",
        title: "Connection",
        details: &["Cross-chain bridge via Wormhole", "Governance voting opens"],
    },
    RoadmapItem {
        phase: "Phase 5",
        title: "Essence",
        details: &["Staking rewards begin", "CORE ecosystem grants"],
    },
    RoadmapItem {
        phase: "Phase 6",
        title: "Eternity",
        details: &["Full decentralization", "The core sustains itself"],
    },
];

#[derive(Debug, Clone, Copy, PartialEq)]
enum ItemState {
    Hidden,
    Pending { since: Instant },
    Animating { started: Instant },
    Revealed,
}

#[derive(Debug)]
pub struct RoadmapTimeline {
    states: Vec<ItemState>,
    animations_enabled: bool,
}

impl RoadmapTimeline {
    pub fn new(animations_enabled: bool) -> Self {
        Self {
            states: vec![ItemState::Hidden; ROADMAP_ITEMS.len()],
            animations_enabled,
        }
    }

    pub fn items(&self) -> &'static [RoadmapItem] {
        &ROADMAP_ITEMS
    }

    /// Items alternate sides down the timeline.
    pub fn side(index: usize) -> Side {
        if index % 2 == 0 {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Absolute top row of an item given the section's top row.
    pub fn item_top(section_top: f32, index: usize) -> f32 {
        section_top + HEADER_HEIGHT as f32 + (index as u16 * ITEM_HEIGHT) as f32
    }

    /// Total rows the timeline needs below the section heading.
    pub fn body_height() -> u16 {
        HEADER_HEIGHT + ROADMAP_ITEMS.len() as u16 * ITEM_HEIGHT
    }

    pub fn tick(
        &mut self,
        now: Instant,
        section_top: f32,
        view_top: f32,
        view_height: f32,
        bus: &mut EventBus,
    ) {
        let view_bottom = view_top + view_height;
        // Later items wait out one stagger step per already-pending neighbor
        let mut newly_visible = 0u32;

        for (index, state) in self.states.iter_mut().enumerate() {
            let top = Self::item_top(section_top, index);
            let intersects =
                top < view_bottom - 1.0 && top + ITEM_HEIGHT as f32 > view_top;

            match *state {
                ItemState::Hidden if intersects => {
                    if !self.animations_enabled {
                        *state = ItemState::Revealed;
                        bus.emit(AppEvent::TimelineItemRevealed { index });
                    } else {
                        *state = ItemState::Pending {
                            since: now + STAGGER * newly_visible,
                        };
                        newly_visible += 1;
                    }
                }
                ItemState::Pending { since } => {
                    if now >= since {
                        *state = ItemState::Animating { started: now };
                        bus.emit(AppEvent::TimelineItemRevealed { index });
                    }
                }
                ItemState::Animating { started } => {
                    if now.saturating_duration_since(started) >= TRANSITION {
                        *state = ItemState::Revealed;
                    }
                }
                _ => {}
            }
        }
    }

    /// Slide-in progress for one item: 0 hidden, eased 0..1, 1 revealed.
    pub fn progress(&self, index: usize, now: Instant) -> f32 {
        match self.states.get(index) {
            None => 0.0,
            Some(ItemState::Hidden) | Some(ItemState::Pending { .. }) => 0.0,
            Some(ItemState::Animating { started }) => {
                let elapsed = now.saturating_duration_since(*started).as_secs_f32();
                ease_out_cubic(elapsed / TRANSITION.as_secs_f32())
            }
            Some(ItemState::Revealed) => 1.0,
        }
    }

    pub fn revealed_count(&self, now: Instant) -> usize {
        (0..self.states.len())
            .filter(|i| self.progress(*i, now) >= 1.0)
            .count()
    }

    /// Fill fraction of the timeline progress line.
    pub fn line_fill(&self, now: Instant) -> f32 {
        self.revealed_count(now) as f32 / self.states.len() as f32
    }

    pub fn is_animating(&self) -> bool {
        self.states.iter().any(|s| {
            matches!(s, ItemState::Pending { .. } | ItemState::Animating { .. })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain_indices(bus: &mut EventBus) -> Vec<usize> {
        bus.drain()
            .into_iter()
            .filter_map(|e| match e {
                AppEvent::TimelineItemRevealed { index } => Some(index),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_items_reveal_with_stagger() {
        let mut timeline = RoadmapTimeline::new(true);
        let mut bus = EventBus::new();
        let t0 = Instant::now();

        // Viewport covers the first two items only
        timeline.tick(t0, 0.0, 0.0, 14.0, &mut bus);
        assert!(drain_indices(&mut bus).is_empty());

        // First item fires at once, second one stagger step later
        timeline.tick(t0 + Duration::from_millis(1), 0.0, 0.0, 14.0, &mut bus);
        assert_eq!(drain_indices(&mut bus), vec![0]);

        timeline.tick(t0 + Duration::from_millis(200), 0.0, 0.0, 14.0, &mut bus);
        assert_eq!(drain_indices(&mut bus), vec![1]);

        // Items below the fold stay hidden
        assert_eq!(timeline.progress(4, t0 + Duration::from_secs(1)), 0.0);
    }

    #[test]
    fn test_reveals_are_one_shot_and_fill_the_line() {
        let mut timeline = RoadmapTimeline::new(true);
        let mut bus = EventBus::new();
        let t0 = Instant::now();

        // Tall viewport sees everything
        for step in 0..30 {
            timeline.tick(
                t0 + Duration::from_millis(step * 100),
                0.0,
                0.0,
                200.0,
                &mut bus,
            );
        }
        let indices = drain_indices(&mut bus);
        assert_eq!(indices.len(), ROADMAP_ITEMS.len());

        let done = t0 + Duration::from_secs(10);
        timeline.tick(done, 0.0, 0.0, 200.0, &mut bus);
        assert!(drain_indices(&mut bus).is_empty());
        assert_eq!(timeline.line_fill(done), 1.0);
        assert!(!timeline.is_animating());
    }

    #[test]
    fn test_disabled_animations_reveal_immediately() {
        let mut timeline = RoadmapTimeline::new(false);
        let mut bus = EventBus::new();
        let t0 = Instant::now();
        timeline.tick(t0, 0.0, 0.0, 200.0, &mut bus);
        assert_eq!(drain_indices(&mut bus).len(), ROADMAP_ITEMS.len());
        assert_eq!(timeline.line_fill(t0), 1.0);
    }

    #[test]
    fn test_sides_alternate() {
        assert_eq!(RoadmapTimeline::side(0), Side::Left);
        assert_eq!(RoadmapTimeline::side(1), Side::Right);
        assert_eq!(RoadmapTimeline::side(2), Side::Left);
    }
}
