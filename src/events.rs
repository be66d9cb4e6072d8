//! Cross-module signaling.
//!
//! Components publish onto the bus during a tick and the app drains it once
//! per frame; consumers are optional listeners, mirroring the custom DOM
//! events of a loosely-coupled page.

use crate::page::SectionId;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The splash finished and the page is live
    CoreLoaded,
    /// The viewport center moved into a different section
    SectionChange(SectionId),
    ElementRevealed { id: String },
    TimelineItemRevealed { index: usize },
    SmoothScrollComplete,
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: VecDeque<AppEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: AppEvent) {
        tracing::debug!("event: {:?}", event);
        self.queue.push_back(event);
    }

    pub fn drain(&mut self) -> Vec<AppEvent> {
        self.queue.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
