//! The boot splash that gates the page.
//!
//! Media loading sits behind a trait so the load, stall, and failure paths
//! are all drivable in tests. A stalled load is forced ready by a fallback
//! timer and auto-enters shortly after; a failed load auto-enters even
//! sooner. Entering tears down every splash timer.

use crate::page::CORE_BANNER;
use crate::services::time_source::SharedTimeSource;
use crate::services::timers::TimerRegistry;
use crate::view::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use std::time::{Duration, Instant};

/// Auto-enter delay after a load failure.
const ERROR_ENTER_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    Start,
    Metadata,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaState {
    Loading(LoadStage),
    Ready,
    Failed,
}

/// Whatever plays behind the splash. The production source streams the
/// embedded intro banner; tests script their own.
pub trait MediaSource: std::fmt::Debug {
    fn poll(&mut self, now: Instant) -> MediaState;
}

/// Embedded intro banner, "loaded" in stages to drive the status line the
/// way a buffering video drove the original.
#[derive(Debug)]
pub struct BannerMedia {
    started: Instant,
}

impl BannerMedia {
    pub fn new(started: Instant) -> Self {
        Self { started }
    }
}

impl MediaSource for BannerMedia {
    fn poll(&mut self, now: Instant) -> MediaState {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed < Duration::from_millis(300) {
            MediaState::Loading(LoadStage::Start)
        } else if elapsed < Duration::from_millis(700) {
            MediaState::Loading(LoadStage::Metadata)
        } else if elapsed < Duration::from_millis(1100) {
            MediaState::Loading(LoadStage::Data)
        } else {
            MediaState::Ready
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplashTimer {
    ForceReady,
    AutoEnter,
}

#[derive(Debug)]
pub struct Splash {
    media: Box<dyn MediaSource>,
    status: &'static str,
    ready: bool,
    entered: bool,
    failed: bool,
    timers: TimerRegistry<SplashTimer>,
    time: SharedTimeSource,
    auto_enter_delay: Duration,
}

impl Splash {
    pub fn new(
        time: SharedTimeSource,
        media: Box<dyn MediaSource>,
        timeout: Duration,
        auto_enter_delay: Duration,
    ) -> Self {
        let mut timers = TimerRegistry::new(time.clone());
        // Fallback: never strand the visitor on the loader
        timers.schedule(timeout, SplashTimer::ForceReady);

        Self {
            media,
            status: "INITIALIZING...",
            ready: false,
            entered: false,
            failed: false,
            timers,
            time,
            auto_enter_delay,
        }
    }

    pub fn status(&self) -> &'static str {
        self.status
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    /// Advance the load state machine and fire due timers.
    pub fn tick(&mut self) {
        if self.entered {
            return;
        }

        let now = self.time.now();
        if !self.ready {
            match self.media.poll(now) {
                MediaState::Loading(LoadStage::Start) => self.status = "LOADING CORE DATA...",
                MediaState::Loading(LoadStage::Metadata) => {
                    self.status = "CORE METADATA LOADED..."
                }
                MediaState::Loading(LoadStage::Data) => self.status = "CORE DATA READY...",
                MediaState::Ready => {
                    self.ready = true;
                    self.status = "READY TO INITIALIZE";
                }
                MediaState::Failed => {
                    if !self.failed {
                        self.failed = true;
                        self.ready = true;
                        self.status = "CORE READY - PROCEEDING...";
                        tracing::warn!("splash media failed to load, proceeding without it");
                        self.timers
                            .schedule(ERROR_ENTER_DELAY, SplashTimer::AutoEnter);
                    }
                }
            }
        }

        for timer in self.timers.due() {
            match timer {
                SplashTimer::ForceReady => {
                    if !self.ready {
                        tracing::warn!("splash media timed out, forcing ready state");
                        self.ready = true;
                        self.status = "READY TO INITIALIZE";
                        self.timers
                            .schedule(self.auto_enter_delay, SplashTimer::AutoEnter);
                    }
                }
                SplashTimer::AutoEnter => self.enter(),
            }
        }
    }

    /// Enter the core. Cancels every pending splash timer.
    pub fn enter(&mut self) {
        if self.entered {
            return;
        }
        self.entered = true;
        self.status = "ENTERING THE CORE...";
        self.timers.teardown();
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        buf.set_style(area, Style::default().bg(theme.bg).fg(theme.fg));

        let banner_height = CORE_BANNER.len() as u16;
        let top = area.height.saturating_sub(banner_height + 8) / 2;

        let banner_style = if self.ready {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.accent_dark)
        };
        for (i, row) in CORE_BANNER.iter().enumerate() {
            draw_centered_line(
                buf,
                area,
                top + i as u16,
                Line::from(Span::styled(*row, banner_style)),
            );
        }

        draw_centered_line(
            buf,
            area,
            top + banner_height + 2,
            Line::from(Span::styled(self.status, Style::default().fg(theme.dim))),
        );

        let button_style = if self.ready {
            Style::default()
                .fg(theme.accent_light)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(theme.dim)
        };
        draw_centered_line(
            buf,
            area,
            top + banner_height + 4,
            Line::from(Span::styled("[ ENTER THE CORE ]", button_style)),
        );
        draw_centered_line(
            buf,
            area,
            top + banner_height + 6,
            Line::from(Span::styled(
                "press Enter",
                Style::default().fg(theme.dim),
            )),
        );
    }
}

fn draw_centered_line(buf: &mut Buffer, area: Rect, y: u16, line: Line) {
    if y >= area.y + area.height {
        return;
    }
    let width = line.width() as u16;
    let x = area.x + area.width.saturating_sub(width) / 2;
    buf.set_line(x, y, &line, width.min(area.width));
}
