//! The virtual page: sections stacked into one scrollable column.

pub mod counters;
pub mod nav;
pub mod roadmap;

use crate::events::{AppEvent, EventBus};
use crate::fx::reveal::RevealEngine;
use crate::fx::scroll::ScrollAnimator;
use crate::term::content::{
    ABOUT_PHILOSOPHY, ABOUT_TOKENOMICS, CONTRACT_ADDRESS,
};
use crate::view::theme::Theme;
use counters::CounterSet;
use nav::NavBar;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use roadmap::{RoadmapTimeline, Side};
use std::time::{Duration, Instant};
use unicode_width::UnicodeWidthStr;

/// Block-letter CORE mark shared by the hero and the splash.
pub const CORE_BANNER: [&str; 6] = [
    " ██████╗ ██████╗ ██████╗ ███████╗",
    "██╔════╝██╔═══██╗██╔══██╗██╔════╝",
    "██║     ██║   ██║██████╔╝█████╗  ",
    "██║     ██║   ██║██╔══██╗██╔══╝  ",
    "╚██████╗╚██████╔╝██║  ██║███████╗",
    " ╚═════╝ ╚═════╝ ╚═╝  ╚═╝╚══════╝",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Hero,
    Philosophy,
    Tokenomics,
    Roadmap,
    Community,
}

impl SectionId {
    pub const ALL: [SectionId; 5] = [
        SectionId::Hero,
        SectionId::Philosophy,
        SectionId::Tokenomics,
        SectionId::Roadmap,
        SectionId::Community,
    ];

    pub fn nav_label(&self) -> &'static str {
        match self {
            SectionId::Hero => "Home",
            SectionId::Philosophy => "Philosophy",
            SectionId::Tokenomics => "Tokenomics",
            SectionId::Roadmap => "Roadmap",
            SectionId::Community => "Community",
        }
    }

    /// Anchor name accepted by `--section`.
    pub fn from_anchor(anchor: &str) -> Option<SectionId> {
        match anchor.to_lowercase().as_str() {
            "home" | "hero" => Some(SectionId::Hero),
            "philosophy" | "about" => Some(SectionId::Philosophy),
            "tokenomics" => Some(SectionId::Tokenomics),
            "roadmap" => Some(SectionId::Roadmap),
            "community" | "footer" => Some(SectionId::Community),
            _ => None,
        }
    }

    pub fn index(&self) -> usize {
        SectionId::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SectionSpan {
    pub id: SectionId,
    pub top: u16,
    pub height: u16,
}

const TOKENOMICS_CARDS: [(&str, &str); 4] = [
    ("Liquidity Pool", "40%"),
    ("Community Rewards", "30%"),
    ("Development", "20%"),
    ("Marketing", "10%"),
];

const COMMUNITY_LINKS: [&str; 3] = [
    "Telegram   t.me/coretoken",
    "X          x.com/coretoken",
    "Discord    discord.gg/coretoken",
];

#[derive(Debug)]
pub struct Page {
    spans: Vec<SectionSpan>,
    pub scroll: ScrollAnimator,
    pub reveal: RevealEngine,
    pub roadmap: RoadmapTimeline,
    pub counters: CounterSet,
    pub nav: NavBar,
    active: SectionId,
    view_height: u16,
    animations_enabled: bool,
}

impl Page {
    pub fn new(animations_enabled: bool) -> Self {
        Self {
            spans: Vec::new(),
            scroll: ScrollAnimator::new(),
            reveal: RevealEngine::new(animations_enabled),
            roadmap: RoadmapTimeline::new(animations_enabled),
            counters: CounterSet::hero(),
            nav: NavBar::new(),
            active: SectionId::Hero,
            view_height: 0,
            animations_enabled,
        }
    }

    /// Recompute section spans and reveal targets for the viewport.
    /// Reveal state survives re-layout; only positions move.
    pub fn layout(&mut self, view_height: u16) {
        self.view_height = view_height;
        let heights = [
            (SectionId::Hero, view_height.max(16)),
            (SectionId::Philosophy, 20),
            (SectionId::Tokenomics, 21),
            (
                SectionId::Roadmap,
                3 + RoadmapTimeline::body_height() + 1,
            ),
            (SectionId::Community, 14),
        ];

        self.spans.clear();
        let mut top = 0u16;
        for (id, height) in heights {
            self.spans.push(SectionSpan { id, top, height });
            top += height;
        }

        self.scroll
            .set_max(top.saturating_sub(view_height) as f32);

        for span in &self.spans {
            match span.id {
                SectionId::Hero => {}
                SectionId::Tokenomics => {
                    self.reveal.observe(
                        "tokenomics",
                        span.top as f32,
                        6.0,
                        Duration::ZERO,
                    );
                    for (i, _) in TOKENOMICS_CARDS.iter().enumerate() {
                        self.reveal.observe(
                            format!("tokenomics-card-{}", i),
                            (span.top + 8 + i as u16 * 3) as f32,
                            3.0,
                            Duration::from_millis(120 * i as u64),
                        );
                    }
                }
                id => {
                    self.reveal.observe(
                        id.nav_label().to_lowercase(),
                        span.top as f32,
                        6.0,
                        Duration::ZERO,
                    );
                }
            }
        }
    }

    pub fn spans(&self) -> &[SectionSpan] {
        &self.spans
    }

    pub fn span_of(&self, id: SectionId) -> Option<SectionSpan> {
        self.spans.iter().copied().find(|s| s.id == id)
    }

    pub fn total_height(&self) -> u16 {
        self.spans.last().map(|s| s.top + s.height).unwrap_or(0)
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    /// Section whose span contains the given absolute row.
    pub fn section_at(&self, row: f32) -> SectionId {
        self.spans
            .iter()
            .find(|s| row >= s.top as f32 && row < (s.top + s.height) as f32)
            .map(|s| s.id)
            .unwrap_or(SectionId::Community)
    }

    pub fn jump_to(&mut self, id: SectionId, now: Instant) {
        if let Some(span) = self.span_of(id) {
            if self.animations_enabled {
                self.scroll.scroll_to(span.top as f32, now);
            } else {
                let delta = span.top as f32 - self.scroll.offset();
                self.scroll.scroll_by(delta);
            }
        }
        self.nav.close_menu();
    }

    pub fn next_section(&mut self, now: Instant) {
        let next = SectionId::ALL
            .get(self.active.index() + 1)
            .copied()
            .unwrap_or(SectionId::Community);
        self.jump_to(next, now);
    }

    pub fn prev_section(&mut self, now: Instant) {
        let prev = self.active.index().saturating_sub(1);
        self.jump_to(SectionId::ALL[prev], now);
    }

    /// Advance scroll, reveal, and timeline state. Returns true while
    /// anything is still moving.
    pub fn tick(&mut self, now: Instant, bus: &mut EventBus) -> bool {
        let scrolling = self.scroll.tick(now, bus);
        let offset = self.scroll.offset();
        let view_height = self.view_height as f32;

        let center = offset + view_height / 2.0;
        let section = self.section_at(center);
        if section != self.active {
            self.active = section;
            self.nav.set_active(section);
            bus.emit(AppEvent::SectionChange(section));
        }

        self.reveal.tick(now, offset, view_height, bus);
        if let Some(span) = self.span_of(SectionId::Roadmap) {
            self.roadmap
                .tick(now, (span.top + 3) as f32, offset, view_height, bus);
        }

        scrolling
            || self.reveal.is_animating()
            || self.roadmap.is_animating()
            || self.counters.is_animating(now)
    }

    /// Span of absolute rows where the starfield is active: philosophy
    /// through the end of the page.
    pub fn stars_window(&self) -> (f32, f32) {
        let top = self
            .span_of(SectionId::Philosophy)
            .map(|s| s.top as f32)
            .unwrap_or(0.0);
        (top, self.total_height() as f32)
    }

    // ------------------------------------------------------------------
    // Rendering

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme, now: Instant) {
        let offset = self.scroll.offset();
        for span in &self.spans {
            let screen_top = span.top as f32 - offset;
            if screen_top + span.height as f32 <= 0.0 || screen_top >= area.height as f32 {
                continue;
            }
            match span.id {
                SectionId::Hero => self.render_hero(area, buf, theme, now, screen_top),
                SectionId::Philosophy => {
                    self.render_philosophy(area, buf, theme, now, screen_top)
                }
                SectionId::Tokenomics => {
                    self.render_tokenomics(area, buf, theme, now, screen_top)
                }
                SectionId::Roadmap => self.render_roadmap(area, buf, theme, now, screen_top),
                SectionId::Community => {
                    self.render_community(area, buf, theme, now, screen_top)
                }
            }
        }
    }

    fn render_hero(&self, area: Rect, buf: &mut Buffer, theme: &Theme, now: Instant, top: f32) {
        let accent = Style::default().fg(theme.accent).add_modifier(Modifier::BOLD);
        let mut row = 2i32;
        for line in CORE_BANNER {
            draw_centered(buf, area, top, row, line, accent);
            row += 1;
        }
        row += 1;
        draw_centered(
            buf,
            area,
            top,
            row,
            "The essence of everything, connecting all through love.",
            Style::default().fg(theme.fg).add_modifier(Modifier::ITALIC),
        );
        row += 2;

        for (i, counter) in self.counters.counters().iter().enumerate() {
            draw_centered(
                buf,
                area,
                top,
                row,
                &format!("{:<14}{:>18}", counter.label, self.counters.display(i, now)),
                Style::default().fg(theme.accent_light),
            );
            row += 1;
        }

        row += 1;
        draw_centered(
            buf,
            area,
            top,
            row,
            &format!("Contract {}", CONTRACT_ADDRESS),
            Style::default().fg(theme.dim),
        );
        draw_centered(
            buf,
            area,
            top,
            row + 1,
            "[c] copy contract   [t] terminal   [PgDn] explore",
            Style::default().fg(theme.dim),
        );
    }

    fn render_philosophy(
        &self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        now: Instant,
        top: f32,
    ) {
        let p = self.reveal.progress("philosophy", now);
        if p <= 0.0 {
            return;
        }
        let (top, style) = reveal_shift(top, p);
        draw_centered(
            buf,
            area,
            top,
            1,
            "T H E   P H I L O S O P H Y",
            style.fg(theme.heading).add_modifier(Modifier::BOLD),
        );
        for (i, line) in ABOUT_PHILOSOPHY.iter().skip(1).enumerate() {
            draw_centered(buf, area, top, 3 + i as i32, line, style.fg(theme.fg));
        }
    }

    fn render_tokenomics(
        &self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        now: Instant,
        top: f32,
    ) {
        let p = self.reveal.progress("tokenomics", now);
        if p > 0.0 {
            let (shifted, style) = reveal_shift(top, p);
            draw_centered(
                buf,
                area,
                shifted,
                1,
                "T O K E N O M I C S",
                style.fg(theme.heading).add_modifier(Modifier::BOLD),
            );
            draw_centered(
                buf,
                area,
                shifted,
                3,
                ABOUT_TOKENOMICS[2], // total supply line
                style.fg(theme.accent_light),
            );
            draw_centered(
                buf,
                area,
                shifted,
                5,
                "Distribution",
                style.fg(theme.dim),
            );
        }

        for (i, (label, share)) in TOKENOMICS_CARDS.iter().enumerate() {
            let cp = self.reveal.progress(&format!("tokenomics-card-{}", i), now);
            if cp <= 0.0 {
                continue;
            }
            let (card_top, card_style) = reveal_shift(top, cp);
            let bar_width = (20.0 * cp * share_fraction(share)) as usize;
            draw_centered(
                buf,
                area,
                card_top,
                8 + i as i32 * 3,
                &format!("{:<18} {:>4}  {:<20}", label, share, "█".repeat(bar_width)),
                card_style.fg(theme.accent),
            );
        }
    }

    fn render_roadmap(
        &self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        now: Instant,
        top: f32,
    ) {
        let p = self.reveal.progress("roadmap", now);
        if p > 0.0 {
            let (shifted, style) = reveal_shift(top, p);
            draw_centered(
                buf,
                area,
                shifted,
                1,
                "R O A D M A P",
                style.fg(theme.heading).add_modifier(Modifier::BOLD),
            );
        }

        let center_x = area.x + area.width / 2;
        let body_top = top + 3.0;

        // Timeline spine with progressive fill
        let fill_rows =
            (self.roadmap.line_fill(now) * RoadmapTimeline::body_height() as f32) as i32;
        for r in 0..RoadmapTimeline::body_height() as i32 {
            let style = if r < fill_rows {
                Style::default().fg(theme.accent)
            } else {
                Style::default().fg(theme.accent_dark)
            };
            draw_at(buf, area, body_top, r, center_x, "│", style);
        }

        for (index, item) in self.roadmap.items().iter().enumerate() {
            let ip = self.roadmap.progress(index, now);
            if ip <= 0.0 {
                continue;
            }
            let local = (roadmap::HEADER_HEIGHT + index as u16 * roadmap::ITEM_HEIGHT) as i32;
            let marker_style = if ip >= 1.0 {
                Style::default().fg(theme.accent_light)
            } else {
                Style::default().fg(theme.accent_dark)
            };
            draw_at(buf, area, body_top, local, center_x, "◉", marker_style);

            // Slide in from the item's own side
            let slide = ((1.0 - ip) * 8.0) as i32;
            let dim = if ip < 1.0 {
                Style::default().fg(theme.dim)
            } else {
                Style::default().fg(theme.fg)
            };
            let (text_x, detail_x): (i32, i32) = match RoadmapTimeline::side(index) {
                Side::Left => {
                    let x = center_x as i32 - 30 - slide;
                    (x, x)
                }
                Side::Right => {
                    let x = center_x as i32 + 4 + slide;
                    (x, x)
                }
            };
            draw_at_x(
                buf,
                area,
                body_top,
                local,
                text_x,
                &format!("{} - {}", item.phase, item.title),
                dim.add_modifier(Modifier::BOLD),
            );
            for (d, detail) in item.details.iter().enumerate() {
                draw_at_x(buf, area, body_top, local + 1 + d as i32, detail_x, detail, dim);
            }
        }
    }

    fn render_community(
        &self,
        area: Rect,
        buf: &mut Buffer,
        theme: &Theme,
        now: Instant,
        top: f32,
    ) {
        let p = self.reveal.progress("community", now);
        if p <= 0.0 {
            return;
        }
        let (shifted, style) = reveal_shift(top, p);
        draw_centered(
            buf,
            area,
            shifted,
            1,
            "C O M M U N I T Y",
            style.fg(theme.heading).add_modifier(Modifier::BOLD),
        );
        for (i, link) in COMMUNITY_LINKS.iter().enumerate() {
            draw_centered(buf, area, shifted, 3 + i as i32, link, style.fg(theme.accent_light));
        }
        draw_centered(
            buf,
            area,
            shifted,
            8,
            "© 2024 CORE. All essence reserved.",
            style.fg(theme.dim),
        );
        draw_centered(
            buf,
            area,
            shifted,
            10,
            "◉ CORE lives forever ◉",
            style.fg(theme.accent),
        );
    }
}

fn share_fraction(share: &str) -> f32 {
    share
        .trim_end_matches('%')
        .parse::<f32>()
        .map(|v| v / 100.0)
        .unwrap_or(0.0)
}

/// Slide-up shift and dim styling for a section mid-reveal.
fn reveal_shift(top: f32, progress: f32) -> (f32, Style) {
    if progress >= 1.0 {
        (top, Style::default())
    } else {
        (
            top + (1.0 - progress) * 3.0,
            Style::default().add_modifier(Modifier::DIM),
        )
    }
}

/// Draw `text` centered on a row given the section's screen-space top.
fn draw_centered(
    buf: &mut Buffer,
    area: Rect,
    section_top: f32,
    local_row: i32,
    text: &str,
    style: Style,
) {
    let width = text.width() as i32;
    let x = area.x as i32 + (area.width as i32 - width) / 2;
    draw_at_x(buf, area, section_top, local_row, x, text, style);
}

fn draw_at(
    buf: &mut Buffer,
    area: Rect,
    section_top: f32,
    local_row: i32,
    x: u16,
    text: &str,
    style: Style,
) {
    draw_at_x(buf, area, section_top, local_row, x as i32, text, style);
}

/// Clipped blit of one styled string at an absolute column.
fn draw_at_x(
    buf: &mut Buffer,
    area: Rect,
    section_top: f32,
    local_row: i32,
    x: i32,
    text: &str,
    style: Style,
) {
    let y = section_top.round() as i32 + local_row;
    if y < area.y as i32 || y >= (area.y + area.height) as i32 {
        return;
    }
    let mut col = x;
    for ch in text.chars() {
        if col >= area.x as i32 && col < (area.x + area.width) as i32 {
            if let Some(cell) = buf.cell_mut((col as u16, y as u16)) {
                cell.set_char(ch);
                cell.set_style(style);
            }
        }
        col += 1;
    }
}
