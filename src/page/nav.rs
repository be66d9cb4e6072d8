//! The navigation bar.
//!
//! Wide viewports get a tab row; narrow ones collapse to a toggle that opens
//! a vertical menu, which closes itself after a selection.

use crate::page::SectionId;
use crate::view::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use std::ops::Range;
use unicode_width::UnicodeWidthStr;

/// Below this width the bar collapses to a menu toggle.
pub const COLLAPSE_WIDTH: u16 = 70;

const BRAND: &str = " ◉ CORE ";
const TOGGLE: &str = " ≡ ";

/// What a mouse click on the bar hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavHit {
    Section(SectionId),
    Toggle,
}

#[derive(Debug)]
pub struct NavBar {
    active: SectionId,
    menu_open: bool,
}

impl NavBar {
    pub fn new() -> Self {
        Self {
            active: SectionId::Hero,
            menu_open: false,
        }
    }

    pub fn active(&self) -> SectionId {
        self.active
    }

    pub fn set_active(&mut self, id: SectionId) {
        self.active = id;
    }

    pub fn is_collapsed(width: u16) -> bool {
        width < COLLAPSE_WIDTH
    }

    pub fn menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Tab column ranges for the expanded bar, keyed by section.
    fn tab_spans(width: u16) -> Vec<(SectionId, Range<u16>)> {
        let mut spans = Vec::new();
        let mut x = BRAND.width() as u16;
        for id in SectionId::ALL {
            let label = format!("  {}  ", id.nav_label());
            let w = label.width() as u16;
            if x + w > width {
                break;
            }
            spans.push((id, x..x + w));
            x += w;
        }
        spans
    }

    /// Resolve a click. `y` is relative to the top of the bar; rows past the
    /// first belong to the open dropdown menu.
    pub fn hit_test(&self, x: u16, y: u16, width: u16) -> Option<NavHit> {
        if y == 0 {
            if Self::is_collapsed(width) {
                let toggle_start = width.saturating_sub(TOGGLE.width() as u16);
                return (x >= toggle_start).then_some(NavHit::Toggle);
            }
            return Self::tab_spans(width)
                .into_iter()
                .find(|(_, range)| range.contains(&x))
                .map(|(id, _)| NavHit::Section(id));
        }
        if self.menu_open && Self::is_collapsed(width) {
            let index = (y - 1) as usize;
            return SectionId::ALL.get(index).map(|id| NavHit::Section(*id));
        }
        None
    }

    /// Rows the bar occupies: 1, plus the dropdown when open.
    pub fn height(&self, width: u16) -> u16 {
        if self.menu_open && Self::is_collapsed(width) {
            1 + SectionId::ALL.len() as u16
        } else {
            1
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let bar = Rect {
            height: 1,
            ..area
        };
        buf.set_style(bar, Style::default().bg(theme.panel_bg));

        let brand_style = Style::default()
            .fg(theme.accent_light)
            .add_modifier(Modifier::BOLD);

        if Self::is_collapsed(area.width) {
            buf.set_line(area.x, area.y, &Line::from(Span::styled(BRAND, brand_style)), area.width);
            let toggle_x = area.x + area.width.saturating_sub(TOGGLE.width() as u16);
            buf.set_line(
                toggle_x,
                area.y,
                &Line::from(Span::styled(TOGGLE, Style::default().fg(theme.accent))),
                TOGGLE.width() as u16,
            );

            if self.menu_open {
                for (i, id) in SectionId::ALL.iter().enumerate() {
                    let y = area.y + 1 + i as u16;
                    if y >= area.y + area.height {
                        break;
                    }
                    let style = if *id == self.active {
                        Style::default()
                            .fg(theme.accent_light)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().fg(theme.fg)
                    };
                    let row = Rect {
                        y,
                        height: 1,
                        ..area
                    };
                    buf.set_style(row, Style::default().bg(theme.panel_bg));
                    buf.set_line(
                        area.x,
                        y,
                        &Line::from(Span::styled(format!("   {}", id.nav_label()), style)),
                        area.width,
                    );
                }
            }
            return;
        }

        let mut spans = vec![Span::styled(BRAND, brand_style)];
        for (id, _) in Self::tab_spans(area.width) {
            let style = if id == self.active {
                Style::default()
                    .fg(theme.accent_light)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(theme.dim)
            };
            spans.push(Span::styled(format!("  {}  ", id.nav_label()), style));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

impl Default for NavBar {
    fn default() -> Self {
        Self::new()
    }
}
