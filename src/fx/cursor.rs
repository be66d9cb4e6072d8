//! Pointer-following cursor glyph.
//!
//! Eases toward the latest pointer position, stays hidden until the first
//! pointer event, and swaps glyphs while a button is held or an interactive
//! row is under it.

use crate::view::theme::Theme;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

/// Fraction of the remaining distance covered per second.
const FOLLOW_RATE: f32 = 14.0;

#[derive(Debug, Default)]
pub struct CursorTrail {
    pos: Option<(f32, f32)>,
    target: Option<(f32, f32)>,
    pressed: bool,
    hovering: bool,
    enabled: bool,
}

impl CursorTrail {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn pointer_moved(&mut self, x: u16, y: u16) {
        let target = (x as f32, y as f32);
        self.target = Some(target);
        if self.pos.is_none() {
            self.pos = Some(target);
        }
    }

    /// Pointer left the window: hide until it comes back.
    pub fn pointer_left(&mut self) {
        self.target = None;
        self.pos = None;
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    pub fn position(&self) -> Option<(f32, f32)> {
        self.pos
    }

    pub fn update(&mut self, dt: f32) {
        if !self.enabled {
            return;
        }
        if let (Some((px, py)), Some((tx, ty))) = (self.pos, self.target) {
            let blend = (FOLLOW_RATE * dt).min(1.0);
            self.pos = Some((px + (tx - px) * blend, py + (ty - py) * blend));
        }
    }

    fn glyph(&self) -> char {
        if self.pressed {
            '◉'
        } else if self.hovering {
            '◆'
        } else {
            '✛'
        }
    }

    /// Drawn last so it sits above everything else.
    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if !self.enabled {
            return;
        }
        let Some((x, y)) = self.pos else { return };
        let (cx, cy) = (x.round() as i32, y.round() as i32);
        if cx < area.x as i32
            || cy < area.y as i32
            || cx >= (area.x + area.width) as i32
            || cy >= (area.y + area.height) as i32
        {
            return;
        }
        if let Some(cell) = buf.cell_mut((cx as u16, cy as u16)) {
            cell.set_char(self.glyph());
            cell.set_style(
                Style::default()
                    .fg(theme.accent_light)
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}
