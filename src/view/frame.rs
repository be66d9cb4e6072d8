//! Per-frame composition.
//!
//! Layer order matters: starfield first, page content over it, chrome (nav,
//! terminal panel, status bar) over that, cursor glyph last.

use crate::app::App;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

/// Terminal panel cap, in rows.
const TERMINAL_PANEL_HEIGHT: u16 = 14;

pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    let now = app.now();
    let buf = frame.buffer_mut();

    buf.set_style(area, Style::default().bg(app.theme.bg).fg(app.theme.fg));

    if let Some(splash) = &app.splash {
        splash.render(area, buf, &app.theme);
        app.cursor.render(area, buf, &app.theme);
        return;
    }

    let nav_height = app.page.nav.height(area.width).min(area.height);
    let content = Rect {
        x: area.x,
        y: area.y + nav_height,
        width: area.width,
        height: app.content_height().min(area.height.saturating_sub(nav_height)),
    };

    app.stars.render(content, buf, &app.theme);
    app.page.render(content, buf, &app.theme, now);

    let nav_area = Rect {
        height: nav_height,
        ..area
    };
    app.page.nav.render(nav_area, buf, &app.theme);

    if app.terminal.is_open() && area.height > nav_height + 2 {
        let panel_height = TERMINAL_PANEL_HEIGHT
            .min(area.height.saturating_sub(nav_height + 1));
        let panel = Rect {
            x: area.x,
            y: area.y + area.height - 1 - panel_height,
            width: area.width,
            height: panel_height,
        };
        app.terminal.render(panel, buf, &app.theme);
    }

    render_status_bar(app, area, buf);
    app.cursor.render(area, buf, &app.theme);
}

fn render_status_bar(app: &App, area: Rect, buf: &mut ratatui::buffer::Buffer) {
    if area.height == 0 {
        return;
    }
    let y = area.y + area.height - 1;
    let bar = Rect {
        y,
        height: 1,
        ..area
    };
    buf.set_style(bar, Style::default().bg(app.theme.panel_bg));

    let left = match &app.status {
        Some(message) => Line::from(Span::styled(
            format!(" {}", message),
            Style::default()
                .fg(app.theme.accent_light)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            " ◉ CORE - the essence of everything",
            Style::default().fg(app.theme.dim),
        )),
    };
    buf.set_line(area.x, y, &left, area.width);

    let hints = "[t] terminal  [c] copy  [q] quit ";
    let hints_width = hints.width() as u16;
    if area.width > hints_width + left.width() as u16 {
        buf.set_line(
            area.x + area.width - hints_width,
            y,
            &Line::from(Span::styled(hints, Style::default().fg(app.theme.dim))),
            hints_width,
        );
    }
}
