//! The terminal panel: scrollback, prompt line, input editing, history
//! navigation, autocomplete, and the typewriter reveal for long output.

use crate::fx::typewriter::Typewriter;
use crate::services::time_source::SharedTimeSource;
use crate::services::timers::TimerRegistry;
use crate::term::command::CommandKind;
use crate::term::content;
use crate::term::interpreter::{
    autocomplete, dispatch, Completion, LineKind, OutputLine, UiAction,
};
use crate::term::session::Session;
use crate::view::theme::Theme;
use crossterm::event::{KeyCode, KeyModifiers};
use rand::rngs::StdRng;
use rand::Rng;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Widget};
use std::time::Duration;

/// Output lines longer than this reveal per-character.
const TYPEWRITER_THRESHOLD: usize = 50;

/// How the app should react to a key the widget consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetReaction {
    Consumed,
    /// Esc or the `exit` command: close the panel
    Close,
}

#[derive(Debug)]
struct ScrollLine {
    line: OutputLine,
    /// Present while the line is still typing itself out
    typewriter: Option<Typewriter>,
}

#[derive(Debug)]
pub struct TerminalWidget {
    session: Session,
    input: String,
    /// Char index of the edit cursor within `input`
    cursor: usize,
    lines: Vec<ScrollLine>,
    open: bool,
    prompt: String,
    typing_speed: Duration,
    /// Staged output (the hack script) scheduled against this registry;
    /// closing the panel tears it down.
    timers: TimerRegistry<OutputLine>,
    time: SharedTimeSource,
}

impl TerminalWidget {
    pub fn new(
        time: SharedTimeSource,
        prompt: String,
        history_limit: usize,
        typing_speed: Duration,
    ) -> Self {
        let session = Session::new(time.clone(), history_limit);
        let timers = TimerRegistry::new(time.clone());
        let mut widget = Self {
            session,
            input: String::new(),
            cursor: 0,
            lines: Vec::new(),
            open: false,
            prompt,
            typing_speed,
            timers,
            time,
        };
        widget.push_plain(content::WELCOME_MESSAGE);
        widget.push_plain("Type \"help\" to get started.");
        widget
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Close the panel and drop any staged output still pending.
    pub fn close(&mut self) {
        self.open = false;
        self.timers.teardown();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Append staged output that has come due.
    pub fn tick(&mut self) {
        for line in self.timers.due() {
            self.push_line(line, false);
        }
    }

    pub fn handle_key(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        rng: &mut StdRng,
    ) -> WidgetReaction {
        match code {
            KeyCode::Esc => return WidgetReaction::Close,
            KeyCode::Char('l') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.lines.clear();
            }
            KeyCode::Enter => {
                let input = std::mem::take(&mut self.input);
                self.cursor = 0;
                if let Some(UiAction::CloseTerminal) = self.submit(input.trim(), rng) {
                    return WidgetReaction::Close;
                }
            }
            KeyCode::Up => {
                if let Some(line) = self.session.history_prev().map(|s| s.to_string()) {
                    self.cursor = line.chars().count();
                    self.input = line;
                }
            }
            KeyCode::Down => {
                if let Some(line) = self.session.history_next().map(|s| s.to_string()) {
                    self.cursor = line.chars().count();
                    self.input = line;
                }
            }
            KeyCode::Tab => self.complete(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    let idx = byte_index(&self.input, self.cursor - 1);
                    self.input.remove(idx);
                    self.cursor -= 1;
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.input.chars().count());
            }
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.input.chars().count(),
            KeyCode::Char(c)
                if !modifiers.contains(KeyModifiers::CONTROL)
                    && !modifiers.contains(KeyModifiers::ALT) =>
            {
                let idx = byte_index(&self.input, self.cursor);
                self.input.insert(idx, c);
                self.cursor += 1;
            }
            _ => {}
        }
        WidgetReaction::Consumed
    }

    /// Bracketed paste straight into the input line.
    pub fn insert_text(&mut self, text: &str) {
        for c in text.chars().filter(|c| !c.is_control()) {
            let idx = byte_index(&self.input, self.cursor);
            self.input.insert(idx, c);
            self.cursor += 1;
        }
    }

    /// Submit one line: echo it, dispatch, render output, schedule staged
    /// lines. Returns the UI action, if any.
    pub fn submit(&mut self, input: &str, rng: &mut StdRng) -> Option<UiAction> {
        self.session.record(input);
        self.push_line(
            OutputLine {
                text: format!("{} {}", self.prompt, input),
                kind: LineKind::Command,
            },
            false,
        );

        let output = dispatch(&mut self.session, input, rng);
        for line in output.lines {
            let garbled = self.garble(line, rng);
            self.push_line(garbled, true);
        }
        for staged in output.staged {
            self.timers.schedule(staged.delay, staged.line);
        }

        match output.action {
            Some(UiAction::ClearScreen) => {
                self.lines.clear();
                None
            }
            other => other,
        }
    }

    fn complete(&mut self) {
        match autocomplete(&self.session, &self.input) {
            Completion::Single(name) => {
                self.cursor = name.chars().count();
                self.input = name;
            }
            Completion::Multiple(names) => {
                self.push_plain(&format!("Available: {}", names.join(", ")));
            }
            Completion::None => {}
        }
    }

    /// In matrix mode roughly a third of output lines degrade into bit noise.
    fn garble(&self, line: OutputLine, rng: &mut StdRng) -> OutputLine {
        if line.kind != LineKind::Output
            || !self.session.matrix_mode()
            || rng.gen_range(0.0..1.0) >= 0.3
        {
            return line;
        }
        let text = line
            .text
            .chars()
            .map(|c| {
                if rng.gen_bool(0.5) {
                    if rng.gen_bool(0.5) {
                        '1'
                    } else {
                        '0'
                    }
                } else {
                    c
                }
            })
            .collect();
        OutputLine {
            text,
            kind: line.kind,
        }
    }

    fn push_plain(&mut self, text: &str) {
        self.push_line(OutputLine::output(text), false);
    }

    fn push_line(&mut self, line: OutputLine, animate: bool) {
        let typewriter = if animate && line.text.chars().count() > TYPEWRITER_THRESHOLD {
            Some(Typewriter::new(
                self.time.now(),
                line.text.chars().count(),
                self.typing_speed,
            ))
        } else {
            None
        };
        self.lines.push(ScrollLine { line, typewriter });
    }

    /// Konami sequence typed anywhere in the app lands here.
    pub fn unlock_easter_eggs(&mut self) {
        self.session
            .unlock_many(&[CommandKind::Easter, CommandKind::Konami]);
    }

    /// Visible scrollback text, typewriter applied (used by render and tests).
    pub fn visible_lines(&self) -> Vec<(String, LineKind)> {
        let now = self.time.now();
        self.lines
            .iter()
            .map(|sl| {
                let text = match &sl.typewriter {
                    Some(tw) => sl.line.text.chars().take(tw.revealed(now)).collect(),
                    None => sl.line.text.clone(),
                };
                (text, sl.line.kind)
            })
            .collect()
    }

    pub fn has_pending_output(&self) -> bool {
        !self.timers.is_empty()
            || self
                .lines
                .iter()
                .any(|sl| match &sl.typewriter {
                    Some(tw) => !tw.done(self.time.now()),
                    None => false,
                })
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" CORE Terminal v2.1.0 ")
            .style(Style::default().bg(theme.panel_bg).fg(theme.fg))
            .border_style(Style::default().fg(theme.accent));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 2 {
            return;
        }

        let scroll_height = (inner.height - 1) as usize;
        let visible = self.visible_lines();
        let start = visible.len().saturating_sub(scroll_height);

        for (row, (text, kind)) in visible[start..].iter().enumerate() {
            let style = match kind {
                LineKind::Command => Style::default().fg(theme.accent_light),
                LineKind::Output => Style::default().fg(theme.fg),
                LineKind::Error => Style::default().fg(theme.error),
            };
            let line = Line::from(Span::styled(text.clone(), style));
            buf.set_line(inner.x, inner.y + row as u16, &line, inner.width);
        }

        // Prompt line with a block cursor at the edit position
        let prompt_y = inner.y + inner.height - 1;
        let before: String = self.input.chars().take(self.cursor).collect();
        let at: String = self
            .input
            .chars()
            .nth(self.cursor)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = self.input.chars().skip(self.cursor + 1).collect();

        let line = Line::from(vec![
            Span::styled(
                format!("{} ", self.prompt),
                Style::default().fg(theme.success),
            ),
            Span::styled(before, Style::default().fg(theme.fg)),
            Span::styled(at, Style::default().add_modifier(Modifier::REVERSED)),
            Span::styled(after, Style::default().fg(theme.fg)),
        ]);
        buf.set_line(inner.x, prompt_y, &line, inner.width);
    }
}

fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}
