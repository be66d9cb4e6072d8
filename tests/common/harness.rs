//! Test harness driving the full app against a ratatui TestBackend with a
//! controllable clock.

use coreterm::app::App;
use coreterm::config::Config;
use coreterm::events::AppEvent;
use coreterm::services::time_source::TestTimeSource;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use std::sync::Arc;
use std::time::Duration;

pub struct AppTestHarness {
    pub app: App,
    pub time: Arc<TestTimeSource>,
    terminal: Terminal<TestBackend>,
}

impl AppTestHarness {
    /// Default harness: splash off, deterministic seed, instant typewriter.
    pub fn new(width: u16, height: u16) -> anyhow::Result<Self> {
        let mut config = Config::default();
        config.splash.enabled = false;
        config.terminal.typing_speed_ms = 0;
        Self::with_config(config, width, height)
    }

    /// Harness with the splash left on.
    pub fn with_splash(width: u16, height: u16) -> anyhow::Result<Self> {
        let mut config = Config::default();
        config.terminal.typing_speed_ms = 0;
        Self::with_config(config, width, height)
    }

    pub fn with_config(config: Config, width: u16, height: u16) -> anyhow::Result<Self> {
        let time = TestTimeSource::shared();
        let mut app = App::new(config, width, height, 42, time.clone());
        app.set_clipboard_internal_only(true);
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let mut harness = Self {
            app,
            time,
            terminal,
        };
        harness.app.tick();
        Ok(harness)
    }

    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> anyhow::Result<()> {
        self.app.handle_key(code, modifiers);
        self.step();
        Ok(())
    }

    pub fn type_text(&mut self, text: &str) -> anyhow::Result<()> {
        for c in text.chars() {
            self.send_key(KeyCode::Char(c), KeyModifiers::NONE)?;
        }
        Ok(())
    }

    pub fn click(&mut self, column: u16, row: u16) {
        self.app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
        self.app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
        self.step();
    }

    pub fn move_pointer(&mut self, column: u16, row: u16) {
        self.app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
        self.step();
    }

    /// One 16 ms frame: advance the clock and tick.
    fn step(&mut self) {
        self.time.advance(Duration::from_millis(16));
        self.app.tick();
    }

    /// Advance logical time in frame-sized steps, ticking as the event loop
    /// would.
    pub fn advance(&mut self, duration: Duration) {
        let mut remaining = duration;
        let frame = Duration::from_millis(16);
        while remaining > Duration::ZERO {
            let step = remaining.min(frame);
            self.time.advance(step);
            self.app.tick();
            remaining -= step;
        }
    }

    pub fn render(&mut self) -> anyhow::Result<()> {
        self.terminal.draw(|frame| self.app.render(frame))?;
        Ok(())
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    pub fn screen_to_string(&self) -> String {
        let buffer = self.buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| {
                        buffer
                            .cell((x, y))
                            .map(|c| c.symbol())
                            .unwrap_or(" ")
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn assert_screen_contains(&mut self, needle: &str) {
        self.render().unwrap();
        let screen = self.screen_to_string();
        assert!(
            screen.contains(needle),
            "expected screen to contain {:?}\n--- screen ---\n{}",
            needle,
            screen
        );
    }

    pub fn assert_screen_not_contains(&mut self, needle: &str) {
        self.render().unwrap();
        let screen = self.screen_to_string();
        assert!(
            !screen.contains(needle),
            "expected screen to NOT contain {:?}\n--- screen ---\n{}",
            needle,
            screen
        );
    }

    /// Events the app has processed since the last call.
    pub fn events(&mut self) -> Vec<AppEvent> {
        self.app.take_events()
    }
}
