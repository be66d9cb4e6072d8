//! The application: owns every subsystem, routes input, and drives the
//! per-frame tick. Built explicitly at startup and dropped on exit; no
//! ambient globals.

pub mod input;

use crate::config::Config;
use crate::events::{AppEvent, EventBus};
use crate::fx::cursor::CursorTrail;
use crate::fx::stars::{Starfield, StarfieldConfig};
use crate::page::{nav::NavHit, Page, SectionId};
use crate::services::clipboard::Clipboard;
use crate::services::time_source::SharedTimeSource;
use crate::services::timers::TimerRegistry;
use crate::splash::{BannerMedia, Splash};
use crate::term::content::CONTRACT_ADDRESS;
use crate::term::widget::{TerminalWidget, WidgetReaction};
use crate::view;
use crate::view::theme::Theme;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use input::KonamiDetector;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::Frame;
use std::time::{Duration, Instant};

/// Rows reserved for the status bar.
const STATUS_BAR_HEIGHT: u16 = 1;
/// How long a status message stays up.
const STATUS_TTL: Duration = Duration::from_secs(3);

pub struct App {
    config: Config,
    pub(crate) theme: Theme,
    time: SharedTimeSource,
    rng: StdRng,
    bus: EventBus,
    pub page: Page,
    pub terminal: TerminalWidget,
    pub splash: Option<Splash>,
    pub stars: Starfield,
    pub cursor: CursorTrail,
    clipboard: Clipboard,
    konami: KonamiDetector,
    pub(crate) status: Option<String>,
    status_timers: TimerRegistry<()>,
    pub(crate) width: u16,
    pub(crate) height: u16,
    last_tick: Instant,
    should_quit: bool,
    /// Everything drained off the bus, kept for observers (tests, logging)
    events_log: Vec<AppEvent>,
}

impl App {
    pub fn new(
        config: Config,
        width: u16,
        height: u16,
        seed: u64,
        time: SharedTimeSource,
    ) -> Self {
        let theme = Theme::named(&config.theme);
        let mut rng = StdRng::seed_from_u64(seed);
        let animations = !config.reduced_motion;

        let mut page = Page::new(animations);

        let stars_config = StarfieldConfig {
            star_count: config.effects.star_count,
            star_speed: config.effects.star_speed,
            pointer_influence: config.effects.pointer_influence,
            connection_distance: config.effects.connection_distance,
            ..StarfieldConfig::default()
        };
        let stars = Starfield::new(stars_config, width, height, &mut rng);

        let terminal = TerminalWidget::new(
            time.clone(),
            config.terminal.prompt.clone(),
            config.terminal.history_limit,
            Duration::from_millis(config.terminal.typing_speed_ms),
        );

        let now = time.now();
        let mut bus = EventBus::new();
        let splash = if config.splash.enabled {
            Some(Splash::new(
                time.clone(),
                Box::new(BannerMedia::new(now)),
                Duration::from_millis(config.splash.timeout_ms),
                Duration::from_millis(config.splash.auto_enter_ms),
            ))
        } else {
            // Straight to the page; the load event still fires
            bus.emit(AppEvent::CoreLoaded);
            page.counters.start(now);
            None
        };

        let status_timers = TimerRegistry::new(time.clone());
        let mut app = Self {
            theme,
            time,
            rng,
            bus,
            page,
            terminal,
            splash,
            stars,
            cursor: CursorTrail::new(animations),
            clipboard: Clipboard::new(),
            konami: KonamiDetector::new(),
            status: None,
            status_timers,
            width,
            height,
            last_tick: now,
            should_quit: false,
            events_log: Vec::new(),
            config,
        };
        app.relayout();
        app
    }

    pub(crate) fn now(&self) -> Instant {
        self.time.now()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Rows of the content viewport (frame minus nav and status bars).
    pub(crate) fn content_height(&self) -> u16 {
        self.height
            .saturating_sub(self.page.nav.height(self.width) + STATUS_BAR_HEIGHT)
    }

    fn relayout(&mut self) {
        self.page.layout(self.content_height());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.relayout();
        self.stars.resize(width, height, &mut self.rng);
        tracing::debug!("resized to {}x{}", width, height);
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Jump straight to a section (the `--section` flag). No animation.
    pub fn open_at(&mut self, id: SectionId) {
        if let Some(span) = self.page.span_of(id) {
            let offset = self.page.scroll.offset();
            self.page.scroll.scroll_by(span.top as f32 - offset);
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.status_timers.teardown();
        self.status_timers.schedule(STATUS_TTL, ());
    }

    /// Events drained since the last call. The bus itself is internal; this
    /// is the observer surface.
    pub fn take_events(&mut self) -> Vec<AppEvent> {
        std::mem::take(&mut self.events_log)
    }

    pub fn set_clipboard_internal_only(&mut self, enabled: bool) {
        self.clipboard.set_internal_only(enabled);
    }

    pub fn clipboard_contents(&self) -> &str {
        self.clipboard.contents()
    }

    // ------------------------------------------------------------------
    // Tick

    /// Advance all subsystems. Returns true while animations want frames.
    pub fn tick(&mut self) -> bool {
        let now = self.time.now();
        let dt = now
            .saturating_duration_since(self.last_tick)
            .as_secs_f32()
            .min(0.25);
        self.last_tick = now;

        let mut animating = false;

        if let Some(splash) = &mut self.splash {
            splash.tick();
            if splash.is_entered() {
                self.enter_core(now);
            }
            animating = true;
        } else {
            animating |= self.page.tick(now, &mut self.bus);
            self.update_stars_visibility();
            self.terminal.tick();
            animating |= self.terminal.has_pending_output();
        }

        self.stars.update(dt);
        self.cursor.update(dt);
        animating |= self.stars.is_visible() && !self.stars.is_paused();

        if !self.status_timers.due().is_empty() {
            self.status = None;
        }

        self.events_log.extend(self.bus.drain());
        animating
    }

    fn enter_core(&mut self, now: Instant) {
        self.splash = None;
        self.bus.emit(AppEvent::CoreLoaded);
        self.page.counters.start(now);
        tracing::info!("core loaded");
    }

    /// The field shows only across the philosophy-to-footer span, and never
    /// under the splash.
    fn update_stars_visibility(&mut self) {
        let (window_top, window_bottom) = self.page.stars_window();
        let view_top = self.page.scroll.offset();
        let view_bottom = view_top + self.content_height() as f32;
        let visible = !self.config.reduced_motion
            && self.splash.is_none()
            && view_bottom > window_top
            && view_top < window_bottom;
        self.stars.set_visible(visible);
    }

    /// Terminal focus-change reporting maps to pause/resume, like the page
    /// visibility API did.
    pub fn set_focused(&mut self, focused: bool) {
        if focused {
            self.stars.resume();
        } else {
            self.stars.pause();
        }
    }

    // ------------------------------------------------------------------
    // Input

    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return;
        }

        if let Some(splash) = &mut self.splash {
            match code {
                KeyCode::Enter | KeyCode::Char(' ') => splash.enter(),
                KeyCode::Char('q') => self.quit(),
                _ => {}
            }
            return;
        }

        if self.terminal.is_open() {
            if self.terminal.handle_key(code, modifiers, &mut self.rng)
                == WidgetReaction::Close
            {
                self.terminal.close();
            }
            return;
        }

        if self.konami.feed(code) {
            self.terminal.unlock_easter_eggs();
            self.set_status("🎮 KONAMI! Hidden commands unlocked - open the terminal");
        }

        let now = self.time.now();
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.quit(),
            KeyCode::Char('t') | KeyCode::Char('T') => self.terminal.open(),
            KeyCode::Char('c') | KeyCode::Char('C') => self.copy_contract(),
            KeyCode::Char('m') | KeyCode::Char('M') => self.page.nav.toggle_menu(),
            KeyCode::PageDown => self.page.next_section(now),
            KeyCode::PageUp => self.page.prev_section(now),
            KeyCode::Down => self.page.scroll.scroll_by(2.0),
            KeyCode::Up => self.page.scroll.scroll_by(-2.0),
            KeyCode::Home => self.page.jump_to(SectionId::Hero, now),
            KeyCode::End => self.page.jump_to(SectionId::Community, now),
            KeyCode::Char(c @ '1'..='5') => {
                let index = (c as u8 - b'1') as usize;
                self.page.jump_to(SectionId::ALL[index], now);
            }
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        match event.kind {
            MouseEventKind::Moved => {
                self.cursor.pointer_moved(event.column, event.row);
                self.stars
                    .set_pointer(Some((event.column as f32, event.row as f32)));
                let over_nav =
                    self.splash.is_none() && event.row < self.page.nav.height(self.width);
                self.cursor.set_hovering(over_nav);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.cursor.set_pressed(true);
                self.handle_click(event.column, event.row);
            }
            MouseEventKind::Up(MouseButton::Left) => self.cursor.set_pressed(false),
            MouseEventKind::ScrollDown => {
                if self.splash.is_none() {
                    self.page.scroll.scroll_by(3.0);
                }
            }
            MouseEventKind::ScrollUp => {
                if self.splash.is_none() {
                    self.page.scroll.scroll_by(-3.0);
                }
            }
            _ => {}
        }
    }

    fn handle_click(&mut self, column: u16, row: u16) {
        if let Some(splash) = &mut self.splash {
            splash.enter();
            return;
        }

        let nav_height = self.page.nav.height(self.width);
        if row < nav_height {
            match self.page.nav.hit_test(column, row, self.width) {
                Some(NavHit::Toggle) => self.page.nav.toggle_menu(),
                Some(NavHit::Section(id)) => {
                    let now = self.time.now();
                    self.page.jump_to(id, now);
                }
                None => {}
            }
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if self.terminal.is_open() {
            self.terminal.insert_text(text);
        }
    }

    fn copy_contract(&mut self) {
        if self.clipboard.copy(CONTRACT_ADDRESS) {
            self.set_status("Contract address copied to clipboard");
        } else {
            self.set_status("Clipboard unavailable - contract shown in the hero");
        }
    }

    // ------------------------------------------------------------------
    // Rendering

    pub fn render(&self, frame: &mut Frame) {
        view::render(self, frame);
    }
}
