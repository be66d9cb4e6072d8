use anyhow::{Context, Result as AnyhowResult};
use clap::Parser;
use coreterm::app::App;
use coreterm::config::Config;
use coreterm::page::SectionId;
use coreterm::services::time_source::RealTimeSource;
use coreterm::services::tracing_setup;
use coreterm::services::terminal_modes::{self, TerminalModes};
use crossterm::event::{
    poll as event_poll, read as event_read, Event as CrosstermEvent, KeyEventKind,
    MouseEventKind,
};
use ratatui::Terminal;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// The CORE token experience, in your terminal
#[derive(Parser, Debug)]
#[command(name = "coreterm")]
#[command(about = "An interactive terminal experience for the CORE token", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file for diagnostics (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Skip the boot splash
    #[arg(long)]
    no_splash: bool,

    /// Override the render frame rate
    #[arg(long, value_name = "FPS")]
    fps: Option<u64>,

    /// Open at a section (home, philosophy, tokenomics, roadmap, community)
    #[arg(long, value_name = "SECTION")]
    section: Option<String>,

    /// Disable all animations
    #[arg(long)]
    reduced_motion: bool,

    /// Seed for star placement and randomized command output
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

struct SetupState {
    config: Config,
    terminal: Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
    terminal_size: (u16, u16),
    /// Terminal mode state (raw mode, alternate screen, mouse capture).
    /// Drop impl restores the terminal on cleanup
    terminal_modes: TerminalModes,
}

fn load_config(args: &Args) -> AnyhowResult<Config> {
    let mut config = if let Some(config_path) = &args.config {
        // An explicitly named config must load
        Config::load_from_file(config_path).map_err(|e| {
            anyhow::anyhow!(
                "Failed to load config from {}: {}",
                config_path.display(),
                e
            )
        })?
    } else {
        Config::load_default()
    };

    // CLI flags override config
    if args.no_splash {
        config.splash.enabled = false;
    }
    if args.reduced_motion {
        config.reduced_motion = true;
    }
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    Ok(config)
}

/// Frame budget for a target frame rate, clamped to something sane.
fn frame_duration(fps: u64) -> Duration {
    let fps = fps.clamp(1, 120);
    Duration::from_nanos(1_000_000_000 / fps)
}

fn initialize_app(args: &Args) -> AnyhowResult<SetupState> {
    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(tracing_setup::default_log_path);
    if !tracing_setup::init_global(&log_file) {
        eprintln!("Warning: could not open log file {}", log_file.display());
    }

    tracing::info!("coreterm starting");

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        terminal_modes::emergency_cleanup();
        original_hook(panic);
    }));

    let config = load_config(args)?;

    let terminal_modes = TerminalModes::enable()?;
    if !terminal_modes.mouse_capture_enabled() {
        tracing::warn!("no mouse capture; pointer effects stay dormant");
    }

    let backend = ratatui::backend::CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let size = terminal.size()?;
    tracing::info!("terminal size: {}x{}", size.width, size.height);

    Ok(SetupState {
        config,
        terminal,
        terminal_size: (size.width, size.height),
        terminal_modes,
    })
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    // Handle --dump-config early (no terminal setup needed)
    if args.dump_config {
        let config = load_config(&args)?;
        let json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize config")?;
        println!("{}", json);
        return Ok(());
    }

    let start_section = match &args.section {
        Some(anchor) => match SectionId::from_anchor(anchor) {
            Some(id) => Some(id),
            None => {
                eprintln!(
                    "Error: unknown section '{}'. Known: home, philosophy, tokenomics, roadmap, community",
                    anchor
                );
                anyhow::bail!("unknown section '{}'", anchor);
            }
        },
        None => None,
    };

    let SetupState {
        config,
        mut terminal,
        terminal_size,
        mut terminal_modes,
    } = initialize_app(&args).context("Failed to initialize application")?;

    let seed = args.seed.unwrap_or_else(|| std::process::id() as u64);
    let (width, height) = terminal_size;
    let mut app = App::new(config.clone(), width, height, seed, RealTimeSource::shared());

    if let Some(section) = start_section {
        app.open_at(section);
    }

    let result = run_event_loop(&mut app, &mut terminal, frame_duration(config.fps));

    terminal_modes.undo();
    result.context("Event loop returned an error")
}

fn run_event_loop(
    app: &mut App,
    terminal: &mut Terminal<ratatui::backend::CrosstermBackend<io::Stdout>>,
    frame_budget: Duration,
) -> AnyhowResult<()> {
    let mut last_render = Instant::now();
    let mut needs_render = true;
    let mut pending_event: Option<CrosstermEvent> = None;

    loop {
        if app.tick() {
            needs_render = true;
        }

        if app.should_quit() {
            break;
        }

        if needs_render && last_render.elapsed() >= frame_budget {
            terminal.draw(|frame| app.render(frame))?;
            last_render = Instant::now();
            needs_render = false;
        }

        let event = if let Some(e) = pending_event.take() {
            Some(e)
        } else {
            let timeout = if needs_render {
                frame_budget.saturating_sub(last_render.elapsed())
            } else {
                frame_budget
            };
            if event_poll(timeout)? {
                Some(event_read()?)
            } else {
                None
            }
        };

        let Some(event) = event else { continue };

        let (event, next) = coalesce_mouse_moves(event)?;
        pending_event = next;

        match event {
            CrosstermEvent::Key(key_event) => {
                if key_event.kind == KeyEventKind::Press {
                    tracing::trace!(
                        "key: code={:?}, modifiers={:?}",
                        key_event.code,
                        key_event.modifiers
                    );
                    app.handle_key(key_event.code, key_event.modifiers);
                    needs_render = true;
                }
            }
            CrosstermEvent::Mouse(mouse_event) => {
                app.handle_mouse(mouse_event);
                needs_render = true;
            }
            CrosstermEvent::Resize(w, h) => {
                app.resize(w, h);
                needs_render = true;
            }
            CrosstermEvent::Paste(text) => {
                app.handle_paste(&text);
                needs_render = true;
            }
            CrosstermEvent::FocusGained => app.set_focused(true),
            CrosstermEvent::FocusLost => app.set_focused(false),
            #[allow(unreachable_patterns)]
            _ => {}
        }
    }

    Ok(())
}

/// Skip stale mouse move events, return the latest one.
/// If we read a non-move event while draining, return it as pending.
fn coalesce_mouse_moves(
    event: CrosstermEvent,
) -> AnyhowResult<(CrosstermEvent, Option<CrosstermEvent>)> {
    if !matches!(&event, CrosstermEvent::Mouse(m) if m.kind == MouseEventKind::Moved) {
        return Ok((event, None));
    }

    let mut latest = event;
    while event_poll(Duration::ZERO)? {
        let next = event_read()?;
        if matches!(&next, CrosstermEvent::Mouse(m) if m.kind == MouseEventKind::Moved) {
            latest = next; // Newer move, skip the old one
        } else {
            return Ok((latest, Some(next))); // Hit a click/key, save it
        }
    }
    Ok((latest, None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_duration_for_common_rates() {
        assert_eq!(frame_duration(30), Duration::from_nanos(33_333_333));
        assert_eq!(frame_duration(60), Duration::from_nanos(16_666_666));
    }

    #[test]
    fn test_frame_duration_clamps_extremes() {
        assert_eq!(frame_duration(0), Duration::from_secs(1));
        assert_eq!(frame_duration(100_000), frame_duration(120));
    }
}
