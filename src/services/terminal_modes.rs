//! Terminal mode management: raw mode, alternate screen, mouse capture,
//! focus-change reporting, and cleanup on exit or panic.

use anyhow::Result;
use crossterm::cursor::Show;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use std::io::{stdout, Write};

/// Tracks which terminal modes have been enabled and provides cleanup.
///
/// Use `TerminalModes::enable()` to set up the terminal, then call `undo()`
/// to restore the original state (e.g., on exit or panic).
#[derive(Debug, Default)]
pub struct TerminalModes {
    raw_mode: bool,
    alternate_screen: bool,
    mouse_capture: bool,
    focus_change: bool,
}

impl TerminalModes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable all terminal modes, checking support for each.
    ///
    /// Raw mode and the alternate screen are required; mouse capture and
    /// focus-change reporting degrade silently (the pointer-driven effects
    /// stay dormant without them).
    pub fn enable() -> Result<Self> {
        let mut modes = Self::new();

        if let Err(e) = enable_raw_mode() {
            tracing::error!("Failed to enable raw mode: {}", e);
            return Err(e.into());
        }
        modes.raw_mode = true;

        if let Err(e) = stdout().execute(EnterAlternateScreen) {
            tracing::error!("Failed to enter alternate screen: {}", e);
            modes.undo();
            return Err(e.into());
        }
        modes.alternate_screen = true;

        if let Err(e) = stdout().execute(EnableMouseCapture) {
            tracing::warn!("Failed to enable mouse capture: {}", e);
        } else {
            modes.mouse_capture = true;
        }

        if let Err(e) = stdout().execute(EnableFocusChange) {
            tracing::warn!("Failed to enable focus-change reporting: {}", e);
        } else {
            modes.focus_change = true;
        }

        Ok(modes)
    }

    /// Restore terminal to original state by disabling all enabled modes.
    ///
    /// Safe to call multiple times - it tracks what was enabled and only
    /// disables those modes.
    pub fn undo(&mut self) {
        if self.mouse_capture {
            let _ = stdout().execute(DisableMouseCapture);
            self.mouse_capture = false;
        }

        if self.focus_change {
            let _ = stdout().execute(DisableFocusChange);
            self.focus_change = false;
        }

        let _ = stdout().execute(Show);

        // Raw mode goes before the alternate screen for cleaner output
        if self.raw_mode {
            let _ = disable_raw_mode();
            self.raw_mode = false;
        }

        if self.alternate_screen {
            let _ = stdout().execute(LeaveAlternateScreen);
            self.alternate_screen = false;
        }

        let _ = stdout().flush();
    }

    pub fn mouse_capture_enabled(&self) -> bool {
        self.mouse_capture
    }
}

impl Drop for TerminalModes {
    fn drop(&mut self) {
        self.undo();
    }
}

/// Unconditionally restore terminal state without tracking.
///
/// Intended for panic hooks where the `TerminalModes` instance is out of
/// reach. Attempts every mode regardless of whether it was enabled.
pub fn emergency_cleanup() {
    let _ = stdout().execute(DisableMouseCapture);
    let _ = stdout().execute(DisableFocusChange);
    let _ = stdout().execute(Show);
    let _ = disable_raw_mode();
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = stdout().flush();
}
