//! Clipboard module for the contract-address copy action.
//!
//! Tries multiple methods to maximize compatibility, falling back down the
//! chain the way the original fell back from the async clipboard API to a
//! hidden-textarea copy:
//! 1. OSC 52 escape sequence (Konsole, Kitty, Alacritty, Wezterm, xterm, iTerm2)
//! 2. arboard (X11/Wayland APIs for terminals without OSC 52 support)
//! 3. An internal string that the rest of the app can still read

use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;
use std::io::{stdout, Write};
use std::sync::Mutex;

/// Global clipboard holder to maintain X11 clipboard ownership for the
/// application lifetime. On X11, the clipboard owner must stay alive to
/// respond to paste requests from other apps.
static SYSTEM_CLIPBOARD: Mutex<Option<arboard::Clipboard>> = Mutex::new(None);

/// Clipboard manager that handles both internal and system clipboard
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    /// Internal clipboard content (always available)
    internal: String,
    /// When true, copy() skips the system clipboard entirely (for testing)
    internal_only: bool,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable internal-only mode (for testing).
    pub fn set_internal_only(&mut self, enabled: bool) {
        self.internal_only = enabled;
    }

    /// Copy text to the internal clipboard and, where possible, the system
    /// clipboard. Returns true if a system-clipboard path reported success.
    pub fn copy(&mut self, text: &str) -> bool {
        self.internal = text.to_string();

        if self.internal_only {
            return true;
        }

        // OSC 52 doesn't fail detectably - the terminal may or may not
        // handle the escape sequence
        let osc52_result = execute!(stdout(), CopyToClipboard::to_clipboard_from(text));
        if let Err(e) = &osc52_result {
            tracing::debug!("OSC 52 clipboard copy failed: {}", e);
        }
        let _ = stdout().flush();

        let mut system_ok = osc52_result.is_ok();

        if let Ok(mut guard) = SYSTEM_CLIPBOARD.lock() {
            if guard.is_none() {
                match arboard::Clipboard::new() {
                    Ok(cb) => *guard = Some(cb),
                    Err(e) => {
                        tracing::debug!("arboard clipboard init failed: {}", e);
                    }
                }
            }

            if let Some(clipboard) = guard.as_mut() {
                match clipboard.set_text(text) {
                    Ok(()) => system_ok = true,
                    Err(e) => {
                        tracing::debug!("arboard copy failed: {}", e);
                    }
                }
            }
        }

        system_ok
    }

    /// The last copied text, regardless of whether the system clipboard
    /// accepted it.
    pub fn contents(&self) -> &str {
        &self.internal
    }
}
