//! Per-visit shell session state.
//!
//! Explicitly constructed and owned by the hosting widget; reset means
//! dropping it and building a new one.

use crate::services::time_source::SharedTimeSource;
use crate::term::command::{AccessLevel, CommandKind};
use std::collections::{HashSet, VecDeque};
use std::time::Instant;

/// User tier for the current session. Only ever escalates, via `sudo access`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserLevel {
    Guest,
    Admin,
}

impl UserLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserLevel::Guest => "guest",
            UserLevel::Admin => "admin",
        }
    }
}

#[derive(Debug)]
pub struct Session {
    history: VecDeque<String>,
    history_limit: usize,
    /// Cursor into `history` for arrow-key navigation; `history.len()` means
    /// "past the newest entry" (empty input line).
    history_cursor: usize,
    unlocked: HashSet<CommandKind>,
    level: UserLevel,
    command_count: u64,
    started: Instant,
    matrix_mode: bool,
    time: SharedTimeSource,
}

impl Session {
    pub fn new(time: SharedTimeSource, history_limit: usize) -> Self {
        let started = time.now();
        let unlocked = [
            CommandKind::Help,
            CommandKind::About,
            CommandKind::Clear,
            CommandKind::Whoami,
        ]
        .into_iter()
        .collect();

        Self {
            history: VecDeque::new(),
            history_limit,
            history_cursor: 0,
            unlocked,
            level: UserLevel::Guest,
            command_count: 0,
            started,
            matrix_mode: false,
            time,
        }
    }

    /// Record a submitted line, dropping the oldest entry past the cap, and
    /// park the history cursor past the newest entry.
    pub fn record(&mut self, line: &str) {
        if line.trim().is_empty() {
            return;
        }
        self.history.push_back(line.to_string());
        while self.history.len() > self.history_limit {
            self.history.pop_front();
        }
        self.history_cursor = self.history.len();
        self.command_count += 1;
    }

    /// ArrowUp: step back through history. Returns the line to place in the
    /// input, or None when already at the oldest entry.
    pub fn history_prev(&mut self) -> Option<&str> {
        if self.history_cursor == 0 {
            return None;
        }
        self.history_cursor -= 1;
        self.history.get(self.history_cursor).map(|s| s.as_str())
    }

    /// ArrowDown: step forward. Returns Some("") past the newest entry to
    /// restore an empty input.
    pub fn history_next(&mut self) -> Option<&str> {
        if self.history_cursor >= self.history.len() {
            return None;
        }
        self.history_cursor += 1;
        match self.history.get(self.history_cursor) {
            Some(line) => Some(line.as_str()),
            None => Some(""),
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_iter(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(|s| s.as_str())
    }

    pub fn unlock(&mut self, cmd: CommandKind) {
        self.unlocked.insert(cmd);
    }

    pub fn unlock_many(&mut self, cmds: &[CommandKind]) {
        for cmd in cmds {
            self.unlocked.insert(*cmd);
        }
    }

    pub fn is_unlocked(&self, cmd: CommandKind) -> bool {
        self.unlocked.contains(&cmd)
    }

    /// A command is available if it is guest-tier or has been unlocked.
    pub fn is_available(&self, cmd: CommandKind) -> bool {
        cmd.level() == AccessLevel::Guest || self.unlocked.contains(&cmd)
    }

    /// Commands visible to `help` and autocomplete, in registry order.
    pub fn available_commands(&self) -> Vec<CommandKind> {
        CommandKind::ALL
            .into_iter()
            .filter(|c| self.is_available(*c))
            .collect()
    }

    pub fn level(&self) -> UserLevel {
        self.level
    }

    pub fn is_admin(&self) -> bool {
        self.level == UserLevel::Admin
    }

    /// Escalate to admin. Returns false if already elevated.
    pub fn elevate(&mut self) -> bool {
        if self.level == UserLevel::Admin {
            return false;
        }
        self.level = UserLevel::Admin;
        true
    }

    pub fn command_count(&self) -> u64 {
        self.command_count
    }

    pub fn matrix_mode(&self) -> bool {
        self.matrix_mode
    }

    pub fn toggle_matrix_mode(&mut self) -> bool {
        self.matrix_mode = !self.matrix_mode;
        self.matrix_mode
    }

    /// Session uptime as "Xh Ym".
    pub fn uptime_string(&self) -> String {
        let elapsed = self.time.elapsed_since(self.started);
        let hours = elapsed.as_secs() / 3600;
        let minutes = (elapsed.as_secs() % 3600) / 60;
        format!("{}h {}m", hours, minutes)
    }

    pub fn started_date(&self) -> String {
        self.time.today_date_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::time_source::TestTimeSource;
    use std::time::Duration;

    fn session() -> Session {
        Session::new(TestTimeSource::shared(), 100)
    }

    #[test]
    fn test_history_is_bounded_dropping_oldest() {
        let mut s = session();
        for i in 0..150 {
            s.record(&format!("cmd-{}", i));
        }
        assert_eq!(s.history_len(), 100);
        let entries: Vec<&str> = s.history_iter().collect();
        assert_eq!(entries[0], "cmd-50");
        assert_eq!(entries[99], "cmd-149");
    }

    #[test]
    fn test_blank_lines_are_not_recorded() {
        let mut s = session();
        s.record("   ");
        s.record("");
        assert_eq!(s.history_len(), 0);
        assert_eq!(s.command_count(), 0);
    }

    #[test]
    fn test_history_navigation() {
        let mut s = session();
        s.record("first");
        s.record("second");

        assert_eq!(s.history_prev(), Some("second"));
        assert_eq!(s.history_prev(), Some("first"));
        // At the oldest entry, further Up is a no-op
        assert_eq!(s.history_prev(), None);

        assert_eq!(s.history_next(), Some("second"));
        // Stepping past the newest entry restores an empty input
        assert_eq!(s.history_next(), Some(""));
        assert_eq!(s.history_next(), None);
    }

    #[test]
    fn test_navigation_resets_after_submit() {
        let mut s = session();
        s.record("first");
        s.record("second");
        assert_eq!(s.history_prev(), Some("second"));

        s.record("third");
        assert_eq!(s.history_prev(), Some("third"));
    }

    #[test]
    fn test_default_unlocked_set() {
        let s = session();
        assert!(s.is_available(CommandKind::Help));
        assert!(s.is_available(CommandKind::Status)); // guest tier
        assert!(!s.is_available(CommandKind::Matrix));
        assert!(!s.is_available(CommandKind::Easter));
    }

    #[test]
    fn test_elevation_unlocks_nothing_by_itself() {
        let mut s = session();
        assert!(s.elevate());
        assert!(!s.elevate());
        assert!(s.is_admin());
        // Unlock set is managed by the sudo handler, not by elevate()
        assert!(!s.is_available(CommandKind::Matrix));
    }

    #[test]
    fn test_uptime_string() {
        let time = TestTimeSource::shared();
        let s = Session::new(time.clone(), 100);
        time.advance(Duration::from_secs(3 * 3600 + 42 * 60));
        assert_eq!(s.uptime_string(), "3h 42m");
    }
}
