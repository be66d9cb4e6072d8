//! The fixed command registry.
//!
//! Commands are a closed enum rather than a string-keyed handler table; the
//! lookup-by-name contract is preserved through [`CommandKind::from_name`].

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Access tier a command requires.
///
/// `Hidden` commands stay invisible and unexecutable until unlocked;
/// `Admin` commands require prior elevation via `sudo access`. Neither is a
/// security boundary - elevation is password-less and thematic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessLevel {
    Guest,
    Admin,
    Hidden,
}

impl AccessLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessLevel::Guest => "guest",
            AccessLevel::Admin => "admin",
            AccessLevel::Hidden => "hidden",
        }
    }
}

/// Every command the shell knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Help,
    About,
    Clear,
    Whoami,
    Status,
    Price,
    Sudo,
    Matrix,
    Hack,
    Scan,
    Encrypt,
    Decode,
    Fortune,
    Easter,
    Konami,
    Exit,
}

impl CommandKind {
    /// Registry order; also the order `help` lists commands in.
    pub const ALL: [CommandKind; 16] = [
        CommandKind::Help,
        CommandKind::About,
        CommandKind::Clear,
        CommandKind::Whoami,
        CommandKind::Status,
        CommandKind::Price,
        CommandKind::Sudo,
        CommandKind::Matrix,
        CommandKind::Hack,
        CommandKind::Scan,
        CommandKind::Encrypt,
        CommandKind::Decode,
        CommandKind::Fortune,
        CommandKind::Easter,
        CommandKind::Konami,
        CommandKind::Exit,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Help => "help",
            CommandKind::About => "about",
            CommandKind::Clear => "clear",
            CommandKind::Whoami => "whoami",
            CommandKind::Status => "status",
            CommandKind::Price => "price",
            CommandKind::Sudo => "sudo",
            CommandKind::Matrix => "matrix",
            CommandKind::Hack => "hack",
            CommandKind::Scan => "scan",
            CommandKind::Encrypt => "encrypt",
            CommandKind::Decode => "decode",
            CommandKind::Fortune => "fortune",
            CommandKind::Easter => "easter",
            CommandKind::Konami => "konami",
            CommandKind::Exit => "exit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CommandKind::Help => "Show available commands",
            CommandKind::About => "Learn about the CORE philosophy",
            CommandKind::Clear => "Clear terminal screen",
            CommandKind::Whoami => "Display current user information",
            CommandKind::Status => "Show system status",
            CommandKind::Price => "Show CORE token price information",
            CommandKind::Sudo => "Execute commands with elevated privileges",
            CommandKind::Matrix => "Enter the matrix",
            CommandKind::Hack => "Initiate hacking protocol",
            CommandKind::Scan => "Scan for vulnerabilities",
            CommandKind::Encrypt => "Encrypt data using CORE algorithm",
            CommandKind::Decode => "Decode CORE encrypted data",
            CommandKind::Fortune => "Get a random CORE fortune",
            CommandKind::Easter => "Hidden command - find the others!",
            CommandKind::Konami => "The legendary code",
            CommandKind::Exit => "Close terminal session",
        }
    }

    pub fn usage(&self) -> &'static str {
        match self {
            CommandKind::Help => "help [command]",
            CommandKind::About => "about [section]",
            CommandKind::Clear => "clear",
            CommandKind::Whoami => "whoami",
            CommandKind::Status => "status",
            CommandKind::Price => "price",
            CommandKind::Sudo => "sudo [command]",
            CommandKind::Matrix => "matrix",
            CommandKind::Hack => "hack [target]",
            CommandKind::Scan => "scan [target]",
            CommandKind::Encrypt => "encrypt [data]",
            CommandKind::Decode => "decode [encrypted_data]",
            CommandKind::Fortune => "fortune",
            CommandKind::Easter => "easter",
            CommandKind::Konami => "konami",
            CommandKind::Exit => "exit",
        }
    }

    pub fn level(&self) -> AccessLevel {
        match self {
            CommandKind::Help
            | CommandKind::About
            | CommandKind::Clear
            | CommandKind::Whoami
            | CommandKind::Status
            | CommandKind::Price
            | CommandKind::Sudo
            | CommandKind::Fortune
            | CommandKind::Exit => AccessLevel::Guest,
            CommandKind::Matrix
            | CommandKind::Hack
            | CommandKind::Scan
            | CommandKind::Encrypt
            | CommandKind::Decode => AccessLevel::Admin,
            CommandKind::Easter | CommandKind::Konami => AccessLevel::Hidden,
        }
    }

    /// Look up a command by its (already lowercased) name.
    pub fn from_name(name: &str) -> Option<CommandKind> {
        static BY_NAME: Lazy<HashMap<&'static str, CommandKind>> = Lazy::new(|| {
            CommandKind::ALL.iter().map(|c| (c.name(), *c)).collect()
        });
        BY_NAME.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_name_round_trips() {
        for cmd in CommandKind::ALL {
            assert_eq!(CommandKind::from_name(cmd.name()), Some(cmd));
        }
        assert_eq!(CommandKind::from_name("frobnicate"), None);
        // Lookup expects pre-lowercased input
        assert_eq!(CommandKind::from_name("HELP"), None);
    }

    #[test]
    fn test_levels_match_registry() {
        assert_eq!(CommandKind::Help.level(), AccessLevel::Guest);
        assert_eq!(CommandKind::Matrix.level(), AccessLevel::Admin);
        assert_eq!(CommandKind::Konami.level(), AccessLevel::Hidden);
    }
}
