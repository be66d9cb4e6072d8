//! Command parsing and dispatch.
//!
//! A line of input is split on whitespace; the first token (lowercased) names
//! the command, the rest are positional arguments. Handler failures never
//! escape: they are rendered as an error line and the session continues.

use crate::term::command::{AccessLevel, CommandKind};
use crate::term::content;
use crate::term::distance::edit_distance;
use crate::term::session::Session;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

/// Visual class of a scrollback line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Echo of the submitted prompt line
    Command,
    Output,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub text: String,
    pub kind: LineKind,
}

impl OutputLine {
    pub fn output(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: LineKind::Output,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: LineKind::Error,
        }
    }
}

/// A line that appears after a delay (the hack script).
#[derive(Debug, Clone)]
pub struct StagedLine {
    pub delay: Duration,
    pub line: OutputLine,
}

/// Side effects a command asks the hosting widget to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ClearScreen,
    CloseTerminal,
}

/// Everything a dispatched command produced.
#[derive(Debug, Default)]
pub struct CommandOutput {
    pub lines: Vec<OutputLine>,
    pub staged: Vec<StagedLine>,
    pub action: Option<UiAction>,
}

impl CommandOutput {
    fn from_lines(lines: Vec<OutputLine>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    fn from_texts(texts: &[&str]) -> Self {
        Self::from_lines(texts.iter().map(|t| OutputLine::output(*t)).collect())
    }
}

/// Result of Tab-completion against the available command set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    None,
    /// Unique match: replace the input with this
    Single(String),
    /// Several candidates: list them
    Multiple(Vec<String>),
}

/// Interval between staged hack lines.
const HACK_STEP: Duration = Duration::from_millis(500);

/// Dispatch one submitted line. The echo line is the caller's business; this
/// returns only what the command printed.
pub fn dispatch(session: &mut Session, input: &str, rng: &mut StdRng) -> CommandOutput {
    let mut parts = input.split_whitespace();
    let Some(first) = parts.next() else {
        return CommandOutput::default();
    };
    let name = first.to_lowercase();
    let args: Vec<&str> = parts.collect();

    let Some(cmd) = CommandKind::from_name(&name) else {
        return unknown_command(session, &name);
    };

    // Hidden commands pretend not to exist until unlocked
    if cmd.level() == AccessLevel::Hidden && !session.is_unlocked(cmd) {
        return CommandOutput::from_lines(vec![OutputLine::error(
            "Command not found. Type \"help\" for available commands.",
        )]);
    }

    if cmd.level() == AccessLevel::Admin && !session.is_admin() {
        return CommandOutput::from_lines(vec![OutputLine::error(
            "Permission denied. Try \"sudo access\" first.",
        )]);
    }

    match execute(session, cmd, &args, rng) {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!("command {} failed: {}", cmd.name(), e);
            CommandOutput::from_lines(vec![OutputLine::error(format!(
                "Error executing command: {}",
                e
            ))])
        }
    }
}

fn unknown_command(session: &Session, name: &str) -> CommandOutput {
    let line = match suggest(session, name) {
        Some(suggestion) => format!(
            "Command '{}' not found. Did you mean '{}'?",
            name, suggestion
        ),
        None => format!(
            "Command '{}' not found. Type 'help' for available commands.",
            name
        ),
    };
    CommandOutput::from_lines(vec![OutputLine::error(line)])
}

/// Nearest available command within edit distance 2 and length difference 2.
pub fn suggest(session: &Session, input: &str) -> Option<&'static str> {
    session
        .available_commands()
        .into_iter()
        .map(|c| c.name())
        .find(|candidate| {
            edit_distance(input, candidate) <= 2
                && input.len().abs_diff(candidate.len()) <= 2
        })
}

/// Prefix-match `current` against the available command names.
pub fn autocomplete(session: &Session, current: &str) -> Completion {
    let current = current.to_lowercase();
    let matches: Vec<String> = session
        .available_commands()
        .into_iter()
        .map(|c| c.name().to_string())
        .filter(|name| name.starts_with(&current))
        .collect();

    match matches.len() {
        0 => Completion::None,
        1 => Completion::Single(matches.into_iter().next().unwrap_or_default()),
        _ => Completion::Multiple(matches),
    }
}

fn execute(
    session: &mut Session,
    cmd: CommandKind,
    args: &[&str],
    rng: &mut StdRng,
) -> anyhow::Result<CommandOutput> {
    let output = match cmd {
        CommandKind::Help => help(session, args),
        CommandKind::About => about(args),
        CommandKind::Clear => CommandOutput {
            action: Some(UiAction::ClearScreen),
            ..CommandOutput::default()
        },
        CommandKind::Whoami => whoami(session),
        CommandKind::Status => {
            session.unlock(CommandKind::Status);
            status(rng)
        }
        CommandKind::Price => {
            session.unlock(CommandKind::Price);
            price(rng)
        }
        CommandKind::Sudo => sudo(session, args),
        CommandKind::Matrix => CommandOutput::from_texts(content::MATRIX_BANNER),
        CommandKind::Hack => hack(args.first().copied().unwrap_or("random_system")),
        CommandKind::Scan => CommandOutput::from_lines(
            content::scan_output(args.first().copied().unwrap_or("localhost"))
                .into_iter()
                .map(OutputLine::output)
                .collect(),
        ),
        CommandKind::Encrypt => encrypt(args),
        CommandKind::Decode => decode(args),
        CommandKind::Fortune => {
            session.unlock(CommandKind::Fortune);
            fortune(rng)
        }
        CommandKind::Easter => {
            session.unlock(CommandKind::Easter);
            CommandOutput::from_texts(content::EASTER_LINES)
        }
        CommandKind::Konami => {
            session.unlock(CommandKind::Konami);
            CommandOutput::from_texts(content::KONAMI_LINES)
        }
        CommandKind::Exit => CommandOutput {
            lines: content::EXIT_LINES.iter().map(|t| OutputLine::output(*t)).collect(),
            staged: Vec::new(),
            action: Some(UiAction::CloseTerminal),
        },
    };
    Ok(output)
}

fn help(session: &Session, args: &[&str]) -> CommandOutput {
    if let Some(arg) = args.first() {
        let name = arg.to_lowercase();
        return match CommandKind::from_name(&name) {
            Some(cmd) => CommandOutput::from_lines(vec![
                OutputLine::output(format!("Command: {}", cmd.name())),
                OutputLine::output(format!("Description: {}", cmd.description())),
                OutputLine::output(format!("Usage: {}", cmd.usage())),
                OutputLine::output(format!("Level: {}", cmd.level().as_str())),
            ]),
            None => CommandOutput::from_lines(vec![OutputLine::output(format!(
                "Command '{}' not found. Type 'help' for available commands.",
                name
            ))]),
        };
    }

    let mut lines = vec![
        OutputLine::output("Available commands:"),
        OutputLine::output(""),
    ];
    for cmd in session.available_commands() {
        lines.push(OutputLine::output(format!(
            "  {:<12} - {}",
            cmd.name(),
            cmd.description()
        )));
    }
    lines.push(OutputLine::output(""));
    lines.push(OutputLine::output(
        "Type \"help [command]\" for detailed information.",
    ));
    lines.push(OutputLine::output(
        "Hint: Try exploring to unlock hidden commands...",
    ));
    CommandOutput::from_lines(lines)
}

fn about(args: &[&str]) -> CommandOutput {
    let Some(section) = args.first() else {
        return CommandOutput::from_texts(content::ABOUT_BANNER);
    };
    let texts = match section.to_lowercase().as_str() {
        "philosophy" => content::ABOUT_PHILOSOPHY,
        "blockchain" => content::ABOUT_BLOCKCHAIN,
        "tokenomics" => content::ABOUT_TOKENOMICS,
        other => {
            return CommandOutput::from_lines(vec![OutputLine::output(format!(
                "Section '{}' not found. Available: philosophy, blockchain, tokenomics",
                other
            ))]);
        }
    };
    CommandOutput::from_texts(texts)
}

fn whoami(session: &Session) -> CommandOutput {
    let mut lines = vec![
        OutputLine::output(format!("User: {}", session.level().as_str())),
        OutputLine::output(format!("Commands executed: {}", session.command_count())),
        OutputLine::output(format!("Terminal session: {}", session.uptime_string())),
        OutputLine::output(format!("Session date: {}", session.started_date())),
        OutputLine::output(format!(
            "Access level: {}",
            session.level().as_str().to_uppercase()
        )),
    ];
    if !session.is_admin() {
        lines.push(OutputLine::output(
            "Hint: Try \"sudo access\" to elevate privileges",
        ));
    }
    CommandOutput::from_lines(lines)
}

fn status(rng: &mut StdRng) -> CommandOutput {
    let block = 18_500_000 + rng.gen_range(0..1_000_000);
    let latency = rng.gen_range(10..60);
    let gas = rng.gen_range(20..120);
    let peers = rng.gen_range(1000..1500);
    let tps = rng.gen_range(5000..15000);

    CommandOutput::from_lines(vec![
        OutputLine::output("╔═══════════════ SYSTEM STATUS ═══════════════╗"),
        OutputLine::output(format!("║ Network: ONLINE          Block: {:<12}║", block)),
        OutputLine::output(format!(
            "║ Latency: {:<4}ms          Gas: {:<4} gwei      ║",
            latency, gas
        )),
        OutputLine::output(format!(
            "║ Peers: {:<6}            TPS: {:<6}          ║",
            peers, tps
        )),
        OutputLine::output("║ Core temp: 42°C          Memory: 67%        ║"),
        OutputLine::output("╚═════════════════════════════════════════════╝"),
        OutputLine::output(""),
        OutputLine::output("All systems operational. CORE network stable."),
    ])
}

fn price(rng: &mut StdRng) -> CommandOutput {
    let price = rng.gen_range(0.05..0.15);
    let change: f64 = rng.gen_range(-10.0..10.0);
    let volume: f64 = rng.gen_range(500_000.0..1_500_000.0);
    let market_cap = price * 1_000_000_000.0;

    CommandOutput::from_lines(vec![
        OutputLine::output("╔══════════════ CORE PRICE DATA ══════════════╗"),
        OutputLine::output(format!("║ Current Price: ${:<10.6}                  ║", price)),
        OutputLine::output(format!("║ 24h Change: {:+.2}%                           ║", change)),
        OutputLine::output(format!("║ 24h Volume: ${:<12.0}                 ║", volume)),
        OutputLine::output(format!("║ Market Cap: ${:<12.0}                 ║", market_cap)),
        OutputLine::output("║ ATH: $0.125000      ATL: $0.001250          ║"),
        OutputLine::output("╚═════════════════════════════════════════════╝"),
        OutputLine::output(""),
        OutputLine::output("💡 Remember: Price is temporary, CORE is eternal."),
    ])
}

fn sudo(session: &mut Session, args: &[&str]) -> CommandOutput {
    let Some(sub) = args.first() else {
        return CommandOutput::from_texts(&[
            "Usage: sudo [command]",
            "Available: sudo access, sudo matrix, sudo hack",
        ]);
    };

    match sub.to_lowercase().as_str() {
        "access" => {
            if session.elevate() {
                session.unlock_many(&[
                    CommandKind::Sudo,
                    CommandKind::Matrix,
                    CommandKind::Hack,
                    CommandKind::Scan,
                    CommandKind::Encrypt,
                    CommandKind::Decode,
                ]);
                CommandOutput::from_texts(&[
                    "Access granted. Welcome, Administrator.",
                    "New commands unlocked. Type \"help\" to see them.",
                    "⚠️  With great power comes great responsibility.",
                ])
            } else {
                CommandOutput::from_texts(&["You already have admin access."])
            }
        }
        "matrix" => {
            let enabled = session.toggle_matrix_mode();
            CommandOutput::from_lines(vec![OutputLine::output(format!(
                "Matrix mode {}",
                if enabled { "ENABLED" } else { "DISABLED" }
            ))])
        }
        "hack" => hack("target_system"),
        other => CommandOutput::from_lines(vec![OutputLine::error(format!(
            "sudo: {}: command not found",
            other
        ))]),
    }
}

fn hack(target: &str) -> CommandOutput {
    let mut staged: Vec<StagedLine> = content::hack_sequence(target)
        .into_iter()
        .enumerate()
        .map(|(i, text)| StagedLine {
            delay: HACK_STEP * (i as u32 + 1),
            line: OutputLine::output(text),
        })
        .collect();
    let ethics_delay = staged.last().map(|s| s.delay).unwrap_or(HACK_STEP);
    staged.push(StagedLine {
        delay: ethics_delay,
        line: OutputLine::output(content::HACK_ETHICS_LINE),
    });

    CommandOutput {
        lines: vec![OutputLine::output("Hack sequence initiated...")],
        staged,
        action: None,
    }
}

fn encrypt(args: &[&str]) -> CommandOutput {
    if args.is_empty() {
        return CommandOutput::from_texts(&["Usage: encrypt [data]"]);
    }
    let data = args.join(" ");
    let encrypted: String = BASE64.encode(&data).chars().rev().collect();

    CommandOutput::from_lines(vec![
        OutputLine::output("Encrypting with CORE-256 algorithm..."),
        OutputLine::output(""),
        OutputLine::output(format!("Original: {}", data)),
        OutputLine::output(format!("Encrypted: {}", encrypted)),
        OutputLine::output(""),
        OutputLine::output("✅ Encryption complete. Data secured."),
    ])
}

fn decode(args: &[&str]) -> CommandOutput {
    if args.is_empty() {
        return CommandOutput::from_texts(&["Usage: decode [encrypted_data]"]);
    }
    let encrypted = args.join(" ");
    let reversed: String = encrypted.chars().rev().collect();

    let decoded = BASE64
        .decode(reversed.as_bytes())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok());

    match decoded {
        Some(decoded) => CommandOutput::from_lines(vec![
            OutputLine::output("Decoding with CORE-256 algorithm..."),
            OutputLine::output(""),
            OutputLine::output(format!("Encrypted: {}", encrypted)),
            OutputLine::output(format!("Decoded: {}", decoded)),
            OutputLine::output(""),
            OutputLine::output("✅ Decoding complete."),
        ]),
        None => CommandOutput::from_lines(vec![OutputLine::error(
            "❌ Invalid encrypted data format.",
        )]),
    }
}

fn fortune(rng: &mut StdRng) -> CommandOutput {
    let fortune = content::FORTUNES
        .choose(rng)
        .copied()
        .unwrap_or(content::FORTUNES[0]);

    CommandOutput::from_lines(vec![
        OutputLine::output("🔮 CORE Fortune Cookie 🔮"),
        OutputLine::output(""),
        OutputLine::output(format!("\"{}\"", fortune)),
        OutputLine::output(""),
        OutputLine::output("💫 May the CORE be with you."),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::time_source::TestTimeSource;
    use rand::SeedableRng;

    fn setup() -> (Session, StdRng) {
        (
            Session::new(TestTimeSource::shared(), 100),
            StdRng::seed_from_u64(42),
        )
    }

    fn texts(output: &CommandOutput) -> Vec<&str> {
        output.lines.iter().map(|l| l.text.as_str()).collect()
    }

    #[test]
    fn test_help_lists_only_available_commands() {
        let (mut session, mut rng) = setup();
        let output = dispatch(&mut session, "help", &mut rng);
        let body = texts(&output).join("\n");

        assert!(!output.lines.is_empty());
        assert!(body.contains("help"));
        assert!(body.contains("sudo"));
        // Admin and hidden commands stay out of the listing
        assert!(!body.contains("matrix"));
        assert!(!body.contains("konami"));
    }

    #[test]
    fn test_help_includes_unlocked_commands() {
        let (mut session, mut rng) = setup();
        dispatch(&mut session, "sudo access", &mut rng);
        let body = texts(&dispatch(&mut session, "help", &mut rng)).join("\n");
        assert!(body.contains("matrix"));
        assert!(body.contains("encrypt"));
    }

    #[test]
    fn test_admin_gating() {
        let (mut session, mut rng) = setup();

        let denied = dispatch(&mut session, "matrix", &mut rng);
        assert_eq!(denied.lines[0].kind, LineKind::Error);
        assert!(denied.lines[0].text.contains("Permission denied"));

        dispatch(&mut session, "sudo access", &mut rng);
        let granted = dispatch(&mut session, "matrix", &mut rng);
        assert_eq!(granted.lines[0].kind, LineKind::Output);
        assert!(texts(&granted).join("\n").contains("MATRIX MODE ACTIVE"));
    }

    #[test]
    fn test_hidden_commands_report_not_found() {
        let (mut session, mut rng) = setup();
        let output = dispatch(&mut session, "konami", &mut rng);
        assert!(output.lines[0].text.contains("Command not found"));

        session.unlock(CommandKind::Konami);
        let output = dispatch(&mut session, "konami", &mut rng);
        assert!(texts(&output).join("\n").contains("KONAMI CODE ACTIVATED"));
    }

    #[test]
    fn test_unknown_command_suggests_close_match() {
        let (mut session, mut rng) = setup();
        let output = dispatch(&mut session, "hlep", &mut rng);
        assert!(output.lines[0].text.contains("Did you mean 'help'?"));
    }

    #[test]
    fn test_unknown_command_without_close_match() {
        let (mut session, mut rng) = setup();
        let output = dispatch(&mut session, "xyzzy", &mut rng);
        assert!(output.lines[0]
            .text
            .contains("Type 'help' for available commands"));
        assert!(!output.lines[0].text.contains("Did you mean"));
    }

    #[test]
    fn test_suggestion_ignores_locked_commands() {
        let (mut session, mut rng) = setup();
        // "matrx" is distance 1 from the admin-only "matrix"
        let output = dispatch(&mut session, "matrx", &mut rng);
        assert!(!output.lines[0].text.contains("Did you mean"));
    }

    #[test]
    fn test_autocomplete_unique_prefix() {
        let (session, _) = setup();
        assert_eq!(
            autocomplete(&session, "he"),
            Completion::Single("help".to_string())
        );
    }

    #[test]
    fn test_autocomplete_multiple_candidates() {
        let (mut session, mut rng) = setup();
        dispatch(&mut session, "sudo access", &mut rng);
        match autocomplete(&session, "s") {
            Completion::Multiple(names) => {
                assert!(names.contains(&"status".to_string()));
                assert!(names.contains(&"sudo".to_string()));
                assert!(names.contains(&"scan".to_string()));
            }
            other => panic!("expected multiple candidates, got {:?}", other),
        }
    }

    #[test]
    fn test_autocomplete_no_match() {
        let (session, _) = setup();
        assert_eq!(autocomplete(&session, "zz"), Completion::None);
    }

    #[test]
    fn test_status_and_price_self_unlock() {
        let (mut session, mut rng) = setup();
        assert!(!session.is_unlocked(CommandKind::Status));
        dispatch(&mut session, "status", &mut rng);
        assert!(session.is_unlocked(CommandKind::Status));
        dispatch(&mut session, "price", &mut rng);
        assert!(session.is_unlocked(CommandKind::Price));
    }

    #[test]
    fn test_encrypt_decode_round_trip() {
        let (mut session, mut rng) = setup();
        dispatch(&mut session, "sudo access", &mut rng);

        let encrypted_output = dispatch(&mut session, "encrypt love moves", &mut rng);
        let encrypted = texts(&encrypted_output)
            .iter()
            .find_map(|l| l.strip_prefix("Encrypted: "))
            .expect("encrypt output should contain the ciphertext")
            .to_string();

        let decoded_output =
            dispatch(&mut session, &format!("decode {}", encrypted), &mut rng);
        let body = texts(&decoded_output).join("\n");
        assert!(body.contains("Decoded: love moves"));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let (mut session, mut rng) = setup();
        dispatch(&mut session, "sudo access", &mut rng);
        let output = dispatch(&mut session, "decode !!!not-base64!!!", &mut rng);
        assert_eq!(output.lines[0].kind, LineKind::Error);
        assert!(output.lines[0].text.contains("Invalid encrypted data"));
    }

    #[test]
    fn test_hack_is_staged() {
        let (mut session, mut rng) = setup();
        dispatch(&mut session, "sudo access", &mut rng);
        let output = dispatch(&mut session, "hack mainframe", &mut rng);

        assert_eq!(output.lines[0].text, "Hack sequence initiated...");
        // 8 script lines plus the ethics line
        assert_eq!(output.staged.len(), 9);
        assert!(output.staged[0].line.text.contains("mainframe"));
        assert!(output.staged.windows(2).all(|w| w[0].delay <= w[1].delay));
        assert_eq!(
            output.staged.last().unwrap().line.text,
            content::HACK_ETHICS_LINE
        );
    }

    #[test]
    fn test_sudo_unknown_subcommand() {
        let (mut session, mut rng) = setup();
        let output = dispatch(&mut session, "sudo rm", &mut rng);
        assert!(output.lines[0].text.contains("sudo: rm: command not found"));
    }

    #[test]
    fn test_clear_and_exit_actions() {
        let (mut session, mut rng) = setup();
        assert_eq!(
            dispatch(&mut session, "clear", &mut rng).action,
            Some(UiAction::ClearScreen)
        );
        let exit = dispatch(&mut session, "exit", &mut rng);
        assert_eq!(exit.action, Some(UiAction::CloseTerminal));
        assert!(texts(&exit).join("\n").contains("CORE lives forever"));
    }

    #[test]
    fn test_blank_input_is_a_no_op() {
        let (mut session, mut rng) = setup();
        let output = dispatch(&mut session, "   ", &mut rng);
        assert!(output.lines.is_empty());
        assert!(output.action.is_none());
    }

    #[test]
    fn test_case_insensitive_command_names() {
        let (mut session, mut rng) = setup();
        let output = dispatch(&mut session, "HELP", &mut rng);
        assert!(texts(&output).join("\n").contains("Available commands:"));
    }
}
