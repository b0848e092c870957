//! Commands typed into the interactive dashboard.
//!
//! One command per line:
//! - `q` / `quit`: leave the dashboard.
//! - `r` / `refresh`: fetch now, without waiting for the timer.
//! - `h` / `help` / `?`: list commands.
//! - anything else: a card number or a symbol to select.

/// Parsed user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Leave the dashboard.
    Quit,
    /// Manual refresh.
    Refresh,
    /// Show the command list.
    Help,
    /// Select a card by number or symbol.
    Select(String),
}

/// Help text shown for [`UserCommand::Help`].
pub const HELP: &str = "Commands: <number|symbol> select, r refresh, q quit, h help";

impl UserCommand {
    /// Parse one input line; blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        let command = match trimmed.to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => UserCommand::Quit,
            "r" | "refresh" => UserCommand::Refresh,
            "h" | "help" | "?" => UserCommand::Help,
            _ => UserCommand::Select(trimmed.to_string()),
        };
        Some(command)
    }
}
