//! Slash command parsing for the chat loop.

use std::io::{self, Write};

use console::style;

#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// End the consultation now.
    End,
    /// Unknown command.
    Unknown(String),
}

/// Parse visitor input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/aide" | "/help" | "/?" => Some(ChatCommand::Help),
        "/fin" | "/terminer" | "/end" => Some(ChatCommand::End),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

pub fn write_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  {}", style("Commandes :").bold())?;
    writeln!(out, "  {}   Afficher cette aide", style("/aide").cyan())?;
    writeln!(out, "  {}    Terminer la consultation", style("/fin").cyan())?;
    writeln!(out, "  {}  Quitter (la consultation est terminée)", style("Ctrl+D").cyan())?;
    writeln!(out)
}
