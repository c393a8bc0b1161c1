//! Chat command parsing.
//!
//! Outgoing chat is a command only when its first space-delimited token
//! starts with [`SENTINEL`]. Parsing never fails: a sentinel token we
//! don't know is reported as [`Parsed::Unrecognized`] so the caller can
//! let the game handle it (the client has its own `:` commands).

use crate::figure::CombineMode;

/// Prefix character of every client-side command.
pub const SENTINEL: char = ':';

/// A recognized interceptor command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `:copy <name>`
    Copy { name: String },

    /// `:outfitcombine <name> <name> [mode]` or `:ofc ...`.
    OutfitCombine {
        names: Vec<String>,
        mode: CombineMode,
        /// Fewer than two tokens after the command word.
        too_few: bool,
    },

    /// `:outfitcycle`
    OutfitCycle,

    /// `:outfitstop`
    OutfitStop,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// Ordinary chat, not ours.
    Chat,
    /// Starts with the sentinel but isn't one of our commands.
    Unrecognized(String),
    Command(Command),
}

/// Classify one outgoing chat line.
pub fn parse(message: &str) -> Parsed {
    let (word, rest) = match message.split_once(' ') {
        Some((word, rest)) => (word, rest),
        None => (message, ""),
    };

    if !word.starts_with(SENTINEL) {
        return Parsed::Chat;
    }

    let command = match word {
        ":copy" => Command::Copy {
            name: rest.trim().to_string(),
        },
        ":outfitcombine" | ":ofc" => parse_combine_args(rest),
        ":outfitcycle" => Command::OutfitCycle,
        ":outfitstop" => Command::OutfitStop,
        other => return Parsed::Unrecognized(other.to_string()),
    };

    Parsed::Command(command)
}

/// `<name> <name> ... [mode]`
///
/// A trailing integer is the mode and is removed from the name list. An
/// integer outside `1..=3` is still consumed but falls back to the
/// default mode.
fn parse_combine_args(rest: &str) -> Command {
    let mut tokens: Vec<String> = rest.split_whitespace().map(str::to_string).collect();

    if tokens.len() < 2 {
        return Command::OutfitCombine {
            names: tokens,
            mode: CombineMode::default(),
            too_few: true,
        };
    }

    let mut mode = CombineMode::default();
    if let Some(n) = tokens.last().and_then(|t| t.parse::<i64>().ok()) {
        tokens.pop();
        mode = CombineMode::from_number(n).unwrap_or_default();
    }

    Command::OutfitCombine {
        names: tokens,
        mode,
        too_few: false,
    }
}
