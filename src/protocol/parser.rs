//! Engine command parser.
//!
//! Parses incoming lines from the engine's stdin into structured `Command`
//! variants that the main loop can dispatch on.

use tracing::warn;

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a match with the given seats, in turn order.
    NewGame { players: Vec<String> },

    /// Resolve one JSON-encoded action.
    Action { json: String },

    /// Report the current game.
    State,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let first = *tokens.first()?;

    match first {
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "state" => Some(Command::State),

        "setoption" => parse_setoption(&tokens),
        "newgame" => parse_newgame(&tokens),
        "action" => parse_action_line(trimmed),

        other => {
            warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                warn!("malformed setoption: empty name");
                return None;
            }
            let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
            (name_parts.join(" "), value)
        }
        None => (tokens[2..].join(" "), None),
    };

    Some(Command::SetOption { name, value })
}

/// Parses `newgame <name> [<name> ...]`.
fn parse_newgame(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 2 {
        warn!("malformed newgame: expected 'newgame <name> [<name> ...]'");
        return None;
    }
    let players = tokens[1..].iter().map(|t| t.to_string()).collect();
    Some(Command::NewGame { players })
}

/// Parses `action <json>`, keeping the JSON text verbatim.
fn parse_action_line(line: &str) -> Option<Command> {
    let json = line.strip_prefix("action").unwrap_or("").trim();
    if json.is_empty() {
        warn!("malformed action: expected 'action <json>'");
        return None;
    }
    Some(Command::Action {
        json: json.to_string(),
    })
}
