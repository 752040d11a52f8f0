//! Orbital -- a rules engine for a turn-based space strategy game.
//!
//! This binary reads commands from stdin and writes replies to stdout, one
//! per line. Game replies are JSON envelopes; logs go to stderr.

use std::io::{self, BufRead};

use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use orbital::engine::Engine;
use orbital::protocol::parser::{parse_command, Command};

/// Runs the command loop, reading commands from stdin and writing replies
/// to stdout.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("orbital=info")),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        let written = match cmd {
            Command::IsReady => engine.handle_isready(&mut out),
            Command::SetOption { name, value } => {
                if let Err(e) = engine.set_option(&name, value.as_deref()) {
                    warn!(error = %e, "setoption ignored");
                }
                Ok(())
            }
            Command::NewGame { players } => engine.handle_newgame(players, &mut out),
            Command::Action { json } => engine.handle_action(&json, &mut out),
            Command::State => engine.handle_state(&mut out),
            Command::Quit => break,
        };

        if let Err(e) = written {
            error!(error = %e, "failed to write reply");
            break;
        }
    }
}
