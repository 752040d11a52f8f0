//! Engine session state.
//!
//! Holds the engine options and the match in progress, and answers the
//! commands read by the binary's stdin loop. Every reply that carries game
//! data is a single JSON-encoded envelope line.

use std::io::{self, Write};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{info, warn};

use crate::board::{generate_game, Game, MapError};
use crate::config::{ConfigError, EngineConfig};
use crate::protocol::{parse_action, Envelope};
use crate::resolve::resolve_action;

/// Errors from session-level commands.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("no game in progress")]
    NoGame,

    #[error("cannot start game: {0}")]
    Map(#[from] MapError),
}

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub config: EngineConfig,
    pub game: Option<Game>,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with default options and no match.
    pub fn new() -> Self {
        Engine {
            config: EngineConfig::default(),
            game: None,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Applies an option. Takes effect at the next `new_game`.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        self.config.apply_option(name, value)
    }

    /// Generates a galaxy and seats `players` in turn order.
    pub fn new_game(&mut self, players: Vec<String>) -> Result<&Game, EngineError> {
        let mut rng = match self.config.seed {
            0 => SmallRng::from_rng(&mut self.rng).unwrap_or_else(|_| SmallRng::from_entropy()),
            seed => SmallRng::seed_from_u64(seed),
        };
        let game = generate_game(players, self.config.rules, &self.config.map, &mut rng)?;
        info!(
            players = ?game.players,
            planets = game.board.planets.len(),
            "match started"
        );
        let game: &Game = self.game.insert(game);
        Ok(game)
    }

    /// Resolves one JSON-encoded action against the current match.
    ///
    /// Undecodable input and actions sent before `newgame` are answered with
    /// an illegal-action envelope rather than an error.
    pub fn apply_json(&mut self, json: &str) -> Envelope {
        let action = match parse_action(json) {
            Ok(action) => action,
            Err(e) => {
                warn!(error = %e, "undecodable action");
                return Envelope::illegal(e.to_string());
            }
        };
        match self.game.as_mut() {
            Some(game) => resolve_action(&action, game),
            None => Envelope::illegal(EngineError::NoGame.to_string()),
        }
    }

    /// The current match as a loading-done envelope.
    pub fn state(&self) -> Result<Envelope, EngineError> {
        self.game
            .as_ref()
            .map(Envelope::loading_done)
            .ok_or(EngineError::NoGame)
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles the `newgame` command.
    pub fn handle_newgame<W: Write>(&mut self, players: Vec<String>, out: &mut W) -> io::Result<()> {
        let envelope = match self.new_game(players) {
            Ok(game) => Envelope::loading_done(game),
            Err(e) => {
                warn!(error = %e, "newgame failed");
                Envelope::illegal(e.to_string())
            }
        };
        write_envelope(&envelope, out)
    }

    /// Handles the `action` command.
    pub fn handle_action<W: Write>(&mut self, json: &str, out: &mut W) -> io::Result<()> {
        let envelope = self.apply_json(json);
        write_envelope(&envelope, out)
    }

    /// Handles the `state` command.
    pub fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let envelope = self
            .state()
            .unwrap_or_else(|e| Envelope::illegal(e.to_string()));
        write_envelope(&envelope, out)
    }
}

fn write_envelope<W: Write>(envelope: &Envelope, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", envelope.to_json()?)?;
    out.flush()
}
