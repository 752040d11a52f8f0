//! Match configuration.
//!
//! `Rules` holds the tunable limits the handlers consult during play and is
//! stored on every `Game`. `EngineConfig` adds the match-setup parameters
//! (galaxy size, seed) the engine uses when it starts a new game. Both are
//! built from `setoption` name/value pairs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::mapgen::MapConfig;

/// Errors from applying an engine option.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("option '{name}' needs a value")]
    MissingValue { name: String },

    #[error("invalid value '{value}' for option '{name}'")]
    InvalidValue { name: String, value: String },
}

/// Rule constants consulted by the handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// No resource count may exceed this after collecting.
    pub resource_cap: i32,
    /// The match ends once `round` reaches this value.
    pub final_round: u32,
    /// Income from a slot worked by any structure other than a mine.
    pub non_mine_yield: i32,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            resource_cap: 10,
            final_round: 3,
            non_mine_yield: 2,
        }
    }
}

/// Everything the engine needs to start a match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EngineConfig {
    pub rules: Rules,
    pub map: MapConfig,
    /// Galaxy seed. Zero draws one from entropy.
    pub seed: u64,
}

fn parse_value<T: std::str::FromStr>(name: &str, value: Option<&str>) -> Result<T, ConfigError> {
    let value = value.ok_or_else(|| ConfigError::MissingValue {
        name: name.to_string(),
    })?;
    value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    })
}

impl EngineConfig {
    /// Applies one `setoption` pair. Option names are case-insensitive.
    pub fn apply_option(&mut self, name: &str, value: Option<&str>) -> Result<(), ConfigError> {
        match name.to_ascii_lowercase().as_str() {
            "resourcecap" => self.rules.resource_cap = parse_value(name, value)?,
            "finalround" => self.rules.final_round = parse_value(name, value)?,
            "nonmineyield" => self.rules.non_mine_yield = parse_value(name, value)?,
            "planets" => {
                let count: usize = parse_value(name, value)?;
                if count == 0 {
                    return Err(ConfigError::InvalidValue {
                        name: name.to_string(),
                        value: count.to_string(),
                    });
                }
                self.map.planet_count = count;
            }
            "seed" => self.seed = parse_value(name, value)?,
            _ => return Err(ConfigError::UnknownOption(name.to_string())),
        }
        Ok(())
    }
}
