//! Galaxy generation for match setup.
//!
//! Planets are laid out on a square-ish grid and bordered with their right and
//! lower neighbours. The first planet of each seat is explored so every player
//! has somewhere to place their opening mines. Borders between two explored
//! planets are open or blocked at random; any border touching an unexplored
//! planet stays unexplored.

use rand::Rng;
use thiserror::Error;

use crate::config::Rules;

use super::planet::{BorderState, Planet, ResourceSlot, ALL_RESOURCES};
use super::state::{Board, Game};

/// Errors from invalid generation parameters.
#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    #[error("a galaxy needs at least one player")]
    NoPlayers,

    #[error("{planets} planets cannot seat {players} players")]
    TooFewPlanets { planets: usize, players: usize },

    #[error("planets need at least one resource slot")]
    NoSlots,

    #[error("{name} must lie in [0, 1], got {value}")]
    BadRatio { name: &'static str, value: f64 },
}

/// Shape parameters for a generated galaxy.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    pub planet_count: usize,
    /// Upper bound on resource slots per planet.
    pub max_slots: usize,
    /// Chance that a planet beyond the home planets starts explored.
    pub explored_ratio: f64,
    /// Chance that a border between two explored planets is blocked.
    pub blocked_ratio: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            planet_count: 12,
            max_slots: 3,
            explored_ratio: 0.6,
            blocked_ratio: 0.2,
        }
    }
}

impl MapConfig {
    /// Checks that a galaxy with these parameters can seat `player_count`.
    pub fn validate(&self, player_count: usize) -> Result<(), MapError> {
        if player_count == 0 {
            return Err(MapError::NoPlayers);
        }
        if self.planet_count < player_count {
            return Err(MapError::TooFewPlanets {
                planets: self.planet_count,
                players: player_count,
            });
        }
        if self.max_slots == 0 {
            return Err(MapError::NoSlots);
        }
        for (name, value) in [
            ("explored_ratio", self.explored_ratio),
            ("blocked_ratio", self.blocked_ratio),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(MapError::BadRatio { name, value });
            }
        }
        Ok(())
    }
}

fn random_slot<R: Rng + ?Sized>(rng: &mut R) -> ResourceSlot {
    if rng.gen_ratio(1, 8) {
        return ResourceSlot::barren();
    }
    let kind = ALL_RESOURCES[rng.gen_range(0..ALL_RESOURCES.len())];
    ResourceSlot::new(kind, rng.gen_range(1..=3))
}

/// Generates a board for `player_count` players.
pub fn generate_board<R: Rng + ?Sized>(
    config: &MapConfig,
    player_count: usize,
    rng: &mut R,
) -> Result<Board, MapError> {
    config.validate(player_count)?;

    let n = config.planet_count;
    let mut planets: Vec<Planet> = (0..n)
        .map(|i| {
            let explored = i < player_count || rng.gen_bool(config.explored_ratio);
            let w = rng.gen_range(1..=2u8);
            let slots = rng.gen_range(1..=config.max_slots);
            let mut resources: Vec<ResourceSlot> = (0..slots).map(|_| random_slot(rng)).collect();
            // Home planets always offer at least one resource.
            if i < player_count && !resources.iter().any(ResourceSlot::is_resource) {
                resources[0] = ResourceSlot::new(ALL_RESOURCES[i % ALL_RESOURCES.len()], 2);
            }
            Planet::new(w, explored, resources, player_count)
        })
        .collect();

    let cols = (n as f64).sqrt().ceil() as usize;
    for a in 0..n {
        let right = a + 1;
        let down = a + cols;
        let neighbors = [
            (right < n && right % cols != 0).then_some(right),
            (down < n).then_some(down),
        ];
        for b in neighbors.into_iter().flatten() {
            let state = if planets[a].explored && planets[b].explored {
                if rng.gen_bool(config.blocked_ratio) {
                    BorderState::Blocked
                } else {
                    BorderState::Open
                }
            } else {
                BorderState::Unexplored
            };
            planets[a].set_border(b, state);
            planets[b].set_border(a, state);
        }
    }

    Ok(Board::new(planets, player_count))
}

/// Generates a galaxy and starts a match on it.
pub fn generate_game<R: Rng + ?Sized>(
    players: Vec<String>,
    rules: Rules,
    config: &MapConfig,
    rng: &mut R,
) -> Result<Game, MapError> {
    let board = generate_board(config, players.len(), rng)?;
    Ok(Game::new(players, board.planets, rules))
}
