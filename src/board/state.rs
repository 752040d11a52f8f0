//! Game state representation.
//!
//! `Game` is the single shared aggregate of a match: whose turn it is, which
//! phase the round is in, every player's resources and remaining structure
//! inventory, and the `Board` of planets, agents, and fleets. Handlers in
//! `resolve` mutate it in place; nothing else does.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Rules;

use super::planet::{Planet, PlanetId, Resources};
use super::structure::{full_inventory, Inventory, StructureKind};
use super::unit::{Agent, AgentId, Fleet, FleetId, ALL_AGENTS};

/// Seat index of a player in `Game::players`.
pub type PlayerId = usize;

/// The number of phases in a round.
pub const PHASE_COUNT: usize = 5;

/// A phase of the round. Phases advance cyclically by index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Phase {
    Placement = 0,
    Resource = 1,
    Upkeep = 2,
    Build = 3,
    /// Reserved for agent missions. No transition enters it: the build-phase
    /// wrap opens the next round at `Resource`.
    Mission = 4,
}

impl Phase {
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the phase with the given index, wrapping modulo `PHASE_COUNT`.
    pub const fn from_index(index: usize) -> Phase {
        match index % PHASE_COUNT {
            0 => Phase::Placement,
            1 => Phase::Resource,
            2 => Phase::Upkeep,
            3 => Phase::Build,
            _ => Phase::Mission,
        }
    }

    /// Returns the phase that follows this one.
    pub const fn next(self) -> Phase {
        Phase::from_index(self.index() + 1)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Phase::Placement => "placement",
            Phase::Resource => "resource",
            Phase::Upkeep => "upkeep",
            Phase::Build => "build",
            Phase::Mission => "mission",
        }
    }

    /// Returns true for phases in which every player acts once, in any order.
    pub const fn is_simultaneous(self) -> bool {
        matches!(self, Phase::Resource | Phase::Upkeep)
    }
}

/// Score categories for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Points {
    pub structures: u32,
}

impl Points {
    pub fn total(&self) -> u32 {
        self.structures
    }
}

/// Planets plus every player's agents and fleet slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub planets: Vec<Planet>,
    pub agents: BTreeMap<AgentId, Agent>,
    pub fleets: BTreeMap<FleetId, Fleet>,
}

impl Board {
    /// Creates a board over `planets` with every player's agents and fleet
    /// slots off the board.
    ///
    /// The per-player flags of each planet are resized to `player_count`.
    pub fn new(mut planets: Vec<Planet>, player_count: usize) -> Self {
        for planet in &mut planets {
            planet.settled_by.resize(player_count, false);
            planet.buildable_by.resize(player_count, false);
        }

        let mut agents = BTreeMap::new();
        let mut fleets = BTreeMap::new();
        let fleet_slots = StructureKind::Fleet.rule().max as usize;
        for player in 0..player_count {
            for kind in ALL_AGENTS {
                agents.insert(AgentId::new(player, kind), Agent::new(player, kind));
            }
            for index in 0..fleet_slots {
                fleets.insert(FleetId::new(player, index), Fleet::new(player));
            }
        }

        Board {
            planets,
            agents,
            fleets,
        }
    }

    pub fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.get(id)
    }

    /// Returns the lowest-indexed fleet slot of `player` that has not launched.
    pub fn free_fleet(&self, player: PlayerId) -> Option<FleetId> {
        self.fleets
            .iter()
            .find(|(id, fleet)| id.player == player && !fleet.is_launched())
            .map(|(id, _)| *id)
    }
}

/// Complete state of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub round: u32,
    pub turn: PlayerId,
    pub phase: Phase,
    /// Set once the reverse leg of the round-0 snake draft has begun.
    #[serde(rename = "secondmines")]
    pub second_mines: bool,
    #[serde(rename = "phaseDone")]
    pub phase_done: Vec<bool>,
    /// Display names in turn order.
    pub players: Vec<String>,
    pub resources: Vec<Resources>,
    /// Last computed income per player. Refreshed after every placement and
    /// build by the placing player, and at collection time.
    #[serde(rename = "resourceCollect")]
    pub resource_collect: Vec<Resources>,
    /// Last computed upkeep per player. Refreshed only when upkeep is paid.
    #[serde(rename = "resourceUpkeep")]
    pub resource_upkeep: Vec<Resources>,
    pub structures: Vec<Inventory>,
    pub points: Vec<Points>,
    pub board: Board,
    pub rules: Rules,
}

impl Game {
    /// Starts a match at round 0, placement phase, first player to act.
    ///
    /// # Panics
    ///
    /// Panics if `players` is empty; a match needs at least one seat.
    pub fn new(players: Vec<String>, planets: Vec<Planet>, rules: Rules) -> Self {
        assert!(!players.is_empty(), "a game needs at least one player");
        let n = players.len();
        Game {
            round: 0,
            turn: 0,
            phase: Phase::Placement,
            second_mines: false,
            phase_done: vec![false; n],
            players,
            resources: vec![[0; 4]; n],
            resource_collect: vec![[0; 4]; n],
            resource_upkeep: vec![[0; 4]; n],
            structures: vec![full_inventory(); n],
            points: vec![Points::default(); n],
            board: Board::new(planets, n),
            rules,
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_seated(&self, player: PlayerId) -> bool {
        player < self.players.len()
    }

    /// Resets every player's phase-done flag.
    pub fn clear_phase_done(&mut self) {
        self.phase_done.iter_mut().for_each(|done| *done = false);
    }

    /// Returns true once every player has finished the current phase.
    pub fn all_phase_done(&self) -> bool {
        self.phase_done.iter().all(|&done| done)
    }

    /// Number of structures of `kind` that `player` has built, floored at 0.
    pub fn built(&self, player: PlayerId, kind: StructureKind) -> u32 {
        kind.rule()
            .max
            .saturating_sub(self.structures[player][kind.index()])
    }

    /// `max - remaining` for `kind`, unclamped.
    ///
    /// Goes negative for mines once factory and embassy refunds lift the
    /// mine inventory above its starting stock. Upkeep is charged on this
    /// count, so the surplus shows up as a credit.
    pub fn net_built(&self, player: PlayerId, kind: StructureKind) -> i64 {
        i64::from(kind.rule().max) - i64::from(self.structures[player][kind.index()])
    }
}
