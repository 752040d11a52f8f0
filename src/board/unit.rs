//! Agents and fleets.
//!
//! Every player owns one agent of each `AgentKind` and a fixed number of fleet
//! slots. Both start off the board. Their ids are derived from the owning
//! player, which keeps them stable for the whole match.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::planet::PlanetId;
use super::state::PlayerId;
use super::structure::StructureKind;

/// The number of agent kinds.
pub const AGENT_KIND_COUNT: usize = 5;

/// A kind of recruitable agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum AgentKind {
    Explorer = 0,
    Surveyor = 1,
    Miner = 2,
    Smuggler = 3,
    Ambassador = 4,
}

/// All agent kinds in index order.
pub const ALL_AGENTS: [AgentKind; AGENT_KIND_COUNT] = [
    AgentKind::Explorer,
    AgentKind::Surveyor,
    AgentKind::Miner,
    AgentKind::Smuggler,
    AgentKind::Ambassador,
];

impl AgentKind {
    /// Returns the display name used in player-facing messages and ids.
    pub const fn name(self) -> &'static str {
        match self {
            AgentKind::Explorer => "explorer",
            AgentKind::Surveyor => "surveyor",
            AgentKind::Miner => "miner",
            AgentKind::Smuggler => "smuggler",
            AgentKind::Ambassador => "ambassador",
        }
    }

    /// Parses an agent kind from its display name.
    pub fn from_name(s: &str) -> Option<AgentKind> {
        ALL_AGENTS.iter().copied().find(|k| k.name() == s)
    }

    /// The structure a player must own on a planet to recruit this agent there.
    pub const fn recruited_at(self) -> StructureKind {
        match self {
            AgentKind::Explorer | AgentKind::Surveyor => StructureKind::Base,
            AgentKind::Miner => StructureKind::Mine,
            AgentKind::Smuggler => StructureKind::Factory,
            AgentKind::Ambassador => StructureKind::Embassy,
        }
    }
}

/// Lifecycle state of an agent. `Dead` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    OffBoard,
    OnBoard,
    Dead,
}

/// A player's agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub player: PlayerId,
    #[serde(rename = "agenttype")]
    pub kind: AgentKind,
    #[serde(rename = "planetid")]
    pub planet: Option<PlanetId>,
    pub used: bool,
    pub status: AgentStatus,
}

impl Agent {
    /// Creates an off-board agent.
    pub fn new(player: PlayerId, kind: AgentKind) -> Self {
        Agent {
            player,
            kind,
            planet: None,
            used: false,
            status: AgentStatus::OffBoard,
        }
    }
}

/// A player's fleet slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fleet {
    pub player: PlayerId,
    #[serde(rename = "planetid")]
    pub planet: Option<PlanetId>,
    pub used: bool,
}

impl Fleet {
    /// Creates a fleet slot that has not been launched.
    pub fn new(player: PlayerId) -> Self {
        Fleet {
            player,
            planet: None,
            used: false,
        }
    }

    /// Returns true if the fleet is on the board.
    pub fn is_launched(&self) -> bool {
        self.planet.is_some()
    }
}

/// Errors from parsing an agent or fleet id.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("id '{0}' is not of the form <player>:<suffix>")]
    Malformed(String),

    #[error("invalid player in id '{0}'")]
    InvalidPlayer(String),

    #[error("unknown agent kind '{0}'")]
    UnknownAgent(String),

    #[error("invalid fleet index in id '{0}'")]
    InvalidIndex(String),
}

fn split_id(s: &str) -> Result<(PlayerId, &str), IdError> {
    let (player, rest) = s
        .split_once(':')
        .ok_or_else(|| IdError::Malformed(s.to_string()))?;
    let player = player
        .parse::<PlayerId>()
        .map_err(|_| IdError::InvalidPlayer(s.to_string()))?;
    Ok((player, rest))
}

/// Identifies an agent: one per (player, kind). Written `<player>:<kind>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AgentId {
    pub player: PlayerId,
    pub kind: AgentKind,
}

impl AgentId {
    pub fn new(player: PlayerId, kind: AgentKind) -> Self {
        AgentId { player, kind }
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.player, self.kind.name())
    }
}

impl FromStr for AgentId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (player, kind) = split_id(s)?;
        let kind = AgentKind::from_name(kind).ok_or_else(|| IdError::UnknownAgent(kind.to_string()))?;
        Ok(AgentId { player, kind })
    }
}

impl From<AgentId> for String {
    fn from(id: AgentId) -> String {
        id.to_string()
    }
}

impl TryFrom<String> for AgentId {
    type Error = IdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Identifies a fleet slot: one per (player, index). Written `<player>:<index>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct FleetId {
    pub player: PlayerId,
    pub index: usize,
}

impl FleetId {
    pub fn new(player: PlayerId, index: usize) -> Self {
        FleetId { player, index }
    }
}

impl fmt::Display for FleetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.player, self.index)
    }
}

impl FromStr for FleetId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (player, index) = split_id(s)?;
        let index = index
            .parse::<usize>()
            .map_err(|_| IdError::InvalidIndex(s.to_string()))?;
        Ok(FleetId { player, index })
    }
}

impl From<FleetId> for String {
    fn from(id: FleetId) -> String {
        id.to_string()
    }
}

impl TryFrom<String> for FleetId {
    type Error = IdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
