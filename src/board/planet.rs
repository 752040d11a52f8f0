//! Planets, resource slots, and borders.
//!
//! A planet is the unit of board space. It carries an ordered list of resource
//! slots that mines and other structures occupy, at most one base, the ids of
//! the fleets and agents currently present, and a border state toward each
//! neighbouring planet.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::state::PlayerId;
use super::structure::{Base, Structure, StructureKind};
use super::unit::{AgentId, FleetId};

/// Index of a planet in `Board::planets`.
pub type PlanetId = usize;

/// The number of resource types in the game.
pub const RESOURCE_KIND_COUNT: usize = 4;

/// Per-resource-type counts, indexed by `ResourceKind as usize`.
///
/// Signed because paying upkeep may drive a count below zero.
pub type Resources = [i32; RESOURCE_KIND_COUNT];

/// A resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum ResourceKind {
    Metal = 0,
    Water = 1,
    Fuel = 2,
    Food = 3,
}

/// All resource kinds in index order.
pub const ALL_RESOURCES: [ResourceKind; RESOURCE_KIND_COUNT] = [
    ResourceKind::Metal,
    ResourceKind::Water,
    ResourceKind::Fuel,
    ResourceKind::Food,
];

impl ResourceKind {
    /// Returns the array index of this resource kind.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the display name.
    pub const fn name(self) -> &'static str {
        match self {
            ResourceKind::Metal => "metal",
            ResourceKind::Water => "water",
            ResourceKind::Fuel => "fuel",
            ResourceKind::Food => "food",
        }
    }
}

/// The state of a border between two planets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderState {
    Open,
    Blocked,
    Unexplored,
}

/// A resource slot on a planet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSlot {
    /// Resource type yielded by this slot. `None` is the "no resource" sentinel.
    pub kind: Option<ResourceKind>,
    /// Intrinsic yield when a mine works this slot.
    pub num: u8,
    /// The structure occupying this slot, if any.
    pub structure: Option<Structure>,
}

impl ResourceSlot {
    /// Creates an empty slot yielding `num` of `kind`.
    pub fn new(kind: ResourceKind, num: u8) -> Self {
        ResourceSlot {
            kind: Some(kind),
            num,
            structure: None,
        }
    }

    /// Creates a slot that carries no resource.
    pub fn barren() -> Self {
        ResourceSlot {
            kind: None,
            num: 0,
            structure: None,
        }
    }

    /// Returns true if this slot bears a resource.
    pub fn is_resource(&self) -> bool {
        self.kind.is_some()
    }

    /// Returns true if a structure occupies this slot.
    pub fn is_occupied(&self) -> bool {
        self.structure.is_some()
    }
}

/// A planet on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    /// Width class (1 = small, 2 = large).
    pub w: u8,
    pub explored: bool,
    pub resources: Vec<ResourceSlot>,
    pub base: Option<Base>,
    pub fleets: Vec<FleetId>,
    pub agents: Vec<AgentId>,
    pub borders: BTreeMap<PlanetId, BorderState>,
    /// Indexed by player. Only ever set, never cleared.
    #[serde(rename = "settledBy")]
    pub settled_by: Vec<bool>,
    /// Indexed by player. Only ever set, never cleared.
    #[serde(rename = "buildableBy")]
    pub buildable_by: Vec<bool>,
}

impl Planet {
    /// Creates a planet with no borders, structures, or visitors.
    pub fn new(w: u8, explored: bool, resources: Vec<ResourceSlot>, player_count: usize) -> Self {
        Planet {
            w,
            explored,
            resources,
            base: None,
            fleets: Vec::new(),
            agents: Vec::new(),
            borders: BTreeMap::new(),
            settled_by: vec![false; player_count],
            buildable_by: vec![false; player_count],
        }
    }

    /// Sets the border state toward `neighbor`.
    pub fn set_border(&mut self, neighbor: PlanetId, state: BorderState) {
        self.borders.insert(neighbor, state);
    }

    /// Iterates over neighbours reachable through an open border.
    pub fn open_neighbors(&self) -> impl Iterator<Item = PlanetId> + '_ {
        self.borders
            .iter()
            .filter(|(_, state)| **state == BorderState::Open)
            .map(|(pid, _)| *pid)
    }

    /// Returns true if the player has settled this planet.
    pub fn is_settled_by(&self, player: PlayerId) -> bool {
        self.settled_by.get(player).copied().unwrap_or(false)
    }

    /// Returns true if the player may build on this planet.
    pub fn is_buildable_by(&self, player: PlayerId) -> bool {
        self.buildable_by.get(player).copied().unwrap_or(false)
    }

    pub(crate) fn mark_settled(&mut self, player: PlayerId) {
        if let Some(flag) = self.settled_by.get_mut(player) {
            *flag = true;
        }
    }

    pub(crate) fn mark_buildable(&mut self, player: PlayerId) {
        if let Some(flag) = self.buildable_by.get_mut(player) {
            *flag = true;
        }
    }

    /// Returns true if the player owns a structure of `kind` on this planet.
    ///
    /// Bases are checked against the planet's base; fleets against the
    /// fleets present; every other kind against the resource slots.
    pub fn player_has_structure(&self, player: PlayerId, kind: StructureKind) -> bool {
        match kind {
            StructureKind::Base => self.base.is_some_and(|b| b.player == player),
            StructureKind::Fleet => self.fleets.iter().any(|f| f.player == player),
            _ => self.resources.iter().any(|slot| {
                slot.structure
                    .is_some_and(|s| s.player == player && s.kind == kind)
            }),
        }
    }
}
