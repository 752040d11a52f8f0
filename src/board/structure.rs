//! Structure kinds and their rules table.
//!
//! Every structure kind is described by one `StructureRule` record: how many
//! a player may own, what it costs to build, what it costs to keep each upkeep
//! phase, how many points it awards, and where on a planet it sits. The build
//! handler is a generic lookup into this table plus a handful of occupancy
//! rules.

use serde::{Deserialize, Serialize};

use super::planet::Resources;
use super::state::PlayerId;

/// The number of structure kinds.
pub const STRUCTURE_KIND_COUNT: usize = 5;

/// Remaining-to-build count per structure kind, indexed by `StructureKind as usize`.
pub type Inventory = [u32; STRUCTURE_KIND_COUNT];

/// A kind of structure.
///
/// The discriminant order matters: upkeep is summed over kinds from `Mine`
/// through `Fleet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum StructureKind {
    Mine = 0,
    Factory = 1,
    Embassy = 2,
    Base = 3,
    Fleet = 4,
}

/// All structure kinds in index order.
pub const ALL_STRUCTURES: [StructureKind; STRUCTURE_KIND_COUNT] = [
    StructureKind::Mine,
    StructureKind::Factory,
    StructureKind::Embassy,
    StructureKind::Base,
    StructureKind::Fleet,
];

/// Where a structure sits once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occupancy {
    /// Occupies one resource slot.
    Slot,
    /// The planet-wide singleton (bases).
    Planet,
    /// Launched from one of the player's fixed fleet slots at an owned base.
    Hangar,
}

/// Static rules for one structure kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureRule {
    /// How many of this kind each player may have built at once.
    pub max: u32,
    /// Resources paid to build one, indexed by `ResourceKind`.
    pub build: Resources,
    /// Resources paid per built structure each upkeep phase.
    pub upkeep: Resources,
    /// Structure points awarded when built.
    pub points: u32,
    pub occupancy: Occupancy,
    /// Building this kind hands one mine back to the builder's inventory.
    pub refunds_mine: bool,
}

/// Rules table indexed by `StructureKind as usize`.
///
/// Resource columns are `[metal, water, fuel, food]`.
pub static STRUCTURE_RULES: [StructureRule; STRUCTURE_KIND_COUNT] = [
    // Mine
    StructureRule {
        max: 10,
        build: [1, 1, 0, 1],
        upkeep: [0, 0, 0, 1],
        points: 1,
        occupancy: Occupancy::Slot,
        refunds_mine: false,
    },
    // Factory
    StructureRule {
        max: 4,
        build: [3, 1, 1, 0],
        upkeep: [0, 1, 1, 0],
        points: 2,
        occupancy: Occupancy::Slot,
        refunds_mine: true,
    },
    // Embassy
    StructureRule {
        max: 4,
        build: [1, 2, 0, 2],
        upkeep: [0, 0, 1, 1],
        points: 3,
        occupancy: Occupancy::Slot,
        refunds_mine: true,
    },
    // Base
    StructureRule {
        max: 5,
        build: [2, 1, 2, 1],
        upkeep: [1, 0, 1, 0],
        points: 2,
        occupancy: Occupancy::Planet,
        refunds_mine: false,
    },
    // Fleet
    StructureRule {
        max: 3,
        build: [2, 0, 2, 0],
        upkeep: [0, 0, 1, 1],
        points: 1,
        occupancy: Occupancy::Hangar,
        refunds_mine: false,
    },
];

impl StructureKind {
    /// Returns the array index of this kind.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the display name used in player-facing messages.
    pub const fn name(self) -> &'static str {
        match self {
            StructureKind::Mine => "mine",
            StructureKind::Factory => "factory",
            StructureKind::Embassy => "embassy",
            StructureKind::Base => "base",
            StructureKind::Fleet => "fleet",
        }
    }

    /// Returns the rules record for this kind.
    pub fn rule(self) -> &'static StructureRule {
        &STRUCTURE_RULES[self as usize]
    }
}

/// A structure occupying a resource slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Structure {
    pub player: PlayerId,
    pub kind: StructureKind,
}

/// A planet's base. At most one per planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Base {
    pub player: PlayerId,
    pub used: bool,
}

/// Returns a fresh inventory with every kind at its maximum.
pub fn full_inventory() -> Inventory {
    let mut inventory = [0; STRUCTURE_KIND_COUNT];
    for kind in ALL_STRUCTURES {
        inventory[kind.index()] = kind.rule().max;
    }
    inventory
}
