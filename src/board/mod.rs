//! Board representation and game-state types.
//!
//! Contains the planets, structures, agents and fleets that make up a match,
//! the `Game` aggregate that owns them, the `Action` input type, and galaxy
//! generation.

pub mod action;
pub mod mapgen;
pub mod planet;
pub mod state;
pub mod structure;
pub mod unit;

pub use action::{Action, ActionKind};
pub use mapgen::{generate_board, generate_game, MapConfig, MapError};
pub use planet::{
    BorderState, Planet, PlanetId, ResourceKind, ResourceSlot, Resources, ALL_RESOURCES,
    RESOURCE_KIND_COUNT,
};
pub use state::{Board, Game, Phase, PlayerId, Points, PHASE_COUNT};
pub use structure::{
    full_inventory, Base, Inventory, Occupancy, Structure, StructureKind, StructureRule,
    ALL_STRUCTURES, STRUCTURE_KIND_COUNT, STRUCTURE_RULES,
};
pub use unit::{
    Agent, AgentId, AgentKind, AgentStatus, Fleet, FleetId, IdError, AGENT_KIND_COUNT, ALL_AGENTS,
};
