//! Player actions.
//!
//! An `Action` is the engine's only input: the acting seat plus one
//! `ActionKind`. Each variant carries exactly what its handler needs. The
//! JSON form sent by clients is a flat record; see `protocol::wire`.

use serde::{Deserialize, Serialize};

use super::planet::PlanetId;
use super::state::PlayerId;
use super::structure::StructureKind;
use super::unit::AgentKind;
use crate::protocol::wire::{RawAction, WireError};

/// What a player wants to do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// Round-0 placement: `{"actiontype":"place","planetid":0,"resourceid":1,"objecttype":"mine"}`
    Place {
        planet: PlanetId,
        /// `None` is the "no resource" sentinel.
        slot: Option<usize>,
        structure: StructureKind,
    },

    /// Paid construction during the build phase. `slot` is ignored for
    /// bases and fleets.
    Build {
        planet: PlanetId,
        slot: Option<usize>,
        structure: StructureKind,
    },

    /// Bring an agent onto the board at a planet.
    Recruit { planet: PlanetId, agent: AgentKind },

    CollectResources,

    PayUpkeep,

    /// End the acting player's turn.
    TurnDone,

    /// Asset-loading acknowledgement. Never mutates the game.
    LoadingDone,

    /// Any action tag the engine does not know.
    Unknown(String),
}

impl ActionKind {
    /// Returns the wire tag for this kind.
    pub fn tag(&self) -> &str {
        match self {
            ActionKind::Place { .. } => "place",
            ActionKind::Build { .. } => "build",
            ActionKind::Recruit { .. } => "recruit",
            ActionKind::CollectResources => "collect_resources",
            ActionKind::PayUpkeep => "pay_upkeep",
            ActionKind::TurnDone => "turn_done",
            ActionKind::LoadingDone => "loading_done",
            ActionKind::Unknown(tag) => tag,
        }
    }

    /// Returns true if resolving this kind may change the game.
    pub fn mutates(&self) -> bool {
        !matches!(self, ActionKind::LoadingDone)
    }
}

/// An action submitted by one player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawAction", into = "RawAction")]
pub struct Action {
    pub player: PlayerId,
    pub kind: ActionKind,
}

impl Action {
    pub fn new(player: PlayerId, kind: ActionKind) -> Self {
        Action { player, kind }
    }

    pub fn place(player: PlayerId, planet: PlanetId, slot: usize, structure: StructureKind) -> Self {
        Action::new(
            player,
            ActionKind::Place {
                planet,
                slot: Some(slot),
                structure,
            },
        )
    }

    pub fn build(
        player: PlayerId,
        planet: PlanetId,
        slot: Option<usize>,
        structure: StructureKind,
    ) -> Self {
        Action::new(
            player,
            ActionKind::Build {
                planet,
                slot,
                structure,
            },
        )
    }

    pub fn recruit(player: PlayerId, planet: PlanetId, agent: AgentKind) -> Self {
        Action::new(player, ActionKind::Recruit { planet, agent })
    }

    pub fn collect(player: PlayerId) -> Self {
        Action::new(player, ActionKind::CollectResources)
    }

    pub fn pay_upkeep(player: PlayerId) -> Self {
        Action::new(player, ActionKind::PayUpkeep)
    }

    pub fn turn_done(player: PlayerId) -> Self {
        Action::new(player, ActionKind::TurnDone)
    }

    pub fn loading_done(player: PlayerId) -> Self {
        Action::new(player, ActionKind::LoadingDone)
    }
}

impl TryFrom<RawAction> for Action {
    type Error = WireError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        raw.into_action()
    }
}

impl From<Action> for RawAction {
    fn from(action: Action) -> RawAction {
        RawAction::from_action(&action)
    }
}
