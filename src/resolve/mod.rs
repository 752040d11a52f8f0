//! Action resolution.
//!
//! `resolve_action` is the single entry point the transport calls: it checks
//! the end condition, routes the action to its handler, and packages the
//! verdict into an `Envelope`. Each handler validates everything before it
//! touches the game, so a rejected action leaves the state exactly as it was.

pub mod build;
pub mod collect;
pub mod phase;
pub mod place;
pub mod recruit;

use thiserror::Error;
use tracing::{debug, info};

use crate::board::{Action, ActionKind, AgentKind, Game, StructureKind};
use crate::protocol::{Envelope, Response};

pub use build::{add_points_for_structure, apply_build, has_enough_to_build, pay_to_build};
pub use collect::{apply_collect_resources, apply_pay_upkeep};
pub use phase::{apply_turn_done, is_end_condition, update_phase, update_turn};
pub use place::{apply_place, update_buildable_by, update_settled_by};
pub use recruit::apply_recruit;

/// Why an action was rejected. `Display` is the message shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalAction {
    #[error("That is an unknown action")]
    Unknown,

    #[error("You are not seated in this game")]
    NotSeated,

    #[error("it is not your turn")]
    NotYourTurn,

    #[error("That planet does not exist")]
    NoSuchPlanet,

    #[error("That resource does not exist")]
    NoSuchResource,

    #[error("You must place this on a resource")]
    NotOnResource,

    #[error("You cannot place this on another structure")]
    Occupied,

    #[error("You cannot place a {} on a resource", .0.name())]
    NotPlaceable(StructureKind),

    #[error("You cannot place another {}", .0.name())]
    PlaceExhausted(StructureKind),

    #[error("This action must be done during the build phase")]
    BuildOutsidePhase,

    #[error("This action must be done during your turn")]
    BuildOutOfTurn,

    #[error("You cannot build another {}", .0.name())]
    Exhausted(StructureKind),

    #[error("You do not have enough resources to build a new {}", .0.name())]
    Unaffordable(StructureKind),

    #[error("Only one base can be built on a planet")]
    BaseExists,

    #[error("You must build fleets where you have a base")]
    NoBaseForFleet,

    #[error("You have no fleets left to launch")]
    NoFreeFleet,

    #[error("That agent does not exist")]
    NoSuchAgent,

    #[error("You must recruit new agents during the build phase")]
    RecruitOutsidePhase,

    #[error("You must recruit agents during your turn")]
    RecruitOutOfTurn,

    #[error("Your {} cannot return during this game.", .0.name())]
    AgentDead(AgentKind),

    #[error("Your {} is already on the board.", .0.name())]
    AgentOnBoard(AgentKind),

    #[error("You must recruit a new {} at your {}", .0.name(), .0.recruited_at().name())]
    RecruitWithoutStructure(AgentKind),

    #[error("The resource phase is complete")]
    ResourcePhaseOver,

    #[error("You have already collected resources")]
    AlreadyCollected,

    #[error("You must trade or 4 to 1 before collecting more")]
    OverResourceCap,

    #[error("The upkeep phase is complete")]
    UpkeepPhaseOver,

    #[error("You have already paid upkeep")]
    AlreadyPaid,
}

/// A handler's outcome. `Err` guarantees the game was not modified.
pub type Verdict = Result<Option<Response>, IllegalAction>;

/// Routes an action to its handler.
///
/// Does not check the end condition; `resolve_action` does that first.
pub fn apply_action(action: &Action, game: &mut Game) -> Verdict {
    let player = action.player;
    if let ActionKind::Unknown(_) = action.kind {
        return Err(IllegalAction::Unknown);
    }
    if !game.is_seated(player) {
        return Err(IllegalAction::NotSeated);
    }

    match action.kind {
        ActionKind::Place {
            planet,
            slot,
            structure,
        } => apply_place(player, planet, slot, structure, game),
        ActionKind::Build {
            planet,
            slot,
            structure,
        } => apply_build(player, planet, slot, structure, game),
        ActionKind::Recruit { planet, agent } => apply_recruit(player, planet, agent, game),
        ActionKind::CollectResources => apply_collect_resources(player, game),
        ActionKind::PayUpkeep => apply_pay_upkeep(player, game),
        ActionKind::TurnDone => apply_turn_done(player, game),
        ActionKind::LoadingDone => Ok(None),
        ActionKind::Unknown(_) => Err(IllegalAction::Unknown),
    }
}

/// Resolves one action against the game and returns the envelope to deliver.
pub fn resolve_action(action: &Action, game: &mut Game) -> Envelope {
    if !action.kind.mutates() {
        return Envelope::loading_done(game);
    }
    if is_end_condition(game) {
        debug!(player = action.player, action = action.kind.tag(), "action after match end");
        return Envelope::game_end();
    }

    let (round, phase) = (game.round, game.phase);
    match apply_action(action, game) {
        Ok(response) => {
            debug!(
                player = action.player,
                action = action.kind.tag(),
                turn = game.turn,
                "action applied"
            );
            if game.round != round || game.phase != phase {
                info!(
                    round = game.round,
                    phase = game.phase.name(),
                    "entering new phase"
                );
            }
            if game.round != round && is_end_condition(game) {
                info!(round = game.round, "match over");
            }
            Envelope::game_event(game, Some(action.clone()), response)
        }
        Err(reason) => {
            debug!(
                player = action.player,
                action = action.kind.tag(),
                %reason,
                "action rejected"
            );
            Envelope::illegal(reason.to_string())
        }
    }
}
