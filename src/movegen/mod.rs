//! Legal action generation.
//!
//! Candidates are generated per phase from the board; legality is decided by
//! the resolver itself, by applying each candidate to a scratch copy of the
//! game. This keeps the generator free of rule duplication.

pub mod build;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Action, Game, Phase, PlayerId, StructureKind};
use crate::resolve::{apply_action, is_end_condition};

pub use build::build_candidates;

/// Returns every action `player` might take in the current phase.
///
/// The list is a superset of the legal actions.
pub fn candidate_actions(player: PlayerId, game: &Game) -> Vec<Action> {
    if !game.is_seated(player) {
        return Vec::new();
    }
    match game.phase {
        Phase::Placement => {
            if game.turn != player {
                return Vec::new();
            }
            let mut actions = Vec::new();
            for (planet_id, planet) in game.board.planets.iter().enumerate() {
                for (slot, resource) in planet.resources.iter().enumerate() {
                    if resource.is_resource() && !resource.is_occupied() {
                        actions.push(Action::place(player, planet_id, slot, StructureKind::Mine));
                    }
                }
            }
            actions
        }
        Phase::Resource => vec![Action::collect(player)],
        Phase::Upkeep => vec![Action::pay_upkeep(player)],
        Phase::Build => {
            if game.turn != player {
                return Vec::new();
            }
            let mut actions = build_candidates(player, game);
            actions.push(Action::turn_done(player));
            actions
        }
        // Only reachable in a hand-built game.
        Phase::Mission => {
            if game.turn != player {
                return Vec::new();
            }
            vec![Action::turn_done(player)]
        }
    }
}

/// Returns true if `action` would be accepted against `game`.
pub fn is_legal(action: &Action, game: &Game) -> bool {
    let mut scratch = game.clone();
    apply_action(action, &mut scratch).is_ok()
}

/// Returns the actions `player` may legally take. Empty once the match is over.
pub fn legal_actions(player: PlayerId, game: &Game) -> Vec<Action> {
    if is_end_condition(game) {
        return Vec::new();
    }
    candidate_actions(player, game)
        .into_iter()
        .filter(|a| is_legal(a, game))
        .collect()
}

/// Returns the legal actions of every seat.
pub fn all_legal_actions(game: &Game) -> Vec<Action> {
    (0..game.player_count())
        .flat_map(|player| legal_actions(player, game))
        .collect()
}

/// Picks a uniformly random legal action for `player`.
pub fn random_legal_action(player: PlayerId, game: &Game, rng: &mut impl Rng) -> Option<Action> {
    legal_actions(player, game).choose(rng).cloned()
}
