//! Turn and phase sequencing.
//!
//! Turn flow:
//! - Round 0 (placement): snake draft. Seats act 0..N-1, then N-1..0; the
//!   last seat acts twice in a row. When the reverse leg passes seat 0 the
//!   match enters round 1 at the resource phase.
//! - Later rounds: seats act 0..N-1. Wrapping starts a new round; if the wrap
//!   happens during the build phase, the new round opens with resource
//!   collection.
//!
//! Resource and upkeep are simultaneous: every seat acts once, in any order,
//! and the phase advances when the last one is done.

use crate::board::{Game, Phase, PlayerId};

use super::{IllegalAction, Verdict};

/// Advances `game.turn` after a placement or a finished turn.
pub fn update_turn(game: &mut Game) {
    let n = game.player_count();
    if game.round == 0 {
        if game.second_mines {
            if game.turn == 0 {
                game.round = 1;
                game.phase = Phase::Resource;
                game.clear_phase_done();
            } else {
                game.turn -= 1;
            }
        } else if game.turn + 1 >= n {
            game.turn = n - 1;
            game.second_mines = true;
        } else {
            game.turn += 1;
        }
    } else {
        game.turn += 1;
        if game.turn >= n {
            game.round += 1;
            game.turn = 0;
            if game.phase == Phase::Build {
                game.phase = Phase::Resource;
                game.clear_phase_done();
            }
        }
    }
}

/// Advances a simultaneous phase once every seat is done.
///
/// Has no effect in turn-driven phases.
pub fn update_phase(game: &mut Game) {
    if game.phase.is_simultaneous() && game.all_phase_done() {
        game.phase = game.phase.next();
        game.turn = 0;
        game.clear_phase_done();
    }
}

/// Returns true once the match has reached its final round.
pub fn is_end_condition(game: &Game) -> bool {
    game.round >= game.rules.final_round
}

/// Ends the acting player's turn.
pub fn apply_turn_done(player: PlayerId, game: &mut Game) -> Verdict {
    if game.turn != player {
        return Err(IllegalAction::NotYourTurn);
    }
    update_turn(game);
    Ok(None)
}
