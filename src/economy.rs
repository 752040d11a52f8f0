//! Income and upkeep derivation.
//!
//! Both values are recomputed from scratch rather than maintained
//! incrementally. The pure functions compute; the `calc_*` functions store the
//! result in `Game::resource_collect` / `Game::resource_upkeep`, which are
//! memoized and may be stale between recomputations:
//!
//! - income is refreshed for the acting player after every placement and
//!   build, and again at collection time;
//! - upkeep is refreshed only when the player pays it.

use crate::board::{Game, PlayerId, Resources, StructureKind, ALL_STRUCTURES};

/// Computes what `player` would collect from the current board.
///
/// Every structure the player owns on an explored planet yields into the
/// bucket of its slot's resource type: the slot's own count for a mine, a
/// flat `rules.non_mine_yield` for anything else.
pub fn resources_to_collect(game: &Game, player: PlayerId) -> Resources {
    let mut collect = [0; 4];
    for planet in game.board.planets.iter().filter(|p| p.explored) {
        for slot in &planet.resources {
            let (Some(kind), Some(structure)) = (slot.kind, slot.structure) else {
                continue;
            };
            if structure.player != player {
                continue;
            }
            collect[kind.index()] += match structure.kind {
                StructureKind::Mine => i32::from(slot.num),
                _ => game.rules.non_mine_yield,
            };
        }
    }
    collect
}

/// Computes what `player` owes for every structure currently built.
///
/// The count per kind is `max - remaining` with no clamp, so refunded mines
/// beyond the starting stock reduce the bill.
pub fn resource_upkeep(game: &Game, player: PlayerId) -> Resources {
    let mut upkeep = [0; 4];
    for kind in ALL_STRUCTURES {
        let built = game.net_built(player, kind);
        for (total, rate) in upkeep.iter_mut().zip(kind.rule().upkeep) {
            *total += (i64::from(rate) * built) as i32;
        }
    }
    upkeep
}

/// Recomputes and stores `player`'s income.
pub fn calc_resources_to_collect(game: &mut Game, player: PlayerId) {
    game.resource_collect[player] = resources_to_collect(game, player);
}

/// Recomputes and stores `player`'s upkeep.
pub fn calc_resource_upkeep(game: &mut Game, player: PlayerId) {
    game.resource_upkeep[player] = resource_upkeep(game, player);
}
