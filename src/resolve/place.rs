//! Opening placement.
//!
//! Placement costs nothing and is ordered by the snake draft rather than by a
//! phase gate: the placing seat must hold the turn, and every placement passes
//! the turn on.

use crate::board::{Game, Occupancy, PlanetId, PlayerId, Structure, StructureKind};
use crate::economy::calc_resources_to_collect;

use super::phase::update_turn;
use super::{IllegalAction, Verdict};

/// Marks `planet` as settled by `player`.
pub fn update_settled_by(game: &mut Game, player: PlayerId, planet: PlanetId) {
    if let Some(p) = game.board.planets.get_mut(planet) {
        p.mark_settled(player);
    }
}

/// Marks `planet` and every planet across one of its open borders as
/// buildable by `player`.
pub fn update_buildable_by(game: &mut Game, player: PlayerId, planet: PlanetId) {
    let Some(p) = game.board.planets.get_mut(planet) else {
        return;
    };
    p.mark_buildable(player);
    let neighbors: Vec<PlanetId> = p.open_neighbors().collect();
    for id in neighbors {
        if let Some(neighbor) = game.board.planets.get_mut(id) {
            neighbor.mark_buildable(player);
        }
    }
}

/// Refreshes both ownership flags after a structure appears on `planet`.
pub(crate) fn settle(game: &mut Game, player: PlayerId, planet: PlanetId) {
    update_settled_by(game, player, planet);
    update_buildable_by(game, player, planet);
}

/// Places a free structure on an empty resource slot.
pub fn apply_place(
    player: PlayerId,
    planet: PlanetId,
    slot: Option<usize>,
    structure: StructureKind,
    game: &mut Game,
) -> Verdict {
    if game.turn != player {
        return Err(IllegalAction::NotYourTurn);
    }
    if structure.rule().occupancy != Occupancy::Slot {
        return Err(IllegalAction::NotPlaceable(structure));
    }
    if game.structures[player][structure.index()] == 0 {
        return Err(IllegalAction::PlaceExhausted(structure));
    }

    let target = game.board.planet(planet).ok_or(IllegalAction::NoSuchPlanet)?;
    let index = slot.ok_or(IllegalAction::NotOnResource)?;
    let resource = target
        .resources
        .get(index)
        .ok_or(IllegalAction::NoSuchResource)?;
    if !resource.is_resource() {
        return Err(IllegalAction::NotOnResource);
    }
    if resource.is_occupied() {
        return Err(IllegalAction::Occupied);
    }

    game.board.planets[planet].resources[index].structure = Some(Structure {
        player,
        kind: structure,
    });
    game.structures[player][structure.index()] -= 1;
    settle(game, player, planet);
    update_turn(game);
    calc_resources_to_collect(game, player);
    Ok(None)
}
