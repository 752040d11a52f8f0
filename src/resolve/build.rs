//! Build-phase construction.
//!
//! Every kind shares the same checks and effects, driven by its
//! `StructureRule`; only where the structure lands differs:
//! - bases: the planet's single base, which must be free;
//! - fleets: the builder's first unlaunched fleet slot, at a base they own;
//! - mines, factories, embassies: an empty resource slot. Factories and
//!   embassies may also replace the builder's own mine, and hand one mine
//!   back to the builder's inventory either way.

use crate::board::{
    Base, FleetId, Game, Occupancy, Phase, PlanetId, PlayerId, Structure, StructureKind,
};
use crate::economy::calc_resources_to_collect;

use super::place::settle;
use super::{IllegalAction, Verdict};

/// Where a validated build will land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Base,
    Fleet(FleetId),
    Slot(usize),
}

/// Returns true if `player` can pay the build cost of `kind`.
pub fn has_enough_to_build(game: &Game, player: PlayerId, kind: StructureKind) -> bool {
    game.resources[player]
        .iter()
        .zip(kind.rule().build)
        .all(|(&have, cost)| have >= cost)
}

/// Deducts the build cost of `kind` from `player`'s resources.
pub fn pay_to_build(game: &mut Game, player: PlayerId, kind: StructureKind) {
    for (have, cost) in game.resources[player].iter_mut().zip(kind.rule().build) {
        *have -= cost;
    }
}

/// Awards the point value of `kind` to `player`.
pub fn add_points_for_structure(game: &mut Game, player: PlayerId, kind: StructureKind) {
    game.points[player].structures += kind.rule().points;
}

fn plan_placement(
    game: &Game,
    player: PlayerId,
    planet: PlanetId,
    slot: Option<usize>,
    kind: StructureKind,
) -> Result<Placement, IllegalAction> {
    let target = game.board.planet(planet).ok_or(IllegalAction::NoSuchPlanet)?;
    match kind.rule().occupancy {
        Occupancy::Planet => {
            if target.base.is_some() {
                return Err(IllegalAction::BaseExists);
            }
            Ok(Placement::Base)
        }
        Occupancy::Hangar => {
            if !target.player_has_structure(player, StructureKind::Base) {
                return Err(IllegalAction::NoBaseForFleet);
            }
            game.board
                .free_fleet(player)
                .map(Placement::Fleet)
                .ok_or(IllegalAction::NoFreeFleet)
        }
        Occupancy::Slot => {
            let index = slot.ok_or(IllegalAction::NotOnResource)?;
            let resource = target
                .resources
                .get(index)
                .ok_or(IllegalAction::NoSuchResource)?;
            if !resource.is_resource() {
                return Err(IllegalAction::NotOnResource);
            }
            match resource.structure {
                None => Ok(Placement::Slot(index)),
                Some(existing)
                    if kind.rule().refunds_mine
                        && existing.player == player
                        && existing.kind == StructureKind::Mine =>
                {
                    Ok(Placement::Slot(index))
                }
                Some(_) => Err(IllegalAction::Occupied),
            }
        }
    }
}

/// Builds a structure during the acting player's build turn.
pub fn apply_build(
    player: PlayerId,
    planet: PlanetId,
    slot: Option<usize>,
    kind: StructureKind,
    game: &mut Game,
) -> Verdict {
    if game.phase != Phase::Build {
        return Err(IllegalAction::BuildOutsidePhase);
    }
    if game.turn != player {
        return Err(IllegalAction::BuildOutOfTurn);
    }
    if game.structures[player][kind.index()] == 0 {
        return Err(IllegalAction::Exhausted(kind));
    }
    if !has_enough_to_build(game, player, kind) {
        return Err(IllegalAction::Unaffordable(kind));
    }
    let placement = plan_placement(game, player, planet, slot, kind)?;

    let board = &mut game.board;
    match placement {
        Placement::Base => {
            board.planets[planet].base = Some(Base {
                player,
                used: false,
            });
        }
        Placement::Fleet(id) => {
            if let Some(fleet) = board.fleets.get_mut(&id) {
                fleet.planet = Some(planet);
                fleet.used = false;
            }
            board.planets[planet].fleets.push(id);
        }
        Placement::Slot(index) => {
            board.planets[planet].resources[index].structure = Some(Structure { player, kind });
        }
    }

    pay_to_build(game, player, kind);
    game.structures[player][kind.index()] -= 1;
    if kind.rule().refunds_mine {
        game.structures[player][StructureKind::Mine.index()] += 1;
    }
    settle(game, player, planet);
    add_points_for_structure(game, player, kind);
    calc_resources_to_collect(game, player);
    Ok(None)
}
