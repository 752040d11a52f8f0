//! Simultaneous resource and upkeep phases.
//!
//! Each seat acts once per phase in any order. The last seat to act moves the
//! game on to the next phase.

use crate::board::{Game, Phase, PlayerId};
use crate::economy::{calc_resource_upkeep, resources_to_collect};
use crate::protocol::Response;

use super::phase::update_phase;
use super::{IllegalAction, Verdict};

/// Adds the player's current income to their resources.
///
/// Rejected if any resource would end above `rules.resource_cap`; the player
/// has to trade down first.
pub fn apply_collect_resources(player: PlayerId, game: &mut Game) -> Verdict {
    if game.phase != Phase::Resource {
        return Err(IllegalAction::ResourcePhaseOver);
    }
    if game.phase_done[player] {
        return Err(IllegalAction::AlreadyCollected);
    }

    let collect = resources_to_collect(game, player);
    let cap = game.rules.resource_cap;
    if game.resources[player]
        .iter()
        .zip(collect)
        .any(|(&have, add)| have + add > cap)
    {
        return Err(IllegalAction::OverResourceCap);
    }

    game.resource_collect[player] = collect;
    for (have, add) in game.resources[player].iter_mut().zip(collect) {
        *have += add;
    }
    game.phase_done[player] = true;
    update_phase(game);
    Ok(Some(Response::Collected(collect)))
}

/// Pays upkeep for every structure the player has built.
///
/// There is no floor: resources may go negative.
pub fn apply_pay_upkeep(player: PlayerId, game: &mut Game) -> Verdict {
    if game.phase != Phase::Upkeep {
        return Err(IllegalAction::UpkeepPhaseOver);
    }
    if game.phase_done[player] {
        return Err(IllegalAction::AlreadyPaid);
    }

    calc_resource_upkeep(game, player);
    let upkeep = game.resource_upkeep[player];
    for (have, pay) in game.resources[player].iter_mut().zip(upkeep) {
        *have -= pay;
    }
    game.phase_done[player] = true;
    update_phase(game);
    Ok(Some(Response::PaidUpkeep(upkeep)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Structure, StructureKind};
    use crate::resolve::test_support::small_game;

    fn resource_phase_game() -> Game {
        let mut game = small_game();
        game.round = 1;
        game.phase = Phase::Resource;
        // Player 0 mines metal 2; player 1 mines food 2.
        game.board.planets[0].resources[0].structure = Some(Structure {
            player: 0,
            kind: StructureKind::Mine,
        });
        game.board.planets[1].resources[1].structure = Some(Structure {
            player: 1,
            kind: StructureKind::Mine,
        });
        game.structures[0][StructureKind::Mine.index()] = 9;
        game.structures[1][StructureKind::Mine.index()] = 9;
        game
    }

    #[test]
    fn collect_adds_income_and_reports_it() {
        let mut game = resource_phase_game();
        assert_eq!(
            apply_collect_resources(0, &mut game),
            Ok(Some(Response::Collected([2, 0, 0, 0])))
        );
        assert_eq!(game.resources[0], [2, 0, 0, 0]);
        assert_eq!(game.resource_collect[0], [2, 0, 0, 0]);
        assert_eq!(game.phase_done, vec![true, false]);
        assert_eq!(game.phase, Phase::Resource);
    }

    #[test]
    fn collect_only_once_per_phase() {
        let mut game = resource_phase_game();
        apply_collect_resources(0, &mut game).unwrap();
        assert_eq!(
            apply_collect_resources(0, &mut game),
            Err(IllegalAction::AlreadyCollected)
        );
    }

    #[test]
    fn collect_rejects_over_cap() {
        let mut game = resource_phase_game();
        game.resources[0] = [9, 0, 0, 0];
        let before = game.clone();
        assert_eq!(
            apply_collect_resources(0, &mut game),
            Err(IllegalAction::OverResourceCap)
        );
        assert_eq!(game, before);

        game.resources[0] = [8, 10, 10, 10];
        assert!(apply_collect_resources(0, &mut game).is_ok());
        assert_eq!(game.resources[0], [10, 10, 10, 10]);
    }

    #[test]
    fn last_collector_advances_to_upkeep() {
        let mut game = resource_phase_game();
        game.turn = 1;
        apply_collect_resources(1, &mut game).unwrap();
        apply_collect_resources(0, &mut game).unwrap();
        assert_eq!(game.phase, Phase::Upkeep);
        assert_eq!(game.turn, 0);
        assert_eq!(game.phase_done, vec![false, false]);
    }

    #[test]
    fn collect_outside_resource_phase() {
        let mut game = small_game();
        assert_eq!(
            apply_collect_resources(0, &mut game),
            Err(IllegalAction::ResourcePhaseOver)
        );
    }

    #[test]
    fn upkeep_may_go_negative() {
        let mut game = resource_phase_game();
        game.phase = Phase::Upkeep;
        assert_eq!(
            apply_pay_upkeep(0, &mut game),
            Ok(Some(Response::PaidUpkeep([0, 0, 0, 1])))
        );
        assert_eq!(game.resources[0], [0, 0, 0, -1]);
        assert_eq!(game.resource_upkeep[0], [0, 0, 0, 1]);
        assert_eq!(
            apply_pay_upkeep(0, &mut game),
            Err(IllegalAction::AlreadyPaid)
        );
    }

    #[test]
    fn last_payer_advances_to_build() {
        let mut game = resource_phase_game();
        game.phase = Phase::Upkeep;
        apply_pay_upkeep(0, &mut game).unwrap();
        apply_pay_upkeep(1, &mut game).unwrap();
        assert_eq!(game.phase, Phase::Build);
        assert_eq!(game.turn, 0);
        assert_eq!(
            apply_pay_upkeep(0, &mut game),
            Err(IllegalAction::UpkeepPhaseOver)
        );
    }
}
