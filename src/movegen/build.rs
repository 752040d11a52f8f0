//! Build-phase candidate generation.
//!
//! Enumerates every build and recruit the acting player could attempt. Most
//! candidates are illegal (wrong slot, no money, no base); callers filter
//! them by resolving against a copy of the game.

use crate::board::{Action, Game, Occupancy, PlayerId, ALL_AGENTS, ALL_STRUCTURES};

/// Returns every build and recruit action `player` could try this turn.
pub fn build_candidates(player: PlayerId, game: &Game) -> Vec<Action> {
    let mut actions = Vec::new();

    for (planet_id, planet) in game.board.planets.iter().enumerate() {
        for kind in ALL_STRUCTURES {
            if game.structures[player][kind.index()] == 0 {
                continue;
            }
            match kind.rule().occupancy {
                Occupancy::Planet | Occupancy::Hangar => {
                    actions.push(Action::build(player, planet_id, None, kind));
                }
                Occupancy::Slot => {
                    for (slot, resource) in planet.resources.iter().enumerate() {
                        if resource.is_resource() {
                            actions.push(Action::build(player, planet_id, Some(slot), kind));
                        }
                    }
                }
            }
        }

        for agent in ALL_AGENTS {
            if planet.player_has_structure(player, agent.recruited_at()) {
                actions.push(Action::recruit(player, planet_id, agent));
            }
        }
    }

    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{ActionKind, StructureKind};
    use crate::resolve::test_support::build_phase_game;

    #[test]
    fn candidates_cover_slots_and_planets() {
        let game = build_phase_game();
        let actions = build_candidates(0, &game);

        // Five resource slots times three slot kinds, plus base and fleet on
        // each of three planets. No structures yet, so no recruits.
        assert_eq!(actions.len(), 5 * 3 + 3 * 2);
        assert!(actions
            .iter()
            .all(|a| !matches!(a.kind, ActionKind::Recruit { .. })));
    }

    #[test]
    fn exhausted_kinds_are_skipped() {
        let mut game = build_phase_game();
        game.structures[0][StructureKind::Mine.index()] = 0;
        let actions = build_candidates(0, &game);
        assert!(!actions.iter().any(|a| matches!(
            a.kind,
            ActionKind::Build {
                structure: StructureKind::Mine,
                ..
            }
        )));
    }
}
