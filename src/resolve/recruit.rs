//! Agent recruitment.

use crate::board::{AgentId, AgentKind, AgentStatus, Game, Phase, PlanetId, PlayerId};

use super::{IllegalAction, Verdict};

/// Brings `player`'s agent of `kind` onto `planet`.
///
/// The player must own the structure the agent is recruited at on that
/// planet. Recruiting is free.
pub fn apply_recruit(
    player: PlayerId,
    planet: PlanetId,
    kind: AgentKind,
    game: &mut Game,
) -> Verdict {
    if game.phase != Phase::Build {
        return Err(IllegalAction::RecruitOutsidePhase);
    }
    if game.turn != player {
        return Err(IllegalAction::RecruitOutOfTurn);
    }

    let id = AgentId::new(player, kind);
    let agent = game
        .board
        .agents
        .get(&id)
        .ok_or(IllegalAction::NoSuchAgent)?;
    match agent.status {
        AgentStatus::Dead => return Err(IllegalAction::AgentDead(kind)),
        AgentStatus::OnBoard => return Err(IllegalAction::AgentOnBoard(kind)),
        AgentStatus::OffBoard => {}
    }

    let target = game.board.planet(planet).ok_or(IllegalAction::NoSuchPlanet)?;
    if !target.player_has_structure(player, kind.recruited_at()) {
        return Err(IllegalAction::RecruitWithoutStructure(kind));
    }

    if let Some(agent) = game.board.agents.get_mut(&id) {
        agent.planet = Some(planet);
        agent.used = false;
        agent.status = AgentStatus::OnBoard;
    }
    game.board.planets[planet].agents.push(id);
    Ok(None)
}
