//! Scenario tests for the rules engine.
//!
//! Each test drives the public dispatcher (`resolve_action`) through a short
//! game and checks the state and envelopes it produces.

mod common;

use common::{accept, build_turn_game, drafted_game, reject, two_seat_game};

use orbital::board::{
    Action, ActionKind, AgentId, AgentKind, AgentStatus, FleetId, Phase, StructureKind,
    STRUCTURE_RULES,
};
use orbital::protocol::{Event, Recipient, Response};
use orbital::resolve::{is_end_condition, resolve_action, IllegalAction};

#[test]
fn snake_draft_runs_forward_then_back() {
    let mut game = two_seat_game();
    let mut order = Vec::new();
    for (planet, slot) in [(0, 0), (1, 0), (1, 1), (0, 1)] {
        order.push(game.turn);
        accept(
            Action::place(game.turn, planet, slot, StructureKind::Mine),
            &mut game,
        );
    }
    assert_eq!(order, vec![0, 1, 1, 0]);
    assert_eq!(game.round, 1);
    assert_eq!(game.turn, 0);
    assert_eq!(game.phase, Phase::Resource);
    assert!(game.second_mines);
    assert_eq!(game.phase_done, vec![false, false]);
}

#[test]
fn placement_decrements_inventory_and_refreshes_income() {
    let game = drafted_game();
    let mines = StructureKind::Mine.index();
    assert_eq!(game.structures[0][mines], STRUCTURE_RULES[mines].max - 2);
    assert_eq!(game.structures[1][mines], STRUCTURE_RULES[mines].max - 2);
    assert_eq!(game.resource_collect[0], [2, 1, 0, 0]);
    assert_eq!(game.resource_collect[1], [0, 0, 3, 2]);
    assert!(game.board.planets[0].is_settled_by(0));
    assert!(game.board.planets[1].is_buildable_by(0));
}

#[test]
fn out_of_turn_actions_are_rejected_untouched() {
    let mut game = two_seat_game();
    reject(
        Action::place(1, 1, 0, StructureKind::Mine),
        &mut game,
        "it is not your turn",
    );
    reject(Action::turn_done(1), &mut game, "it is not your turn");

    let mut game = build_turn_game();
    reject(
        Action::build(1, 1, None, StructureKind::Base),
        &mut game,
        "This action must be done during your turn",
    );
    reject(
        Action::recruit(1, 1, AgentKind::Miner),
        &mut game,
        "You must recruit agents during your turn",
    );
    reject(Action::turn_done(1), &mut game, "it is not your turn");
}

#[test]
fn placement_requires_an_empty_resource() {
    let mut game = two_seat_game();
    reject(
        Action::place(0, 0, 2, StructureKind::Mine),
        &mut game,
        "You must place this on a resource",
    );
    reject(
        Action::place(0, 0, 7, StructureKind::Mine),
        &mut game,
        "That resource does not exist",
    );
    reject(
        Action::place(0, 9, 0, StructureKind::Mine),
        &mut game,
        "That planet does not exist",
    );
    accept(Action::place(0, 0, 0, StructureKind::Mine), &mut game);
    reject(
        Action::place(1, 0, 0, StructureKind::Mine),
        &mut game,
        "You cannot place this on another structure",
    );
}

#[test]
fn collecting_over_the_cap_is_rejected() {
    let mut game = drafted_game();
    game.resources[0] = [9, 0, 0, 0];
    reject(
        Action::collect(0),
        &mut game,
        "You must trade or 4 to 1 before collecting more",
    );

    // Landing exactly on the cap is fine.
    game.resources[0] = [8, 9, 0, 0];
    accept(Action::collect(0), &mut game);
    assert_eq!(game.resources[0], [10, 10, 0, 0]);
}

#[test]
fn resource_phase_waits_for_every_seat() {
    let mut game = drafted_game();

    accept(Action::collect(0), &mut game);
    assert_eq!(game.phase, Phase::Resource);
    assert_eq!(game.phase_done, vec![true, false]);
    reject(
        Action::collect(0),
        &mut game,
        "You have already collected resources",
    );

    accept(Action::collect(1), &mut game);
    assert_eq!(game.phase, Phase::Upkeep);
    assert_eq!(game.phase_done, vec![false, false]);
    assert_eq!(game.turn, 0);
    assert_eq!(game.resources, vec![[2, 1, 0, 0], [0, 0, 3, 2]]);
}

#[test]
fn upkeep_has_no_floor() {
    let mut game = drafted_game();
    accept(Action::collect(0), &mut game);
    accept(Action::collect(1), &mut game);

    accept(Action::pay_upkeep(1), &mut game);
    reject(
        Action::pay_upkeep(1),
        &mut game,
        "You have already paid upkeep",
    );
    accept(Action::pay_upkeep(0), &mut game);

    // Two mines cost one food each.
    assert_eq!(game.resource_upkeep[0], [0, 0, 0, 2]);
    assert_eq!(game.resources[0], [2, 1, 0, -2]);
    assert_eq!(game.resources[1], [0, 0, 3, 0]);
    assert_eq!(game.phase, Phase::Build);
    assert_eq!(game.phase_done, vec![false, false]);
}

#[test]
fn simultaneous_phases_reject_the_wrong_action() {
    let mut game = drafted_game();
    reject(
        Action::pay_upkeep(0),
        &mut game,
        "The upkeep phase is complete",
    );
    reject(
        Action::build(0, 0, None, StructureKind::Base),
        &mut game,
        "This action must be done during the build phase",
    );
    accept(Action::collect(0), &mut game);
    accept(Action::collect(1), &mut game);
    reject(
        Action::collect(0),
        &mut game,
        "The resource phase is complete",
    );
}

#[test]
fn factory_over_own_mine_refunds_the_mine() {
    let mut game = build_turn_game();
    game.turn = 1;
    let mines = StructureKind::Mine.index();
    let factories = StructureKind::Factory.index();
    let before = game.structures[1];
    let points = game.points[1].total();

    accept(
        Action::build(1, 1, Some(0), StructureKind::Factory),
        &mut game,
    );

    assert_eq!(game.structures[1][mines], before[mines] + 1);
    assert_eq!(game.structures[1][factories], before[factories] - 1);
    assert_eq!(game.resources[1], [5, 7, 7, 8]);
    assert_eq!(game.points[1].total(), points + 2);
    let structure = game.board.planets[1].resources[0].structure.unwrap();
    assert_eq!(structure.player, 1);
    assert_eq!(structure.kind, StructureKind::Factory);
    // The factory works fuel at the flat rate; the food mine is unchanged.
    assert_eq!(game.resource_collect[1], [0, 0, 2, 2]);
    // Building does not end the turn.
    assert_eq!(game.turn, 1);
}

#[test]
fn refunded_mines_reduce_upkeep() {
    let mut game = two_seat_game();
    game.round = 1;
    game.phase = Phase::Build;
    game.resources = vec![[8; 4]; 2];
    let mines = StructureKind::Mine.index();

    // No mines built yet, so the refund lifts the stock above its maximum.
    accept(
        Action::build(0, 0, Some(0), StructureKind::Factory),
        &mut game,
    );
    assert_eq!(game.structures[0][mines], STRUCTURE_RULES[mines].max + 1);
    assert_eq!(game.net_built(0, StructureKind::Mine), -1);
    assert_eq!(game.resources[0], [5, 7, 7, 8]);

    game.phase = Phase::Upkeep;
    game.turn = 0;
    let envelope = resolve_action(&Action::pay_upkeep(0), &mut game);
    // Factory upkeep [0, 1, 1, 0] plus a one-food credit for the spare mine.
    assert_eq!(envelope.response(), Some(&Response::PaidUpkeep([0, 1, 1, -1])));
    assert_eq!(game.resource_upkeep[0], [0, 1, 1, -1]);
    assert_eq!(game.resources[0], [5, 6, 6, 9]);
}

#[test]
fn factories_cannot_replace_another_players_mine() {
    let mut game = build_turn_game();
    reject(
        Action::build(0, 1, Some(0), StructureKind::Factory),
        &mut game,
        "You cannot place this on another structure",
    );
    reject(
        Action::build(0, 0, Some(0), StructureKind::Mine),
        &mut game,
        "You cannot place this on another structure",
    );
}

#[test]
fn builds_need_resources_and_inventory() {
    let mut game = build_turn_game();
    game.resources[0] = [2, 1, 2, 0];
    reject(
        Action::build(0, 0, None, StructureKind::Base),
        &mut game,
        "You do not have enough resources to build a new base",
    );

    let mut game = build_turn_game();
    game.structures[0][StructureKind::Embassy.index()] = 0;
    reject(
        Action::build(0, 0, Some(0), StructureKind::Embassy),
        &mut game,
        &IllegalAction::Exhausted(StructureKind::Embassy).to_string(),
    );
}

#[test]
fn fleets_launch_from_owned_bases() {
    let mut game = build_turn_game();
    reject(
        Action::build(0, 0, None, StructureKind::Fleet),
        &mut game,
        "You must build fleets where you have a base",
    );

    accept(Action::build(0, 0, None, StructureKind::Base), &mut game);
    assert_eq!(game.resources[0], [6, 7, 6, 7]);
    assert_eq!(game.board.planets[0].base.map(|b| b.player), Some(0));
    reject(
        Action::build(0, 0, None, StructureKind::Base),
        &mut game,
        "Only one base can be built on a planet",
    );

    accept(Action::build(0, 0, None, StructureKind::Fleet), &mut game);
    assert_eq!(game.resources[0], [4, 7, 4, 7]);
    let fleet = FleetId {
        player: 0,
        index: 0,
    };
    assert_eq!(game.board.fleets[&fleet].planet, Some(0));
    assert!(game.board.planets[0].fleets.contains(&fleet));
    assert_eq!(game.points[0].total(), 3);
}

#[test]
fn recruits_need_the_matching_structure() {
    let mut game = build_turn_game();
    reject(
        Action::recruit(0, 0, AgentKind::Explorer),
        &mut game,
        "You must recruit a new explorer at your base",
    );

    accept(Action::build(0, 0, None, StructureKind::Base), &mut game);
    let resources = game.resources[0];
    accept(Action::recruit(0, 0, AgentKind::Explorer), &mut game);
    accept(Action::recruit(0, 0, AgentKind::Miner), &mut game);

    let explorer = AgentId {
        player: 0,
        kind: AgentKind::Explorer,
    };
    assert_eq!(game.board.agents[&explorer].status, AgentStatus::OnBoard);
    assert_eq!(game.board.agents[&explorer].planet, Some(0));
    assert!(game.board.planets[0].agents.contains(&explorer));
    // Recruiting is free.
    assert_eq!(game.resources[0], resources);

    reject(
        Action::recruit(0, 0, AgentKind::Explorer),
        &mut game,
        "Your explorer is already on the board.",
    );
    game.board.agents.get_mut(&explorer).unwrap().status = AgentStatus::Dead;
    reject(
        Action::recruit(0, 0, AgentKind::Explorer),
        &mut game,
        "Your explorer cannot return during this game.",
    );
}

#[test]
fn build_round_wraps_into_resource_collection() {
    let mut game = build_turn_game();
    accept(Action::turn_done(0), &mut game);
    assert_eq!(game.turn, 1);
    assert_eq!(game.round, 1);
    accept(Action::turn_done(1), &mut game);
    assert_eq!(game.turn, 0);
    assert_eq!(game.round, 2);
    assert_eq!(game.phase, Phase::Resource);
}

#[test]
fn end_condition_depends_only_on_round() {
    for round in 0..6 {
        let mut game = build_turn_game();
        game.round = round;
        assert_eq!(is_end_condition(&game), round >= 3);
        game.phase = Phase::Upkeep;
        game.turn = 1;
        game.resources = vec![[0; 4]; 2];
        assert_eq!(is_end_condition(&game), round >= 3);
    }
}

#[test]
fn finished_match_answers_game_end() {
    let mut game = build_turn_game();
    game.round = 3;
    let before = game.clone();

    // Even an out-of-turn or unknown action just hears that the game is over.
    for action in [
        Action::turn_done(1),
        Action::collect(0),
        Action::new(0, ActionKind::Unknown("trade".into())),
    ] {
        let envelope = resolve_action(&action, &mut game);
        assert_eq!(envelope.event, Event::GameEnd);
        assert_eq!(envelope.to, Recipient::All);
    }
    assert_eq!(game, before);

    let envelope = resolve_action(&Action::loading_done(1), &mut game);
    assert_eq!(envelope.event, Event::LoadingDone);
}

#[test]
fn envelopes_route_by_outcome() {
    let mut game = drafted_game();

    let envelope = resolve_action(&Action::collect(0), &mut game);
    assert_eq!(envelope.to, Recipient::All);
    assert_eq!(envelope.event, Event::GameEvent);
    assert_eq!(envelope.response(), Some(&Response::Collected([2, 1, 0, 0])));

    let envelope = resolve_action(&Action::collect(0), &mut game);
    assert_eq!(envelope.to, Recipient::One);
    assert_eq!(envelope.event, Event::IllegalAction);

    let envelope = resolve_action(&Action::new(5, ActionKind::TurnDone), &mut game);
    assert_eq!(envelope.reason(), Some("You are not seated in this game"));

    let envelope = resolve_action(&Action::loading_done(0), &mut game);
    assert_eq!(envelope.to, Recipient::One);
    assert_eq!(envelope.event, Event::LoadingDone);

    let json: serde_json::Value =
        serde_json::from_str(&resolve_action(&Action::collect(1), &mut game).to_json().unwrap())
            .unwrap();
    assert_eq!(json["to"], "all");
    assert_eq!(json["event"], "game event");
    assert_eq!(json["content"]["response"]["collected"], serde_json::json!([0, 0, 3, 2]));
    assert_eq!(json["content"]["action"]["actiontype"], "collect_resources");
    assert_eq!(json["content"]["game"]["phase"], "upkeep");
}

#[test]
fn stored_income_goes_stale_until_refreshed() {
    let mut game = build_turn_game();
    // Bo's placement refreshed only bo's income; a later build by ann does
    // not touch it.
    let stale = game.resource_collect[1];
    accept(
        Action::build(0, 0, Some(0), StructureKind::Factory),
        &mut game,
    );
    assert_eq!(game.resource_collect[1], stale);
    assert_eq!(game.resource_collect[0], [2, 1, 0, 0]);
}
