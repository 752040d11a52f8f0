//! Shared fixtures for the integration test crates.

#![allow(dead_code)]

use orbital::board::{
    Action, BorderState, Game, Phase, Planet, ResourceKind, ResourceSlot, StructureKind,
};
use orbital::config::Rules;
use orbital::resolve::resolve_action;

/// Two seats, "ann" and "bo", on three planets.
///
/// Planet 0 (explored): metal 2, water 1, barren. Open to 1, blocked to 2.
/// Planet 1 (explored): fuel 3, food 2. Open to 0, unexplored to 2.
/// Planet 2 (unexplored): metal 1.
pub fn two_seat_game() -> Game {
    let mut p0 = Planet::new(
        1,
        true,
        vec![
            ResourceSlot::new(ResourceKind::Metal, 2),
            ResourceSlot::new(ResourceKind::Water, 1),
            ResourceSlot::barren(),
        ],
        2,
    );
    let mut p1 = Planet::new(
        2,
        true,
        vec![
            ResourceSlot::new(ResourceKind::Fuel, 3),
            ResourceSlot::new(ResourceKind::Food, 2),
        ],
        2,
    );
    let mut p2 = Planet::new(1, false, vec![ResourceSlot::new(ResourceKind::Metal, 1)], 2);
    p0.set_border(1, BorderState::Open);
    p0.set_border(2, BorderState::Blocked);
    p1.set_border(0, BorderState::Open);
    p1.set_border(2, BorderState::Unexplored);
    p2.set_border(0, BorderState::Blocked);
    p2.set_border(1, BorderState::Unexplored);

    Game::new(
        vec!["ann".into(), "bo".into()],
        vec![p0, p1, p2],
        Rules::default(),
    )
}

/// The opening draft used by most scenarios: ann mines metal and water on
/// planet 0, bo mines fuel and food on planet 1.
pub fn drafted_game() -> Game {
    let mut game = two_seat_game();
    for action in [
        Action::place(0, 0, 0, StructureKind::Mine),
        Action::place(1, 1, 0, StructureKind::Mine),
        Action::place(1, 1, 1, StructureKind::Mine),
        Action::place(0, 0, 1, StructureKind::Mine),
    ] {
        let envelope = resolve_action(&action, &mut game);
        assert!(!envelope.is_illegal(), "{:?}: {:?}", action, envelope.reason());
    }
    assert_eq!(game.phase, Phase::Resource);
    game
}

/// `drafted_game` jumped forward to ann's build turn with 8 of everything.
pub fn build_turn_game() -> Game {
    let mut game = drafted_game();
    game.phase = Phase::Build;
    game.turn = 0;
    game.resources = vec![[8; 4]; 2];
    game
}

/// Resolves `action` and panics if it was rejected.
pub fn accept(action: Action, game: &mut Game) {
    let envelope = resolve_action(&action, game);
    assert!(
        !envelope.is_illegal(),
        "{:?} rejected: {:?}",
        action,
        envelope.reason()
    );
}

/// Resolves `action`, asserts it was rejected with `reason`, and checks the
/// game was left untouched.
pub fn reject(action: Action, game: &mut Game, reason: &str) {
    let before = game.clone();
    let envelope = resolve_action(&action, game);
    assert_eq!(envelope.reason(), Some(reason), "{:?}", action);
    assert_eq!(*game, before, "rejected {:?} mutated the game", action);
}
