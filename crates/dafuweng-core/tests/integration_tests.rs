//! Integration tests for the Dafuweng game engine.
//!
//! These tests verify complete game flows: movement, decisions, fines,
//! jail, bankruptcy, and the consistency invariants between the board
//! and the player ledgers.

use dafuweng_core::*;
use pretty_assertions::assert_eq;

const BOARD_DATA: &str = "\
U Taipei 5000 3000 500 1000 2000 4000 8000
C Keelung 2000 300
R Ferry 1500 120
U Taoyuan 4000 2500 400 800 1600 3200 6400
J Jail
C Hsinchu 2000 300
U Taichung 4500 2800 450 900 1800 3600 7200
C Tainan 2000 300
";

fn parsed_board() -> Board {
    let board = Board::parse(BOARD_DATA);
    assert_eq!(board.skipped_records(), 0);
    board
}

fn new_game(names: &[&str]) -> GameState {
    GameState::with_seed(
        parsed_board(),
        names.iter().map(|n| n.to_string()).collect(),
        GameRules::default(),
        1234,
    )
}

/// Ownership must be mirrored on both sides, bankrupt players own
/// nothing, and every token sits in exactly one occupancy slot.
fn assert_consistent(game: &GameState) {
    for unit in game.board.units() {
        if let Some(owner) = unit.owner {
            let player = game.get_player(owner).expect("owner exists");
            assert!(
                player.owned_units.contains(&unit.id),
                "unit {} owner {} does not list it",
                unit.id,
                owner
            );
        }
    }
    for player in game.players.iter() {
        for &position in &player.owned_units {
            assert_eq!(game.board.get(position).unwrap().owner, Some(player.id));
        }
        if player.status == PlayerStatus::Bankrupt {
            assert_eq!(player.unit_count(), 0, "bankrupt player owns units");
        }
        let slots = game
            .board
            .units()
            .iter()
            .filter(|unit| unit.occupants.contains(&player.id))
            .count();
        assert_eq!(slots, 1, "player {} occupies {} slots", player.id, slots);
    }
}

#[test]
fn test_pass_start_bonus_on_wrap() {
    // 8 units, position 6, roll 5 -> position 3, crossing the start corner
    let mut game = new_game(&["A", "B"]);
    game.players.get_mut(0).unwrap().move_to(6, &mut game.board);

    let events = game.resolve_roll(0, 5).unwrap();

    assert!(events.contains(&GameEvent::PassedStart {
        player: 0,
        bonus: 2000
    }));
    assert_eq!(game.players.get(0).unwrap().position, 3);
    // landed on an affordable upgradable lot, so the bonus is banked
    // while the purchase decision is pending
    assert_eq!(game.phase, TurnPhase::AwaitingPurchase { unit: 3 });
    assert_eq!(game.players.get(0).unwrap().cash, 32000);
}

#[test]
fn test_unaffordable_unit_is_not_offered() {
    // $100 in hand, $1500 price tag
    let mut game = new_game(&["A", "B"]);
    game.players.get_mut(0).unwrap().cash = 100;

    let events = game.resolve_roll(0, 2).unwrap();

    assert_eq!(game.board.get(2).unwrap().owner, None);
    assert!(!matches!(game.phase, TurnPhase::AwaitingPurchase { .. }));
    // the turn resolved fully and moved on
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::TurnEnded { .. })));
    assert_eq!(game.current_player, 1);
}

#[test]
fn test_collection_set_fine_counts_the_whole_set() {
    // A owns three collection units at $300 each
    let mut game = new_game(&["A", "B"]);
    for position in [1, 5, 7] {
        let owner = game.players.get_mut(0).unwrap();
        owner.add_unit(position, &mut game.board);
    }
    assert_eq!(
        game.players.get(0).unwrap().collection_units(&game.board),
        3
    );

    // A takes an inert turn onto its own lot, then B lands on it
    let events = game.resolve_roll(0, 1).unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::TurnEnded { .. })));
    let events = game.resolve_roll(1, 1).unwrap();

    assert!(events.contains(&GameEvent::FinePaid {
        payer: 1,
        owner: 0,
        amount: 900
    }));
    assert_eq!(game.players.get(1).unwrap().cash, 30000 - 900);
    assert_eq!(game.players.get(0).unwrap().cash, 30000 + 900);
    assert_consistent(&game);
}

#[test]
fn test_bankruptcy_decrements_active_count_once() {
    // a fine sinks the payer to negative cash
    let mut game = new_game(&["A", "B", "C"]);
    game.players
        .get_mut(0)
        .unwrap()
        .add_unit(1, &mut game.board);
    game.players.get_mut(1).unwrap().cash = 280;

    game.resolve_roll(0, 1).unwrap(); // A: inert landing on its own lot
    let events = game.resolve_roll(1, 1).unwrap();

    assert!(events.contains(&GameEvent::FinePaid {
        payer: 1,
        owner: 0,
        amount: 300
    }));
    assert!(events.contains(&GameEvent::WentBankrupt {
        player: 1,
        released_units: 0
    }));
    assert_eq!(game.players.get(1).unwrap().cash, 0);
    assert_eq!(game.players.active_count(), 2);
    assert!(!game.is_finished());
    assert_consistent(&game);
}

#[test]
fn test_jail_round_trip_with_three_players() {
    // one full rotation with a jailed player in it
    let mut game = new_game(&["A", "B", "C"]);

    game.resolve_roll(0, 4).unwrap(); // A lands on the jail
    assert_eq!(game.players.get(0).unwrap().status, PlayerStatus::InJail);

    game.resolve_roll(1, 4).unwrap(); // B joins A in jail
    game.resolve_roll(2, 4).unwrap(); // C too

    let events = game.resolve_roll(0, 6).unwrap();
    assert_eq!(events[0], GameEvent::JailSkipped { player: 0 });
    assert_eq!(game.players.get(0).unwrap().position, 4);
    assert_eq!(game.players.get(0).unwrap().status, PlayerStatus::Normal);
    assert_eq!(game.current_player, 1);
    assert_consistent(&game);
}

#[test]
fn test_released_units_can_be_bought_again() {
    let mut game = new_game(&["A", "B"]);

    // A buys the lot at position 1, then goes bankrupt on a crafted fine
    game.resolve_roll(0, 1).unwrap();
    game.apply_action(0, TurnAction::Buy).unwrap();
    game.players
        .get_mut(1)
        .unwrap()
        .add_unit(3, &mut game.board);
    game.players.get_mut(0).unwrap().cash = 100;

    game.resolve_roll(1, 4).unwrap(); // B visits the jail, stays solvent
    let events = game.resolve_roll(0, 2).unwrap(); // A: 1 -> 3, fine 400
    assert!(events.contains(&GameEvent::WentBankrupt {
        player: 0,
        released_units: 1
    }));

    // the released lot is unowned again at level 1
    let lot = game.board.get(1).unwrap();
    assert_eq!(lot.owner, None);
    assert_eq!(lot.level(), Some(1));
    // sole survivor ends the game
    assert!(game.is_finished());
    assert_eq!(game.winner(), Some(1));
}

#[test]
fn test_shipped_map_parses_cleanly() {
    let board = Board::load(concat!(env!("CARGO_MANIFEST_DIR"), "/../../map.dat"))
        .expect("map.dat ships with the workspace");
    assert!(board.len() >= 8);
    assert_eq!(board.skipped_records(), 0);
    // ids match positions
    for (position, unit) in board.units().iter().enumerate() {
        assert_eq!(unit.id, position);
    }
    // at least one jail so the InJail path is reachable
    assert!(board.units().iter().any(|u| u.type_code() == 'J'));
}

#[test]
fn test_random_game_stays_consistent() {
    let mut game = GameState::with_seed(
        parsed_board(),
        vec!["A".into(), "B".into(), "C".into(), "D".into()],
        GameRules::default(),
        99,
    );

    let max_iterations = 500;
    let mut iterations = 0;

    while !game.is_finished() && iterations < max_iterations {
        let player = game.current_player;
        let action = game
            .valid_actions(player)
            .into_iter()
            .next()
            .expect("an unfinished game always offers an action");
        game.apply_action(player, action)
            .expect("valid action applies");
        assert_consistent(&game);
        iterations += 1;
    }

    assert!(game.players.active_count() >= 1);
    if game.is_finished() {
        let winner = game.winner().expect("a played-out game has a winner");
        assert!(game.get_player(winner).unwrap().is_active());
    }
}
