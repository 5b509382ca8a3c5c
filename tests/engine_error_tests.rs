// tests/engine_error_tests.rs
//
// Ошибки движка: каждое отклонённое действие оставляет стол нетронутым.

use poker_table::domain::{
    chips::Chips,
    table::{Table, TableOptions},
};
use poker_table::engine::{
    actions::{PlayerAction, PlayerActionKind},
    add_player, apply_action, remove_player, start_game, EngineError, RandomSource,
};

struct NoShuffle;

impl RandomSource for NoShuffle {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}

fn make_table(stacks: &[u64]) -> Table {
    let mut table = Table::new("t1", "p0", TableOptions::with_blinds(10, 20), None);
    for (i, &stack) in stacks.iter().enumerate() {
        add_player(&mut table, format!("p{i}"), Chips(stack)).unwrap();
    }
    table
}

/// Действие должно упасть с `expected`, не поменяв ни одного поля стола.
fn assert_rejected(table: &mut Table, action: PlayerAction, expected: EngineError) {
    let before = table.clone();
    assert_eq!(apply_action(table, action), Err(expected));
    assert_eq!(*table, before);
}

#[test]
fn raise_below_minimum_is_rejected() {
    let mut table = make_table(&[1000, 1000, 1000]);
    start_game(&mut table, &mut NoShuffle).unwrap();

    // Старшая ставка 20, минимум рейза 20 + BB = 40.
    assert_rejected(
        &mut table,
        PlayerAction::raise_to("p0", 39),
        EngineError::RaiseTooSmall { minimum: Chips(40) },
    );
    assert!(apply_action(&mut table, PlayerAction::raise_to("p0", 40)).is_ok());
}

#[test]
fn raise_beyond_stack_is_insufficient_funds() {
    let mut table = make_table(&[1000, 1000, 100]);
    table.seats.swap(0, 2);
    start_game(&mut table, &mut NoShuffle).unwrap();

    // Игрок p2 (100 фишек) пытается поднять до 101.
    assert_rejected(&mut table, PlayerAction::raise_to("p2", 101), EngineError::InsufficientFunds);
    assert!(apply_action(&mut table, PlayerAction::raise_to("p2", 100)).is_ok());
}

#[test]
fn check_facing_a_bet_and_call_with_nothing_to_call() {
    let mut table = make_table(&[1000, 1000]);
    start_game(&mut table, &mut NoShuffle).unwrap();

    // SB должен доставить 10.
    assert_rejected(&mut table, PlayerAction::check("p1"), EngineError::CannotCheck);
    apply_action(&mut table, PlayerAction::call("p1")).unwrap();

    // BB уже уравнен: коллировать нечего.
    assert_rejected(&mut table, PlayerAction::call("p0"), EngineError::CannotCall);
}

#[test]
fn acting_out_of_turn_is_rejected() {
    let mut table = make_table(&[1000, 1000, 1000]);
    start_game(&mut table, &mut NoShuffle).unwrap();

    assert_rejected(
        &mut table,
        PlayerAction::fold("p2"),
        EngineError::NotYourTurn("p2".into()),
    );
    assert_rejected(
        &mut table,
        PlayerAction::fold("ghost"),
        EngineError::PlayerNotAtTable("ghost".into()),
    );
}

#[test]
fn actions_without_live_hand_are_rejected() {
    let mut table = make_table(&[1000, 1000]);
    assert_rejected(&mut table, PlayerAction::fold("p0"), EngineError::NoHandInProgress);

    start_game(&mut table, &mut NoShuffle).unwrap();
    apply_action(&mut table, PlayerAction::fold("p1")).unwrap();

    // Раздача закончилась, следующая ещё не начата.
    assert_rejected(&mut table, PlayerAction::check("p0"), EngineError::HandOver);
}

#[test]
fn turn_check_precedes_action_validation() {
    let mut table = make_table(&[1000, 1000, 1000]);
    start_game(&mut table, &mut NoShuffle).unwrap();

    // Рейз мал, но сначала важно, что сейчас не ход p1.
    assert_rejected(
        &mut table,
        PlayerAction::raise_to("p1", 25),
        EngineError::NotYourTurn("p1".into()),
    );
}

#[test]
fn seating_errors() {
    let options = TableOptions {
        max_players: 2,
        ..TableOptions::with_blinds(10, 20)
    };
    let mut table = Table::new("t1", "p0", options, None);
    add_player(&mut table, "p0", Chips(100)).unwrap();

    assert_eq!(
        add_player(&mut table, "p0", Chips(100)),
        Err(EngineError::AlreadySeated("p0".into()))
    );
    add_player(&mut table, "p1", Chips(100)).unwrap();
    assert_eq!(add_player(&mut table, "p2", Chips(100)), Err(EngineError::TableFull));
    assert_eq!(table.seated_count(), 2);

    assert_eq!(
        remove_player(&mut table, "nobody"),
        Err(EngineError::PlayerNotAtTable("nobody".into()))
    );
}

#[test]
fn action_names_are_parsed_leniently() {
    assert_eq!(PlayerActionKind::parse(" Fold ", None), Ok(PlayerActionKind::Fold));
    assert_eq!(PlayerActionKind::parse("CHECK", None), Ok(PlayerActionKind::Check));
    assert_eq!(PlayerActionKind::parse("call", Some(Chips(5))), Ok(PlayerActionKind::Call));
    assert_eq!(
        PlayerActionKind::parse("raise", Some(Chips(80))),
        Ok(PlayerActionKind::Raise(Chips(80)))
    );
    assert_eq!(
        PlayerActionKind::parse("raise", None),
        Err(EngineError::RaiseAmountRequired)
    );
    assert_eq!(
        PlayerActionKind::parse("shove", None),
        Err(EngineError::UnknownAction("shove".into()))
    );
}
