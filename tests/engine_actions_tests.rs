//! Тесты действий игроков: fold / check / call / raise, закрытие улицы,
//! сохранение фишек на случайных последовательностях действий.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use poker_table::domain::{
    chips::Chips,
    hand::Street,
    player::PlayerStatus,
    table::{PotMode, Table, TableOptions},
};
use poker_table::engine::{
    actions::{PlayerAction, PlayerActionKind},
    add_player, apply_action, is_round_complete, start_game, start_new_hand, HandEventKind,
    HandStatus, RandomSource,
};
use poker_table::infra::DeterministicRng;

struct NoShuffle;

impl RandomSource for NoShuffle {
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}

fn make_table(stacks: &[u64], pot_mode: PotMode) -> Table {
    let options = TableOptions {
        pot_mode,
        ..TableOptions::with_blinds(10, 20)
    };
    let mut table = Table::new("t1", "p0", options, None);
    for (i, &stack) in stacks.iter().enumerate() {
        add_player(&mut table, format!("p{i}"), Chips(stack)).unwrap();
    }
    table
}

fn act(table: &mut Table, who: &str, kind: PlayerActionKind) -> HandStatus {
    apply_action(table, PlayerAction::new(who, kind)).unwrap()
}

#[test]
fn call_matches_the_highest_bet() {
    let mut table = make_table(&[1000, 1000, 1000], PotMode::Shared);
    start_game(&mut table, &mut NoShuffle).unwrap();

    act(&mut table, "p0", PlayerActionKind::Call);
    let p0 = table.seat("p0").unwrap();
    assert_eq!((p0.stack, p0.current_bet), (Chips(980), Chips(20)));
    assert!(p0.has_acted);
    assert_eq!(table.current_player_id().map(String::as_str), Some("p1"));
}

#[test]
fn raise_sets_new_total_and_reopens_action() {
    let mut table = make_table(&[1000, 1000, 1000], PotMode::Shared);
    start_game(&mut table, &mut NoShuffle).unwrap();

    act(&mut table, "p0", PlayerActionKind::Call);
    act(&mut table, "p1", PlayerActionKind::Call);
    // BB повышает до 60: остальные должны ответить ещё раз.
    act(&mut table, "p2", PlayerActionKind::Raise(Chips(60)));

    let p2 = table.seat("p2").unwrap();
    assert_eq!((p2.stack, p2.current_bet), (Chips(940), Chips(60)));
    assert_eq!(table.last_raiser.as_deref(), Some("p2"));
    assert_eq!(table.street, Street::Preflop);
    assert!(!is_round_complete(&table));

    act(&mut table, "p0", PlayerActionKind::Call);
    act(&mut table, "p1", PlayerActionKind::Call);
    assert_eq!(table.street, Street::Flop);
    assert_eq!(table.pot, Chips(180));
}

#[test]
fn short_call_goes_all_in_for_less() {
    let mut table = make_table(&[1000, 1000, 50], PotMode::Shared);
    table.seats.swap(0, 2); // короткий стек ходит первым
    start_game(&mut table, &mut NoShuffle).unwrap();
    assert_eq!(table.current_player_id().map(String::as_str), Some("p2"));

    act(&mut table, "p2", PlayerActionKind::Call);
    act(&mut table, "p1", PlayerActionKind::Call);
    act(&mut table, "p0", PlayerActionKind::Raise(Chips(200)));
    // p2 ставил 20, может добавить только 30.
    act(&mut table, "p2", PlayerActionKind::Call);

    let short = table.seat("p2").unwrap();
    assert_eq!(short.stack, Chips::ZERO);
    assert_eq!(short.status, PlayerStatus::AllIn);
    assert_eq!(short.current_bet, Chips(50));
}

#[test]
fn raise_of_whole_stack_is_all_in() {
    let mut table = make_table(&[1000, 300], PotMode::Shared);
    start_game(&mut table, &mut NoShuffle).unwrap();

    // SB (p1) ставил 10 и остаётся с 290: рейз до 300 – весь стек.
    act(&mut table, "p1", PlayerActionKind::Raise(Chips(300)));
    let p1 = table.seat("p1").unwrap();
    assert_eq!(p1.status, PlayerStatus::AllIn);
    assert_eq!(p1.stack, Chips::ZERO);

    // Единственный активный уравнивает и дальше чекает сам с собой.
    let mut status = act(&mut table, "p0", PlayerActionKind::Call);
    for street in [Street::Flop, Street::Turn, Street::River] {
        assert_eq!(status, HandStatus::Ongoing);
        assert_eq!(table.street, street);
        assert_eq!(table.current_player_id().map(String::as_str), Some("p0"));
        status = act(&mut table, "p0", PlayerActionKind::Check);
    }
    let summary = status.summary().unwrap();
    assert_eq!(table.board.len(), 5);
    assert_eq!(summary.total_pot, Chips(600));
    assert_eq!(table.total_chips() + summary.remainder, Chips(1300));
}

#[test]
fn folding_to_one_player_ends_hand_immediately() {
    let mut table = make_table(&[1000, 1000, 1000], PotMode::Shared);
    start_game(&mut table, &mut NoShuffle).unwrap();

    act(&mut table, "p0", PlayerActionKind::Raise(Chips(100)));
    act(&mut table, "p1", PlayerActionKind::Fold);
    let status = act(&mut table, "p2", PlayerActionKind::Fold);

    let summary = status.summary().unwrap();
    assert!(summary.uncontested);
    assert_eq!(summary.paid_to("p0"), Chips(130));
    assert_eq!(table.seat("p0").unwrap().stack, Chips(1030));
    assert!(table.board.is_empty());
    assert_eq!(table.street, Street::Showdown);
}

#[test]
fn round_completion_check_is_idempotent() {
    let mut table = make_table(&[1000, 1000, 1000], PotMode::Shared);
    start_game(&mut table, &mut DeterministicRng::from_seed(3)).unwrap();

    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..40 {
        let first = is_round_complete(&table);
        let snapshot = table.clone();
        assert_eq!(is_round_complete(&table), first);
        assert_eq!(table, snapshot);

        if table.street == Street::Showdown {
            start_new_hand(&mut table, &mut DeterministicRng::from_seed(4)).unwrap();
            continue;
        }
        let Some(who) = table.current_player_id().cloned() else {
            break;
        };
        let kind = random_action(&table, &mut rng);
        let _ = apply_action(&mut table, PlayerAction::new(who, kind));
    }
}

#[test]
fn history_records_each_action() {
    let mut table = make_table(&[1000, 1000], PotMode::Shared);
    start_game(&mut table, &mut NoShuffle).unwrap();
    act(&mut table, "p1", PlayerActionKind::Call);
    act(&mut table, "p0", PlayerActionKind::Check);

    let acted: Vec<(String, PlayerActionKind)> = table
        .history
        .kinds()
        .filter_map(|k| match k {
            HandEventKind::PlayerActed { player_id, action, .. } => Some((player_id.clone(), *action)),
            _ => None,
        })
        .collect();
    assert_eq!(
        acted,
        vec![
            ("p1".to_string(), PlayerActionKind::Call),
            ("p0".to_string(), PlayerActionKind::Check),
        ]
    );
    assert!(table
        .history
        .kinds()
        .any(|k| matches!(k, HandEventKind::BoardDealt { street: Street::Flop, cards } if cards.len() == 3)));
}

/// Случайное (не обязательно легальное) действие текущего игрока.
fn random_action(table: &Table, rng: &mut StdRng) -> PlayerActionKind {
    let highest = table.highest_bet();
    match rng.gen_range(0..10) {
        0 => PlayerActionKind::Fold,
        1..=3 => PlayerActionKind::Check,
        4..=6 => PlayerActionKind::Call,
        _ => PlayerActionKind::Raise(highest + Chips(rng.gen_range(0..120))),
    }
}

#[test]
fn chips_are_conserved_over_random_hands() {
    for seed in 0..60u64 {
        let mode = if seed % 2 == 0 { PotMode::Shared } else { PotMode::SidePots };
        let mut table = make_table(&[400, 250, 900, 60], mode);
        let mut deck_rng = DeterministicRng::from_seed(seed);
        let mut rng = StdRng::seed_from_u64(seed);

        let mut expected = table.total_chips();
        let mut status = start_game(&mut table, &mut deck_rng).unwrap();

        for _ in 0..400 {
            match status {
                HandStatus::Waiting => break,
                HandStatus::Finished(_) => {
                    status = start_new_hand(&mut table, &mut deck_rng).unwrap();
                    // Выбывшие уходят с нулевым стеком – сумма не меняется.
                    assert_eq!(table.total_chips(), expected);
                    continue;
                }
                HandStatus::Ongoing => {}
            }

            let who = table.current_player_id().cloned().unwrap();
            let seat = table.seat(&who).unwrap();
            assert_eq!(seat.status, PlayerStatus::Active, "ход всегда у активного игрока");

            let kind = random_action(&table, &mut rng);
            let before = table.clone();
            match apply_action(&mut table, PlayerAction::new(who, kind)) {
                Err(_) => assert_eq!(table, before, "ошибка не должна менять стол"),
                Ok(next) => {
                    let lost = next.summary().map_or(Chips::ZERO, |s| s.remainder);
                    assert_eq!(table.total_chips() + lost, expected);
                    expected = table.total_chips();
                    status = next;
                }
            }
        }
    }
}
