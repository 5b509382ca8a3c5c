//! RNG tests для poker-table
//!
//! Эти тесты проверяют:
//! - детерминированность DeterministicRng
//! - различие seed → различие колод
//! - разные, но воспроизводимые колоды для разных столов
//! - отсутствие повторяющихся карт после shuffle

use std::collections::HashSet;

use poker_table::domain::card::Card;
use poker_table::domain::deck::Deck;
use poker_table::engine::RandomSource;
use poker_table::infra::{DeterministicRng, SystemRng};

fn deck_with<R: RandomSource>(rng: &mut R) -> Vec<Card> {
    Deck::shuffled(rng).cards
}

#[test]
fn same_seed_same_shuffle() {
    let mut r1 = DeterministicRng::from_seed(123);
    let mut r2 = DeterministicRng::from_seed(123);

    for _ in 0..5 {
        assert_eq!(deck_with(&mut r1), deck_with(&mut r2));
    }
}

#[test]
fn different_seeds_give_different_decks() {
    let a = deck_with(&mut DeterministicRng::from_seed(1));
    let b = deck_with(&mut DeterministicRng::from_seed(2));
    assert_ne!(a, b);
}

#[test]
fn consecutive_hands_get_fresh_orders() {
    let mut rng = DeterministicRng::from_seed(9);
    let first = deck_with(&mut rng);
    let second = deck_with(&mut rng);
    assert_ne!(first, second);
}

#[test]
fn per_table_rng_depends_on_table_name() {
    let alpha = deck_with(&mut DeterministicRng::for_table(42, "alpha"));
    let beta = deck_with(&mut DeterministicRng::for_table(42, "beta"));
    assert_ne!(alpha, beta);

    let alpha_again = deck_with(&mut DeterministicRng::for_table(42, "alpha"));
    assert_eq!(alpha, alpha_again);

    let other_seed = deck_with(&mut DeterministicRng::for_table(43, "alpha"));
    assert_ne!(alpha, other_seed);
}

#[test]
fn shuffle_keeps_every_card_once() {
    let mut det = DeterministicRng::from_seed(5);
    let mut sys = SystemRng::new();

    for cards in [deck_with(&mut det), deck_with(&mut sys)] {
        assert_eq!(cards.len(), 52);
        let unique: HashSet<Card> = cards.iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }
}

#[test]
fn shuffle_of_empty_slice_is_noop() {
    let mut rng = DeterministicRng::from_seed(0);
    let mut empty: Vec<u8> = Vec::new();
    rng.shuffle(&mut empty);
    assert!(empty.is_empty());

    let mut one = vec![7u8];
    rng.shuffle(&mut one);
    assert_eq!(one, vec![7]);
}
