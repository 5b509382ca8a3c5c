use crate::domain::card::Card;

use super::hand_rank::{EvaluatedHand, HandCategory};
use super::lookup_tables::{detect_straight, rank_to_bit, RankMask};

/// Все 21 пятёрка индексов из 7 карт.
const FIVE_OF_SEVEN: [[usize; 5]; 21] = five_of_seven();

const fn five_of_seven() -> [[usize; 5]; 21] {
    let mut out = [[0; 5]; 21];
    let mut k = 0;
    let mut a = 0;
    while a < 7 {
        let mut b = a + 1;
        while b < 7 {
            let mut c = b + 1;
            while c < 7 {
                let mut d = c + 1;
                while d < 7 {
                    let mut e = d + 1;
                    while e < 7 {
                        out[k] = [a, b, c, d, e];
                        k += 1;
                        e += 1;
                    }
                    d += 1;
                }
                c += 1;
            }
            b += 1;
        }
        a += 1;
    }
    out
}

/// Главная функция шоудауна: лучшая 5-карточная рука из ровно 7 карт
/// (2 карманные + 5 борда).
///
/// Перебираем все 21 пятёрку; новая пятёрка заменяет текущую лучшую,
/// только если она строго сильнее.
pub fn evaluate(cards: &[Card; 7]) -> EvaluatedHand {
    let first = evaluate_5card_hand(&[cards[0], cards[1], cards[2], cards[3], cards[4]]);

    FIVE_OF_SEVEN[1..].iter().fold(first, |best, &idx| {
        let candidate = evaluate_5card_hand(&idx.map(|i| cards[i]));
        if candidate > best {
            candidate
        } else {
            best
        }
    })
}

/// Лучшая рука из hole + board для любого общего числа карт 5..=7.
///
/// Нужна, когда борд ещё не открыт полностью (подсказки в CLI, тесты).
/// Возвращает `None`, если карт меньше пяти или больше семи.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Option<EvaluatedHand> {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);

    if let Ok(seven) = <[Card; 7]>::try_from(all_cards.as_slice()) {
        return Some(evaluate(&seven));
    }
    if !(5..=7).contains(&all_cards.len()) {
        return None;
    }

    let n = all_cards.len();
    let mut best: Option<EvaluatedHand> = None;
    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [all_cards[a], all_cards[b], all_cards[c], all_cards[d], all_cards[e]];
                        let r = evaluate_5card_hand(&five);
                        if best.as_ref().map_or(true, |best_r| r > *best_r) {
                            best = Some(r);
                        }
                    }
                }
            }
        }
    }
    best
}

/// Оценка строго 5-карточной комбинации.
pub fn evaluate_5card_hand(cards: &[Card; 5]) -> EvaluatedHand {
    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);

    // Подсчёт рангов: индексы 2..=14.
    let mut rank_counts = [0u8; 15];
    let mut rank_mask: RankMask = 0;
    for card in cards {
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    // (кратность, ранг): сначала по кратности, затем по рангу, оба по убыванию.
    let mut groups: Vec<(u8, u8)> = (2u8..=14)
        .rev()
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_by(|a, b| b.cmp(a));

    let straight_high = if groups.len() == 5 {
        detect_straight(rank_mask)
    } else {
        None
    };

    let tiebreak = match straight_high {
        Some(5) => [5, 4, 3, 2, 1],
        Some(high) => [high, high - 1, high - 2, high - 3, high - 4],
        None => expand_groups(&groups),
    };

    let top = groups[0].0;
    let second = groups.get(1).map_or(0, |g| g.0);

    let category = match (is_flush, straight_high.is_some(), top, second) {
        (true, true, _, _) => HandCategory::StraightFlush,
        (_, _, 4, _) => HandCategory::FourOfAKind,
        (_, _, 3, 2) => HandCategory::FullHouse,
        (true, false, _, _) => HandCategory::Flush,
        (false, true, _, _) => HandCategory::Straight,
        (_, _, 3, _) => HandCategory::ThreeOfAKind,
        (_, _, 2, 2) => HandCategory::TwoPair,
        (_, _, 2, _) => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    EvaluatedHand::new(category, tiebreak)
}

/// Развернуть группы (кратность, ранг) в пять значений рангов.
fn expand_groups(groups: &[(u8, u8)]) -> [u8; 5] {
    let mut out = [0u8; 5];
    let mut i = 0;
    for &(count, rank) in groups {
        for _ in 0..count {
            if i < out.len() {
                out[i] = rank;
                i += 1;
            }
        }
    }
    out
}
