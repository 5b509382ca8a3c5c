use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    /// Все категории от слабейшей к сильнейшей.
    pub const ALL: [HandCategory; 9] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
    ];

    /// Числовой ранг 0..=8.
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Результат оценки лучшей 5-карточной руки.
///
/// `tiebreak` — пять значений рангов (2..=14) выбранной пятёрки:
/// сначала группы по кратности (каре, сет, пары), внутри — по убыванию ранга.
/// Для стрита от туза до пятёрки туз считается единицей: `[5, 4, 3, 2, 1]`.
/// Сравнение: сначала категория, затем `tiebreak` лексикографически.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EvaluatedHand {
    pub category: HandCategory,
    pub tiebreak: [u8; 5],
}

impl EvaluatedHand {
    pub fn new(category: HandCategory, tiebreak: [u8; 5]) -> Self {
        Self { category, tiebreak }
    }

    pub fn rank(&self) -> u8 {
        self.category.rank()
    }

    pub fn name(&self) -> &'static str {
        self.category.name()
    }
}

impl Ord for EvaluatedHand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.tiebreak.cmp(&other.tiebreak))
    }
}

impl PartialOrd for EvaluatedHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for EvaluatedHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", describe_hand(self))
    }
}

/// Человеческое описание руки: категория + ключевые ранги.
pub fn describe_hand(hand: &EvaluatedHand) -> String {
    let t = &hand.tiebreak;
    match hand.category {
        HandCategory::HighCard => format!("High Card, {} high", rank_label(t[0])),
        HandCategory::OnePair => format!("One Pair of {}", rank_label(t[0])),
        HandCategory::TwoPair => {
            format!("Two Pair, {} and {}", rank_label(t[0]), rank_label(t[2]))
        }
        HandCategory::ThreeOfAKind => format!("Three of a Kind, {}", rank_label(t[0])),
        HandCategory::Straight => format!("Straight, {} high", rank_label(t[0])),
        HandCategory::Flush => format!("Flush, {} high", rank_label(t[0])),
        HandCategory::FullHouse => {
            format!("Full House, {} over {}", rank_label(t[0]), rank_label(t[3]))
        }
        HandCategory::FourOfAKind => format!("Four of a Kind, {}", rank_label(t[0])),
        HandCategory::StraightFlush if t[0] == 14 => "Royal Flush".to_string(),
        HandCategory::StraightFlush => format!("Straight Flush, {} high", rank_label(t[0])),
    }
}

fn rank_label(value: u8) -> &'static str {
    match value {
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        8 => "8",
        9 => "9",
        10 => "10",
        11 => "J",
        12 => "Q",
        13 => "K",
        14 | 1 => "A",
        _ => "?",
    }
}
