use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{HandId, PlayerId, TableId};
use crate::eval::EvaluatedHand;

/// Улица (раунд) раздачи. Внутри раздачи двигается только вперёд.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    /// Стол создан, раздач ещё не было (или стол ждёт игроков).
    #[default]
    PreGame,
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Сколько карт борда открывается при переходе НА эту улицу.
    pub fn cards_dealt(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            _ => 0,
        }
    }

    /// Следующая улица с открытием карт (после River — шоудаун).
    pub fn next(self) -> Street {
        match self {
            Street::PreGame => Street::Preflop,
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Street::PreGame => "pre-game",
            Street::Preflop => "pre-flop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
            Street::Showdown => "showdown",
        };
        f.write_str(s)
    }
}

/// Выплата одному победителю.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Payout {
    pub player_id: PlayerId,
    pub amount: Chips,
    /// Рука победителя (None при победе без вскрытия).
    pub hand: Option<EvaluatedHand>,
}

/// Краткое описание завершённой раздачи. Удобно для истории/логов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub table_id: TableId,
    pub board: Vec<Card>,
    /// Банк на момент шоудауна (со всеми сметёнными ставками).
    pub total_pot: Chips,
    pub payouts: Vec<Payout>,
    /// Фишки, потерянные при делении банка нацело.
    pub remainder: Chips,
    /// Остался один претендент – руки не вскрывались.
    pub uncontested: bool,
}

impl HandSummary {
    pub fn winners(&self) -> impl Iterator<Item = &PlayerId> {
        self.payouts.iter().map(|p| &p.player_id)
    }

    pub fn paid_to(&self, player_id: &str) -> Chips {
        self.payouts
            .iter()
            .filter(|p| p.player_id == player_id)
            .map(|p| p.amount)
            .sum()
    }
}
