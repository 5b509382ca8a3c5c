use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{HandId, PlayerId, SeatIndex};
use crate::engine::actions::PlayerActionKind;
use crate::eval::EvaluatedHand;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Новая раздача началась: кнопка и фактически поставленные блайнды.
    HandStarted {
        hand_id: HandId,
        dealer: SeatIndex,
        small_blind: (PlayerId, Chips),
        big_blind: (PlayerId, Chips),
    },

    /// Игрок получил карманные карты.
    HoleCardsDealt {
        player_id: PlayerId,
        cards: Vec<Card>,
    },

    /// Действие игрока.
    PlayerActed {
        player_id: PlayerId,
        action: PlayerActionKind,
        new_stack: Chips,
        pot_after: Chips,
    },

    /// Открыты общие карты (только новые карты улицы).
    BoardDealt {
        street: Street,
        cards: Vec<Card>,
    },

    /// Не нашлось, кому ходить – раздача принудительно доведена до шоудауна.
    ForcedShowdown,

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        player_id: PlayerId,
        hole_cards: Vec<Card>,
        hand: EvaluatedHand,
    },

    /// Выплата банка.
    PotAwarded {
        player_id: PlayerId,
        amount: Chips,
    },

    /// Игрок ушёл из-за стола посреди раздачи.
    PlayerLeft {
        player_id: PlayerId,
        refund: Chips,
    },

    /// Раздача завершена.
    HandFinished {
        hand_id: HandId,
    },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история одной раздачи. Очищается в начале каждой новой.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &HandEventKind> {
        self.events.iter().map(|e| &e.kind)
    }
}
