use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::PlayerId;
use crate::eval::EvaluatedHand;

/// Статус игрока в контексте текущей раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlayerStatus {
    /// Игрок активен и может действовать.
    Active,
    /// Игрок сфолдил и больше не претендует на банк.
    Folded,
    /// Игрок в олл-ине – больше не может ставить.
    AllIn,
    /// Нулевой стек: в раздаче не участвует.
    Out,
}

/// Что игрок показал на шоудауне.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ShowdownResult {
    /// Все остальные сфолдили, карты не вскрывались.
    Uncontested,
    Evaluated(EvaluatedHand),
}

/// Состояние игрока за столом. Владеет им только стол.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAtTable {
    pub player_id: PlayerId,
    /// Текущий стек за столом.
    pub stack: Chips,
    /// Ставка в текущем раунде ставок.
    pub current_bet: Chips,
    pub status: PlayerStatus,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
    /// Действовал ли игрок на текущей улице.
    pub has_acted: bool,
    pub is_winner: bool,
    /// Результат последнего шоудауна.
    pub showdown: Option<ShowdownResult>,
}

impl PlayerAtTable {
    pub fn new(player_id: impl Into<PlayerId>, stack: Chips) -> Self {
        Self {
            player_id: player_id.into(),
            stack,
            current_bet: Chips::ZERO,
            status: PlayerStatus::Active,
            hole_cards: Vec::new(),
            has_acted: false,
            is_winner: false,
            showdown: None,
        }
    }

    /// Сброс перед новой раздачей.
    pub fn reset_for_new_hand(&mut self) {
        self.hole_cards.clear();
        self.current_bet = Chips::ZERO;
        self.has_acted = false;
        self.is_winner = false;
        self.showdown = None;
        self.status = if self.stack.is_zero() {
            PlayerStatus::Out
        } else {
            PlayerStatus::Active
        };
    }

    /// Претендует ли игрок на банк (не сфолдил и не выбыл).
    pub fn is_contender(&self) -> bool {
        !matches!(self.status, PlayerStatus::Folded | PlayerStatus::Out)
    }

    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Перенести до `amount` фишек из стека в текущую ставку.
    /// Если стек закончился – игрок становится all-in.
    /// Возвращает реально поставленную сумму.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.current_bet += paid;
        if self.stack.is_zero() && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }

    /// Сколько игрок вернёт себе, уходя из-за стола.
    pub fn refund_value(&self) -> Chips {
        self.stack + self.current_bet
    }
}
