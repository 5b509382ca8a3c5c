use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, PlayerId};
use crate::engine::errors::EngineError;

/// Тип действия игрока. Закрытый набор: всё прочее отсекается на входе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call,
    /// Рейз ДО указанной суммы: новая общая ставка игрока на этой улице.
    Raise(Chips),
}

impl PlayerActionKind {
    /// Разбор действия из внешнего запроса: имя без учёта регистра + сумма.
    pub fn parse(name: &str, amount: Option<Chips>) -> Result<Self, EngineError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fold" => Ok(PlayerActionKind::Fold),
            "check" => Ok(PlayerActionKind::Check),
            "call" => Ok(PlayerActionKind::Call),
            "raise" => amount
                .map(PlayerActionKind::Raise)
                .ok_or(EngineError::RaiseAmountRequired),
            _ => Err(EngineError::UnknownAction(name.to_string())),
        }
    }
}

impl fmt::Display for PlayerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerActionKind::Fold => f.write_str("fold"),
            PlayerActionKind::Check => f.write_str("check"),
            PlayerActionKind::Call => f.write_str("call"),
            PlayerActionKind::Raise(to) => write!(f, "raise to {to}"),
        }
    }
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Какой игрок действует.
    pub player_id: PlayerId,
    /// Само действие.
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(player_id: impl Into<PlayerId>, kind: PlayerActionKind) -> Self {
        Self {
            player_id: player_id.into(),
            kind,
        }
    }

    pub fn fold(player_id: impl Into<PlayerId>) -> Self {
        Self::new(player_id, PlayerActionKind::Fold)
    }

    pub fn check(player_id: impl Into<PlayerId>) -> Self {
        Self::new(player_id, PlayerActionKind::Check)
    }

    pub fn call(player_id: impl Into<PlayerId>) -> Self {
        Self::new(player_id, PlayerActionKind::Call)
    }

    pub fn raise_to(player_id: impl Into<PlayerId>, total: u64) -> Self {
        Self::new(player_id, PlayerActionKind::Raise(Chips(total)))
    }
}
