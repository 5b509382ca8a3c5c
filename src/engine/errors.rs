use crate::domain::{Chips, PlayerId};

use thiserror::Error;

/// Ошибки движка стола. Все они пользовательские и восстановимые:
/// при ошибке состояние стола не меняется.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Игрок {0} уже сидит за этим столом")]
    AlreadySeated(PlayerId),

    #[error("Стол заполнен")]
    TableFull,

    #[error("Игрок {0} не найден за столом")]
    PlayerNotAtTable(PlayerId),

    #[error("Недостаточно игроков для раздачи")]
    NotEnoughPlayers,

    #[error("Раздача уже идёт")]
    HandAlreadyInProgress,

    #[error("Текущая раздача ещё не закончилась")]
    HandNotFinished,

    #[error("Раздача не активна")]
    NoHandInProgress,

    #[error("Раздача закончилась, ждите следующую")]
    HandOver,

    #[error("Сейчас не ход игрока {0}")]
    NotYourTurn(PlayerId),

    #[error("Невозможно выполнить check – нужно уравнять ставку или сделать рейз")]
    CannotCheck,

    #[error("Невозможно выполнить call – нечего уравнивать, можно сделать check")]
    CannotCall,

    #[error("Рейз должен быть как минимум до {minimum}")]
    RaiseTooSmall { minimum: Chips },

    #[error("Недостаточно фишек для этого рейза")]
    InsufficientFunds,

    #[error("Неизвестное действие: {0}")]
    UnknownAction(String),

    #[error("Для рейза нужно указать сумму")]
    RaiseAmountRequired,

    #[error("Некорректные настройки стола: {0}")]
    InvalidOptions(String),
}
