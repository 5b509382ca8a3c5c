use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::TableId;
use crate::engine::{EngineError, ManagerError};

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Имя стола уже занято.
    #[error("table name {0} is taken")]
    NameTaken(TableId),

    #[error("wrong table password")]
    WrongPassword,

    #[error("table is full")]
    TableFull,

    /// Стол или игрок не найден.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("already seated: {0}")]
    AlreadySeated(String),

    #[error("not enough players to start a hand")]
    NotEnoughPlayers,

    #[error("a hand is already in progress")]
    AlreadyInProgress,

    #[error("the current hand has not finished yet")]
    HandNotFinished,

    #[error("not your turn: {0}")]
    NotYourTurn(String),

    /// Check/call не по правилам, неизвестное действие и т.п.
    #[error("illegal action: {0}")]
    IllegalAction(String),

    #[error("insufficient funds")]
    InsufficientFunds,

    #[error("raise must be at least {minimum}")]
    MinimumRaiseNotMet { minimum: Chips },

    /// Неправильные входные данные (например, битый JSON).
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::AlreadySeated(player) => ApiError::AlreadySeated(player),
            EngineError::TableFull => ApiError::TableFull,
            EngineError::PlayerNotAtTable(player) => ApiError::NotFound(player),
            EngineError::NotEnoughPlayers => ApiError::NotEnoughPlayers,
            EngineError::HandAlreadyInProgress => ApiError::AlreadyInProgress,
            EngineError::HandNotFinished => ApiError::HandNotFinished,
            EngineError::NotYourTurn(player) => ApiError::NotYourTurn(player),
            // Раздача закончилась – ходить сейчас никому нельзя.
            e @ EngineError::HandOver => ApiError::NotYourTurn(e.to_string()),
            EngineError::RaiseTooSmall { minimum } => ApiError::MinimumRaiseNotMet { minimum },
            EngineError::InsufficientFunds => ApiError::InsufficientFunds,
            EngineError::InvalidOptions(msg) => ApiError::BadRequest(msg),
            e @ (EngineError::NoHandInProgress
            | EngineError::CannotCheck
            | EngineError::CannotCall
            | EngineError::UnknownAction(_)
            | EngineError::RaiseAmountRequired) => ApiError::IllegalAction(e.to_string()),
        }
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::TableNotFound(id) => ApiError::NotFound(id),
            ManagerError::NameTaken(id) => ApiError::NameTaken(id),
            ManagerError::WrongPassword => ApiError::WrongPassword,
            e @ ManagerError::SeatedElsewhere { .. } => ApiError::AlreadySeated(e.to_string()),
            ManagerError::Engine(e) => e.into(),
        }
    }
}
