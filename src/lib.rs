//! Движок стола Texas Hold'em для Linera.
//!
//! Слои:
//! - `domain` – карты, колода, фишки, места, состояние стола;
//! - `eval` – оценка лучшей 5-карточной руки из 7 карт;
//! - `engine` – машина состояний раздачи и реестр столов;
//! - `api` – команды, запросы и снимки для внешнего слоя;
//! - `infra` – RNG и логирование.
//!
//! Здесь же описываем ABI (Operation / Message / Query / Response).

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

use linera_sdk::linera_base_types::{ContractAbi, ServiceAbi};
use serde::{Deserialize, Serialize};

use crate::api::{Command, Query, QueryResponse};

/// Операции (внешние команды), которые модуль принимает.
///
/// Одна операция = одна команда из api::Command.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PokerOperation {
    Command(Command),
}

/// Сообщения между приложениями Linera.
/// Столы независимы друг от друга – сообщений нет.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum PokerMessage {}

/// Запросы к сервису (read-only).
pub type PokerQuery = Query;

/// Ответы на запросы.
pub type PokerResponse = QueryResponse;

/// ABI для контракта и сервиса.
#[derive(Clone, Debug)]
pub struct PokerAbi;

impl ContractAbi for PokerAbi {
    type Operation = PokerOperation;
    type Response = ();
}

impl ServiceAbi for PokerAbi {
    type Query = PokerQuery;
    type QueryResponse = PokerResponse;
}
