use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::table::TableOptions;
use crate::domain::{PlayerId, TableId};
use crate::engine::{PlayerAction, PlayerActionKind, RandomSource, TableManager};

use super::dto::{map_hand_status_to_response, CommandResponse};
use super::errors::ApiError;
use super::queries::build_table_snapshot;

/// Команда верхнего уровня.
///
/// Эти команды превращаются в операции (`PokerOperation`),
/// которые Linera экспонирует наружу.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Создать новый стол.
    CreateTable(CreateTableCommand),

    /// Сесть за стол.
    JoinTable(JoinTableCommand),

    /// Запустить раздачу (первую или следующую после шоудауна).
    StartHand { table_id: TableId },

    /// Действие игрока в раздаче.
    PlayerAction(PlayerActionCommand),

    /// Встать из-за стола и забрать фишки.
    LeaveTable { table_id: TableId, player_id: PlayerId },
}

/// Команда создания стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTableCommand {
    /// Имя стола, уникальное в реестре.
    pub table_id: TableId,
    pub creator: PlayerId,
    /// Блайнды и размер стола; пропущенные поля – по умолчанию.
    #[serde(default)]
    pub options: TableOptions,
    #[serde(default)]
    pub password: Option<String>,
}

/// Посадить игрока за стол.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct JoinTableCommand {
    pub table_id: TableId,
    pub player_id: PlayerId,
    #[serde(default)]
    pub password: Option<String>,
    pub buy_in: Chips,
}

/// Действие игрока в том виде, как оно приходит снаружи:
/// имя действия (`fold` / `check` / `call` / `raise`) + сумма для рейза.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerActionCommand {
    pub table_id: TableId,
    pub player_id: PlayerId,
    pub action: String,
    #[serde(default)]
    pub amount: Option<Chips>,
}

impl PlayerActionCommand {
    /// Разобрать действие в закрытый набор вариантов.
    pub fn parse(&self) -> Result<PlayerAction, ApiError> {
        let kind = PlayerActionKind::parse(&self.action, self.amount)?;
        Ok(PlayerAction::new(self.player_id.clone(), kind))
    }
}

/// Выполнить команду над реестром столов.
pub fn execute_command<R>(manager: &TableManager<R>, command: Command) -> Result<CommandResponse, ApiError>
where
    R: RandomSource + Send + 'static,
{
    match command {
        Command::CreateTable(cmd) => {
            let table = manager.create_table(cmd.table_id, cmd.creator, cmd.options, cmd.password)?;
            Ok(CommandResponse::TableCreated(build_table_snapshot(&table)))
        }

        Command::JoinTable(cmd) => {
            let table = manager.join_table(
                &cmd.table_id,
                cmd.player_id,
                cmd.password.as_deref(),
                cmd.buy_in,
            )?;
            Ok(CommandResponse::TableState(build_table_snapshot(&table)))
        }

        Command::StartHand { table_id } => {
            let update = manager.start_hand(&table_id)?;
            Ok(map_hand_status_to_response(
                update.status,
                build_table_snapshot(&update.table),
            ))
        }

        Command::PlayerAction(cmd) => {
            let action = cmd.parse()?;
            let update = manager.apply_action(&cmd.table_id, action)?;
            Ok(map_hand_status_to_response(
                update.status,
                build_table_snapshot(&update.table),
            ))
        }

        Command::LeaveTable { table_id, player_id } => {
            let (refund, update) = manager.leave_table(&table_id, &player_id)?;
            let table = manager
                .has_table(&table_id)
                .then(|| build_table_snapshot(&update.table));
            Ok(CommandResponse::Left {
                refund,
                table,
                summary: update.status.summary().cloned(),
            })
        }
    }
}
