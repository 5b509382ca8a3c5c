use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::player::PlayerStatus;
use crate::domain::table::Table;
use crate::domain::{PlayerId, TableId};
use crate::engine::{RandomSource, TableManager};

use super::dto::{PrivateTableView, SeatStatusView, SeatView, TableSnapshot};
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Query {
    /// Получить состояние стола.
    GetTable { table_id: TableId },

    /// Стол, за которым сидит игрок, вместе с его картами.
    GetCurrentTable { player_id: PlayerId },

    /// Получить список столов (для лобби).
    ListTables,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum QueryResponse {
    Table(TableSnapshot),
    /// None – игрок ни за каким столом не сидит.
    CurrentTable(Option<PrivateTableView>),
    Tables(Vec<TableSnapshot>),
}

/// Выполнить запрос к реестру.
pub fn execute_query<R>(manager: &TableManager<R>, query: Query) -> Result<QueryResponse, ApiError>
where
    R: RandomSource + Send + 'static,
{
    match query {
        Query::GetTable { table_id } => {
            let table = manager.table(&table_id)?;
            Ok(QueryResponse::Table(build_table_snapshot(&table)))
        }
        Query::GetCurrentTable { player_id } => Ok(QueryResponse::CurrentTable(
            manager
                .current_table(&player_id)
                .map(|table| build_private_view(&table, &player_id)),
        )),
        Query::ListTables => Ok(QueryResponse::Tables(
            manager.list_tables().iter().map(build_table_snapshot).collect(),
        )),
    }
}

/// Сформировать публичный снимок стола.
///
/// Вне раздачи: банк 0, борд пуст, у всех мест ставка 0 и статус `Waiting`.
/// Карты и результаты рук открываются только на шоудауне.
pub fn build_table_snapshot(table: &Table) -> TableSnapshot {
    let showdown = table.in_progress && table.street == Street::Showdown;

    let seats = table
        .seats
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            if !table.in_progress {
                return SeatView {
                    player_id: p.player_id.clone(),
                    seat_index: idx,
                    stack: p.stack,
                    current_bet: Chips::ZERO,
                    status: SeatStatusView::Waiting,
                    is_winner: false,
                    hole_cards: None,
                    showdown: None,
                };
            }

            let reveal = showdown && p.status != PlayerStatus::Folded;
            SeatView {
                player_id: p.player_id.clone(),
                seat_index: idx,
                stack: p.stack,
                current_bet: p.current_bet,
                status: p.status.into(),
                is_winner: p.is_winner,
                hole_cards: reveal.then(|| p.hole_cards.clone()),
                showdown: if showdown { p.showdown.clone() } else { None },
            }
        })
        .collect();

    TableSnapshot {
        table_id: table.id.clone(),
        creator: table.creator.clone(),
        in_progress: table.in_progress,
        has_password: table.has_password(),
        options: table.options.clone(),
        street: if table.in_progress {
            table.street
        } else {
            Street::PreGame
        },
        pot: if table.in_progress {
            table.pot_with_bets()
        } else {
            Chips::ZERO
        },
        board: if table.in_progress {
            table.board.clone()
        } else {
            Vec::new()
        },
        seats,
        current_player: if table.in_progress {
            table.current_player_id().cloned()
        } else {
            None
        },
        dealer: table.dealer_id().cloned(),
        hand_id: table.hand_id,
    }
}

/// Снимок стола + свои карманные карты игрока (если он сидит за столом).
pub fn build_private_view(table: &Table, player_id: &str) -> PrivateTableView {
    let hole_cards = table
        .seat(player_id)
        .filter(|p| !p.hole_cards.is_empty())
        .map(|p| p.hole_cards.clone());

    PrivateTableView {
        table: build_table_snapshot(table),
        player_id: player_id.to_string(),
        hole_cards,
    }
}
