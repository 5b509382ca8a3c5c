use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandSummary, Street};
use crate::domain::player::{PlayerStatus, ShowdownResult};
use crate::domain::table::TableOptions;
use crate::domain::{HandId, PlayerId, SeatIndex, TableId};
use crate::engine::HandStatus;

/// Статус места в снимке. Вне раздачи все места – `Waiting`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SeatStatusView {
    Waiting,
    Active,
    Folded,
    AllIn,
    Out,
}

impl From<PlayerStatus> for SeatStatusView {
    fn from(status: PlayerStatus) -> Self {
        match status {
            PlayerStatus::Active => SeatStatusView::Active,
            PlayerStatus::Folded => SeatStatusView::Folded,
            PlayerStatus::AllIn => SeatStatusView::AllIn,
            PlayerStatus::Out => SeatStatusView::Out,
        }
    }
}

/// DTO места за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatView {
    pub player_id: PlayerId,
    pub seat_index: SeatIndex,
    pub stack: Chips,
    pub current_bet: Chips,
    pub status: SeatStatusView,
    pub is_winner: bool,
    /// Карманные карты – только на шоудауне и только у не сфолдивших.
    pub hole_cards: Option<Vec<Card>>,
    /// Результат вскрытия – только на шоудауне.
    pub showdown: Option<ShowdownResult>,
}

/// Публичный снимок стола: то, что рассылается всем участникам.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSnapshot {
    pub table_id: TableId,
    pub creator: PlayerId,
    pub in_progress: bool,
    pub has_password: bool,
    pub options: TableOptions,
    pub street: Street,
    /// Банк вместе с несметёнными ставками (0 вне раздачи).
    pub pot: Chips,
    pub board: Vec<Card>,
    pub seats: Vec<SeatView>,
    /// Чей ход (если раздача идёт).
    pub current_player: Option<PlayerId>,
    pub dealer: Option<PlayerId>,
    pub hand_id: HandId,
}

/// Снимок стола глазами конкретного игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PrivateTableView {
    pub table: TableSnapshot,
    pub player_id: PlayerId,
    /// Свои карманные карты – видны игроку всегда.
    pub hole_cards: Option<Vec<Card>>,
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum CommandResponse {
    /// Создан новый стол.
    TableCreated(TableSnapshot),

    /// Вернуть обновлённое состояние стола.
    TableState(TableSnapshot),

    /// Раздача завершилась этой командой.
    HandFinished {
        table: TableSnapshot,
        summary: HandSummary,
    },

    /// Игрок ушёл; `table` – None, если стол закрылся.
    Left {
        refund: Chips,
        table: Option<TableSnapshot>,
        summary: Option<HandSummary>,
    },
}

/// Помощник: преобразование HandStatus движка в ответ.
pub fn map_hand_status_to_response(status: HandStatus, table: TableSnapshot) -> CommandResponse {
    match status {
        HandStatus::Waiting | HandStatus::Ongoing => CommandResponse::TableState(table),
        HandStatus::Finished(summary) => CommandResponse::HandFinished { table, summary },
    }
}
