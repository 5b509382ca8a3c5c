use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{HandSummary, Street};
use crate::domain::player::{PlayerAtTable, PlayerStatus};
use crate::domain::{HandId, PlayerId, SeatIndex, TableId};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::HandHistory;

/// Больше мест одна колода не обслужит: 2 карты на место, 3 сжигания и 5 карт борда.
pub const MAX_SEATS: usize = (52 - 3 - 5) / 2;

/// Как делится банк на шоудауне.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum PotMode {
    /// Один общий банк на всех претендентов, включая олл-ины на меньшую сумму.
    #[default]
    Shared,
    /// Банк режется на слои по вкладам игроков (сайд-поты).
    SidePots,
}

/// Настройки стола. Отсутствующие в JSON поля берутся по умолчанию.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableOptions {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub min_players: usize,
    pub max_players: usize,
    pub pot_mode: PotMode,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            small_blind: Chips(10),
            big_blind: Chips(20),
            min_players: 2,
            max_players: 9,
            pot_mode: PotMode::Shared,
        }
    }
}

impl TableOptions {
    pub fn with_blinds(small_blind: u64, big_blind: u64) -> Self {
        Self {
            small_blind: Chips(small_blind),
            big_blind: Chips(big_blind),
            ..Self::default()
        }
    }

    /// Разобрать настройки из JSON и проверить их.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let options: TableOptions = serde_json::from_str(json)
            .map_err(|e| EngineError::InvalidOptions(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.small_blind.is_zero() {
            return Err(EngineError::InvalidOptions("малый блайнд должен быть больше нуля".into()));
        }
        if self.big_blind < self.small_blind {
            return Err(EngineError::InvalidOptions(
                "большой блайнд не может быть меньше малого".into(),
            ));
        }
        if self.min_players < 2 {
            return Err(EngineError::InvalidOptions("нужно минимум 2 игрока".into()));
        }
        if self.max_players < self.min_players {
            return Err(EngineError::InvalidOptions(
                "max_players меньше min_players".into(),
            ));
        }
        if self.max_players > MAX_SEATS {
            return Err(EngineError::InvalidOptions(format!(
                "max_players больше {MAX_SEATS}: не хватит колоды"
            )));
        }
        Ok(())
    }
}

/// Авторитетное состояние одного стола.
///
/// Места идут в порядке посадки; уход игрока сдвигает последовательность.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: TableId,
    pub creator: PlayerId,
    pub password: Option<String>,
    pub options: TableOptions,

    pub seats: Vec<PlayerAtTable>,

    pub deck: Deck,
    /// Общие карты борда (0–5 карт).
    pub board: Vec<Card>,
    /// Фишки, уже сметённые со ставок прошлых улиц.
    pub pot: Chips,
    /// Вклад каждого игрока в `pot` за раздачу (для сайд-потов).
    pub contributions: BTreeMap<PlayerId, Chips>,

    pub in_progress: bool,
    pub street: Street,
    /// Индекс кнопки; None до первой раздачи.
    pub dealer_index: Option<SeatIndex>,
    /// Чей ход; None вне раздачи и на шоудауне.
    pub current_player: Option<SeatIndex>,
    pub last_raiser: Option<PlayerId>,

    /// Номер текущей (или последней) раздачи.
    pub hand_id: HandId,
    pub history: HandHistory,
    pub last_summary: Option<HandSummary>,
}

impl Table {
    pub fn new(
        id: impl Into<TableId>,
        creator: impl Into<PlayerId>,
        options: TableOptions,
        password: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            creator: creator.into(),
            password: password.filter(|p| !p.is_empty()),
            options,
            seats: Vec::new(),
            deck: Deck::default(),
            board: Vec::new(),
            pot: Chips::ZERO,
            contributions: BTreeMap::new(),
            in_progress: false,
            street: Street::PreGame,
            dealer_index: None,
            current_player: None,
            last_raiser: None,
            hand_id: 0,
            history: HandHistory::new(),
            last_summary: None,
        }
    }

    /// Пароля нет – пускаем всех.
    pub fn check_password(&self, attempt: Option<&str>) -> bool {
        match &self.password {
            None => true,
            Some(p) => attempt == Some(p.as_str()),
        }
    }

    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    pub fn seated_count(&self) -> usize {
        self.seats.len()
    }

    pub fn is_full(&self) -> bool {
        self.seats.len() >= self.options.max_players
    }

    pub fn seat_index(&self, player_id: &str) -> Option<SeatIndex> {
        self.seats.iter().position(|p| p.player_id == player_id)
    }

    pub fn seat(&self, player_id: &str) -> Option<&PlayerAtTable> {
        self.seats.iter().find(|p| p.player_id == player_id)
    }

    pub fn current_player_id(&self) -> Option<&PlayerId> {
        self.current_player
            .and_then(|idx| self.seats.get(idx))
            .map(|p| &p.player_id)
    }

    pub fn dealer_id(&self) -> Option<&PlayerId> {
        self.dealer_index
            .and_then(|idx| self.seats.get(idx))
            .map(|p| &p.player_id)
    }

    /// Игроки, претендующие на банк (не folded и не out).
    pub fn contenders_count(&self) -> usize {
        self.seats.iter().filter(|p| p.is_contender()).count()
    }

    pub fn active_count(&self) -> usize {
        self.seats
            .iter()
            .filter(|p| p.status == PlayerStatus::Active)
            .count()
    }

    /// Максимальная ставка текущей улицы среди всех мест.
    pub fn highest_bet(&self) -> Chips {
        self.seats
            .iter()
            .map(|p| p.current_bet)
            .max()
            .unwrap_or(Chips::ZERO)
    }

    /// Банк с учётом ещё не сметённых ставок.
    pub fn pot_with_bets(&self) -> Chips {
        self.pot + self.seats.iter().map(|p| p.current_bet).sum::<Chips>()
    }

    /// Все фишки стола: стеки + ставки + банк.
    pub fn total_chips(&self) -> Chips {
        self.seats.iter().map(|p| p.stack).sum::<Chips>() + self.pot_with_bets()
    }
}
