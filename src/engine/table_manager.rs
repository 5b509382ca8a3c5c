// src/engine/table_manager.rs

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::table::{Table, TableOptions};
use crate::domain::{PlayerId, TableId};
use crate::engine::game_loop::{self, HandStatus};
use crate::engine::{EngineError, PlayerAction, RandomSource};
use crate::infra::SystemRng;

/// Ошибки уровня реестра столов (над движком одного стола).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ManagerError {
    /// Стол с таким ID не найден.
    #[error("Стол {0} не найден")]
    TableNotFound(TableId),

    /// Имя стола уже занято.
    #[error("Стол с именем {0} уже существует")]
    NameTaken(TableId),

    #[error("Неверный пароль стола")]
    WrongPassword,

    /// Игрок уже сидит за другим столом.
    #[error("Игрок {player_id} уже сидит за столом {table_id}")]
    SeatedElsewhere { player_id: PlayerId, table_id: TableId },

    /// Проброшенная ошибка из движка (EngineError).
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Результат изменяющей операции: статус раздачи + снимок стола после неё.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableUpdate {
    pub status: HandStatus,
    pub table: Table,
}

/// Внутренний объект: один стол + его собственный RNG.
struct ManagedTable<R> {
    table: Table,
    rng: R,
}

type SharedTable<R> = Arc<Mutex<ManagedTable<R>>>;

/// Реестр столов:
/// - хранит столы по TableId, каждый под своим мьютексом
///   (одно действие за раз на столе, разные столы независимы);
/// - помнит, за каким столом сидит каждый игрок (не больше одного стола).
///
/// Порядок блокировок: индекс игроков → карта столов → стол.
/// `apply_action` берёт только стол.
pub struct TableManager<R: RandomSource = SystemRng> {
    tables: RwLock<HashMap<TableId, SharedTable<R>>>,
    seated: Mutex<HashMap<PlayerId, TableId>>,
    rng_factory: Box<dyn Fn(&TableId) -> R + Send + Sync>,
}

impl TableManager<SystemRng> {
    /// Пустой реестр с системным RNG.
    pub fn new() -> Self {
        Self::with_rng(|_| SystemRng::new())
    }
}

impl Default for TableManager<SystemRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource + Send + 'static> TableManager<R> {
    /// Реестр, где RNG для каждого нового стола строит `factory`.
    pub fn with_rng<F>(factory: F) -> Self
    where
        F: Fn(&TableId) -> R + Send + Sync + 'static,
    {
        Self {
            tables: RwLock::new(HashMap::new()),
            seated: Mutex::new(HashMap::new()),
            rng_factory: Box::new(factory),
        }
    }

    fn shared(&self, table_id: &str) -> Result<SharedTable<R>, ManagerError> {
        self.tables
            .read()
            .get(table_id)
            .cloned()
            .ok_or_else(|| ManagerError::TableNotFound(table_id.to_string()))
    }

    /// Создать стол. Имя должно быть свободно, настройки – валидны.
    pub fn create_table(
        &self,
        table_id: impl Into<TableId>,
        creator: impl Into<PlayerId>,
        options: TableOptions,
        password: Option<String>,
    ) -> Result<Table, ManagerError> {
        let table_id = table_id.into();
        options.validate()?;

        let mut tables = self.tables.write();
        if tables.contains_key(&table_id) {
            log::warn!("create table {}: name taken", table_id);
            return Err(ManagerError::NameTaken(table_id));
        }

        let table = Table::new(table_id.clone(), creator, options, password);
        log::info!(
            "table {} created by {} (blinds {}/{}, max {})",
            table.id,
            table.creator,
            table.options.small_blind,
            table.options.big_blind,
            table.options.max_players
        );

        let rng = (self.rng_factory)(&table_id);
        let snapshot = table.clone();
        tables.insert(table_id, Arc::new(Mutex::new(ManagedTable { table, rng })));
        Ok(snapshot)
    }

    /// Посадить игрока за стол с бай-ином `buy_in`.
    pub fn join_table(
        &self,
        table_id: &str,
        player_id: impl Into<PlayerId>,
        password: Option<&str>,
        buy_in: Chips,
    ) -> Result<Table, ManagerError> {
        let player_id = player_id.into();
        let mut seated = self.seated.lock();

        if let Some(current) = seated.get(&player_id) {
            if current != table_id {
                log::warn!("{} tried to join {} while seated at {}", player_id, table_id, current);
                return Err(ManagerError::SeatedElsewhere {
                    player_id,
                    table_id: current.clone(),
                });
            }
        }

        let shared = self.shared(table_id)?;
        let mut managed = shared.lock();

        if !managed.table.check_password(password) {
            log::warn!("{} gave a wrong password for {}", player_id, table_id);
            return Err(ManagerError::WrongPassword);
        }

        game_loop::add_player(&mut managed.table, player_id.clone(), buy_in).map_err(|e| {
            log::warn!("{} cannot join {}: {}", player_id, table_id, e);
            e
        })?;
        seated.insert(player_id, table_id.to_string());

        Ok(managed.table.clone())
    }

    /// Запустить раздачу: первую (или после паузы) либо следующую после шоудауна.
    pub fn start_hand(&self, table_id: &str) -> Result<TableUpdate, ManagerError> {
        let mut seated = self.seated.lock();
        let shared = self.shared(table_id)?;
        let mut guard = shared.lock();
        let managed = &mut *guard;

        let result = if !managed.table.in_progress {
            game_loop::start_game(&mut managed.table, &mut managed.rng)
        } else if managed.table.street == Street::Showdown {
            game_loop::start_new_hand(&mut managed.table, &mut managed.rng)
        } else {
            Err(EngineError::HandAlreadyInProgress)
        };

        let status = result.map_err(|e| {
            log::warn!("start hand on {}: {}", table_id, e);
            e
        })?;

        // Выбывшие без фишек больше не числятся за этим столом.
        seated.retain(|player, at| {
            at.as_str() != table_id || managed.table.seat_index(player).is_some()
        });

        Ok(TableUpdate {
            status,
            table: managed.table.clone(),
        })
    }

    /// Применить действие игрока на конкретном столе.
    pub fn apply_action(&self, table_id: &str, action: PlayerAction) -> Result<TableUpdate, ManagerError> {
        let shared = self.shared(table_id)?;
        let mut managed = shared.lock();

        let player_id = action.player_id.clone();
        let status = game_loop::apply_action(&mut managed.table, action).map_err(|e| {
            log::warn!("table {}: action from {} rejected: {}", table_id, player_id, e);
            e
        })?;

        Ok(TableUpdate {
            status,
            table: managed.table.clone(),
        })
    }

    /// Встать из-за стола. Возвращает фишки к возврату.
    /// Пустой стол удаляется из реестра.
    pub fn leave_table(&self, table_id: &str, player_id: &str) -> Result<(Chips, TableUpdate), ManagerError> {
        let mut seated = self.seated.lock();
        let mut tables = self.tables.write();
        let shared = tables
            .get(table_id)
            .cloned()
            .ok_or_else(|| ManagerError::TableNotFound(table_id.to_string()))?;
        let mut managed = shared.lock();

        let (refund, status) = game_loop::remove_player(&mut managed.table, player_id)?;
        seated.remove(player_id);

        let update = TableUpdate {
            status,
            table: managed.table.clone(),
        };

        if managed.table.seats.is_empty() {
            drop(managed);
            tables.remove(table_id);
            log::info!("table {} is empty and closed", table_id);
        }

        Ok((refund, update))
    }

    /// Стол, за которым сидит игрок.
    pub fn current_table(&self, player_id: &str) -> Option<Table> {
        let table_id = self.seated.lock().get(player_id).cloned()?;
        let shared = self.shared(&table_id).ok()?;
        let managed = shared.lock();
        Some(managed.table.clone())
    }

    pub fn table(&self, table_id: &str) -> Result<Table, ManagerError> {
        let shared = self.shared(table_id)?;
        let managed = shared.lock();
        Ok(managed.table.clone())
    }

    /// Все столы, по имени.
    pub fn list_tables(&self) -> Vec<Table> {
        let shared: Vec<SharedTable<R>> = self.tables.read().values().cloned().collect();
        let mut tables: Vec<Table> = shared.iter().map(|t| t.lock().table.clone()).collect();
        tables.sort_by(|a, b| a.id.cmp(&b.id));
        tables
    }

    pub fn has_table(&self, table_id: &str) -> bool {
        self.tables.read().contains_key(table_id)
    }

    /// За каким столом сидит игрок.
    pub fn seated_at(&self, player_id: &str) -> Option<TableId> {
        self.seated.lock().get(player_id).cloned()
    }
}
