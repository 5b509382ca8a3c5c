//! Движок стола: ставки, переход улиц, шоудаун, реестр столов.
//!
//! Движок – набор свободных функций над `Table`:
//!   - `start_game` / `start_new_hand` – запустить раздачу
//!   - `apply_action` – применить действие игрока
//!   - `add_player` / `remove_player` – посадка и уход
//!
//! `TableManager` держит много столов и сериализует доступ к каждому.

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod side_pots;
pub mod table_manager;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use betting::is_round_complete;
pub use errors::EngineError;
pub use game_loop::{
    add_player, advance_to_next_state, apply_action, determine_winners, move_to_next_player,
    remove_player, start_game, start_new_hand, HandStatus,
};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use pot::PotAward;
pub use side_pots::{compute_side_pots, SidePot};
pub use table_manager::{ManagerError, TableManager, TableUpdate};

/// RNG интерфейс для engine: перемешать колоду перед раздачей.
/// Реализации лежат в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
