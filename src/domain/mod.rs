//! Доменная модель стола: карты, колода, фишки, места игроков, настройки.

pub mod card;
pub mod chips;
pub mod deck;
pub mod hand;
pub mod player;
pub mod table;

/// Идентичность игрока (имя/логин, выданные слоем сессий).
pub type PlayerId = String;
/// Имя стола, уникальное в реестре.
pub type TableId = String;
/// Позиция в упорядоченной последовательности мест.
pub type SeatIndex = usize;
pub type HandId = u64;

pub use card::*;
pub use chips::*;
pub use deck::*;
pub use hand::*;
pub use player::*;
pub use table::*;
