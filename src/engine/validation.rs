use crate::domain::chips::Chips;
use crate::domain::player::PlayerAtTable;
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::EngineError;

/// Проверка, может ли игрок выполнить это действие при текущей максимальной ставке.
///
/// Ничего не меняет. Возвращает, сколько фишек игрок должен перенести
/// из стека в ставку (call может оказаться частичным, тогда это весь стек).
pub fn validate_action(
    player: &PlayerAtTable,
    action: &PlayerActionKind,
    highest_bet: Chips,
    big_blind: Chips,
) -> Result<Chips, EngineError> {
    let to_call = diff_to_call(player, highest_bet);

    match action {
        PlayerActionKind::Fold => Ok(Chips::ZERO),

        PlayerActionKind::Check => {
            if to_call.is_zero() {
                Ok(Chips::ZERO)
            } else {
                Err(EngineError::CannotCheck)
            }
        }

        PlayerActionKind::Call => {
            if to_call.is_zero() {
                Err(EngineError::CannotCall)
            } else {
                // Не хватает на полный call – идёт весь стек (all-in call).
                Ok(to_call.min(player.stack))
            }
        }

        PlayerActionKind::Raise(total_bet) => {
            // Фиксированный минимальный рейз: старшая ставка + BB.
            let minimum = highest_bet + big_blind;
            if *total_bet < minimum {
                return Err(EngineError::RaiseTooSmall { minimum });
            }

            let diff = *total_bet - player.current_bet;
            if diff > player.stack {
                return Err(EngineError::InsufficientFunds);
            }

            Ok(diff)
        }
    }
}

/// Сколько фишек нужно добавить игроку, чтобы уравнять текущую ставку.
fn diff_to_call(player: &PlayerAtTable, highest_bet: Chips) -> Chips {
    highest_bet.saturating_sub(player.current_bet)
}
