use crate::domain::chips::Chips;
use crate::domain::player::PlayerStatus;
use crate::domain::table::Table;

/// Завершён ли раунд ставок на текущей улице.
///
/// Да, если активных игроков не осталось. Иначе – каждый активный
/// уже действовал и его ставка равна старшей среди претендентов.
/// Функция ничего не меняет, повторный вызов даёт тот же ответ.
pub fn is_round_complete(table: &Table) -> bool {
    let mut active = table.seats.iter().filter(|p| p.is_active()).peekable();
    if active.peek().is_none() {
        return true;
    }

    let highest = table
        .seats
        .iter()
        .filter(|p| p.is_contender())
        .map(|p| p.current_bet)
        .max()
        .unwrap_or(Chips::ZERO);

    active.all(|p| p.has_acted && p.current_bet == highest)
}

/// Смести ставки улицы в банк.
///
/// Вклад каждого игрока копится в `contributions` (нужен для сайд-потов),
/// активным сбрасывается `has_acted` перед следующей улицей.
pub fn sweep_bets(table: &mut Table) {
    for p in table.seats.iter_mut() {
        if !p.current_bet.is_zero() {
            table.pot += p.current_bet;
            *table
                .contributions
                .entry(p.player_id.clone())
                .or_insert(Chips::ZERO) += p.current_bet;
            p.current_bet = Chips::ZERO;
        }
        if p.status == PlayerStatus::Active {
            p.has_acted = false;
        }
    }
}
