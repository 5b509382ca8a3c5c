use crate::domain::player::PlayerStatus;
use crate::domain::{SeatIndex, Table};

/// Позиции блайндов для кнопки `dealer`: SB = dealer+1, BB = dealer+2 (по кругу).
///
/// Вдвоём BB совпадает с кнопкой, а SB ходит первым на префлопе.
pub fn blind_positions(dealer: SeatIndex, seat_count: usize) -> (SeatIndex, SeatIndex) {
    if seat_count == 0 {
        return (0, 0);
    }
    ((dealer + 1) % seat_count, (dealer + 2) % seat_count)
}

/// Следующая кнопка: первая раздача – место 0, дальше сдвиг на одно место.
pub fn next_dealer(table: &Table) -> SeatIndex {
    match table.dealer_index {
        Some(d) if !table.seats.is_empty() => (d + 1) % table.seats.len(),
        _ => 0,
    }
}

/// Найти первое активное место, начиная со `start` включительно (по кругу).
///
/// Ищем не больше одного круга; None, если активных нет.
pub fn first_active_from(table: &Table, start: SeatIndex) -> Option<SeatIndex> {
    let n = table.seats.len();
    if n == 0 {
        return None;
    }
    (0..n)
        .map(|offset| (start + offset) % n)
        .find(|&idx| table.seats[idx].status == PlayerStatus::Active)
}

/// Сдвинуть индекс после удаления места `removed`.
///
/// Места после удалённого съезжают на одно влево. Если удалено само
/// место индекса, индекс уходит на предыдущее место, чтобы следующий
/// сдвиг вперёд попал на того, кто сидел за ушедшим.
pub fn shift_after_removal(index: SeatIndex, removed: SeatIndex, remaining: usize) -> Option<SeatIndex> {
    if remaining == 0 {
        return None;
    }
    let shifted = if index >= removed {
        if index == 0 {
            remaining - 1
        } else {
            index - 1
        }
    } else {
        index
    };
    Some(shifted % remaining)
}
