use crate::domain::card::Rank;

/// Битовая маска рангов.
///
/// 13 бит: бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

/// Маска пяти подряд идущих рангов, старший из которых `high` (6..=14).
const fn run_mask(high: u8) -> RankMask {
    // high=6 → биты 0..=4 (2..6)
    0b1_1111 << (high - 6)
}

/// Маска стрита от туза до пятёрки (wheel).
pub const WHEEL_MASK: RankMask = 0b1_0000_0000_1111;

/// Маски всех десяти стритов, индекс = старшая карта стрита минус 5.
/// Индекс 0 — wheel (старшая карта пятёрка).
pub const STRAIGHT_MASKS: [RankMask; 10] = build_straight_masks();

const fn build_straight_masks() -> [RankMask; 10] {
    let mut masks = [0; 10];
    masks[0] = WHEEL_MASK;
    let mut high = 6;
    while high <= 14 {
        masks[(high - 5) as usize] = run_mask(high);
        high += 1;
    }
    masks
}

/// Бит для одного ранга.
pub fn rank_to_bit(rank: Rank) -> RankMask {
    1 << (rank.value() - 2)
}

/// Найти стрит в маске рангов. Возвращает значение старшей карты стрита
/// (5 для wheel, 14 для бродвея). Проверяем от сильнейшего к слабейшему.
pub fn detect_straight(mask: RankMask) -> Option<u8> {
    STRAIGHT_MASKS
        .iter()
        .enumerate()
        .rev()
        .find(|&(_, &sm)| mask & sm == sm)
        .map(|(i, _)| i as u8 + 5)
}
