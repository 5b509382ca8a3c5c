use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Сайд-пот: часть банка, в которую участвуют только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    /// Претенденты, дотянувшие вклад до уровня этого пота.
    pub eligible: Vec<PlayerId>,
}

/// Посчитать сайд-поты из сумм, которые внесли игроки за раздачу.
///
/// Вход: contributions[player] = сколько суммарно фишек поставил игрок
/// (включая сфолдивших и ушедших), `contenders` – кто ещё претендует на банк.
/// Выход: список потов "от младших" к "старшим".
///
/// Уровень, на который не претендует никто (его дотянули только
/// сфолдившие), переносится в соседний живой пот, поэтому сумма потов
/// всегда равна сумме вкладов, если есть хоть один претендент.
pub fn compute_side_pots(
    contributions: &BTreeMap<PlayerId, Chips>,
    contenders: &BTreeSet<PlayerId>,
) -> Vec<SidePot> {
    // Собираем (player, amount > 0)
    let mut entries: Vec<(&PlayerId, Chips)> = contributions
        .iter()
        .filter(|(_, chips)| !chips.is_zero())
        .map(|(p, chips)| (p, *chips))
        .collect();

    if entries.is_empty() {
        return Vec::new();
    }

    // Сортируем по размеру вклада (возрастание).
    entries.sort_by_key(|(_, c)| *c);

    let mut pots: Vec<SidePot> = Vec::new();
    let mut prev_level = Chips::ZERO;
    let mut carry = Chips::ZERO;

    for &(_, level) in entries.iter() {
        if level == prev_level {
            continue;
        }
        let level_diff = level - prev_level;

        // Все, у кого вклад >= level, платят в этот уровень.
        let payers = entries.iter().filter(|(_, c)| *c >= level).count() as u64;
        let layer = Chips(level_diff.0 * payers);

        let eligible: Vec<PlayerId> = entries
            .iter()
            .filter(|(p, c)| *c >= level && contenders.contains(*p))
            .map(|(p, _)| (*p).clone())
            .collect();

        if eligible.is_empty() {
            carry += layer;
        } else {
            pots.push(SidePot {
                amount: layer + carry,
                eligible,
            });
            carry = Chips::ZERO;
        }

        prev_level = level;
    }

    if let Some(last) = pots.last_mut() {
        last.amount += carry;
    }

    // Соседние уровни с тем же составом претендентов склеиваем в один пот.
    let mut merged: Vec<SidePot> = Vec::with_capacity(pots.len());
    for pot in pots {
        match merged.last_mut() {
            Some(prev) if prev.eligible == pot.eligible => prev.amount += pot.amount,
            _ => merged.push(pot),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contrib(pairs: &[(&str, u64)]) -> BTreeMap<PlayerId, Chips> {
        pairs
            .iter()
            .map(|(p, c)| (p.to_string(), Chips(*c)))
            .collect()
    }

    fn set(ids: &[&str]) -> BTreeSet<PlayerId> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn short_all_in_gets_main_pot_only() {
        let pots = compute_side_pots(
            &contrib(&[("a", 40), ("b", 40), ("c", 20)]),
            &set(&["a", "b", "c"]),
        );
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, Chips(60));
        assert_eq!(pots[0].eligible.len(), 3);
        assert_eq!(pots[1].amount, Chips(40));
        assert_eq!(pots[1].eligible, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn folded_overbet_is_carried_into_live_pot() {
        // "a" вложил больше всех и сфолдил: его верхний уровень ничей.
        let pots = compute_side_pots(
            &contrib(&[("a", 100), ("b", 50), ("c", 50)]),
            &set(&["b", "c"]),
        );
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, Chips(200));
    }

    #[test]
    fn equal_contributions_form_single_pot() {
        let pots = compute_side_pots(
            &contrib(&[("a", 30), ("b", 30)]),
            &set(&["a", "b"]),
        );
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, Chips(60));
    }
}
