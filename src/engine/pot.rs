use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::PlayerId;

/// Результат деления одного банка между победителями.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotAward {
    pub amount: Chips,
    pub winners: Vec<PlayerId>,
    /// Доля каждого победителя (деление нацело).
    pub share: Chips,
    /// Остаток от деления – никому не достаётся.
    pub remainder: Chips,
}

impl PotAward {
    /// Поделить `amount` поровну между `winners`, остаток теряется.
    pub fn split_evenly(amount: Chips, winners: Vec<PlayerId>) -> Self {
        let (share, remainder) = amount.split(winners.len());
        Self {
            amount,
            winners,
            share,
            remainder,
        }
    }

    pub fn paid_out(&self) -> Chips {
        Chips(self.share.0 * self.winners.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_way_split_loses_one_chip() {
        let award = PotAward::split_evenly(
            Chips(100),
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        );
        assert_eq!(award.share, Chips(33));
        assert_eq!(award.remainder, Chips(1));
        assert_eq!(award.paid_out() + award.remainder, Chips(100));
    }

    #[test]
    fn no_winners_keeps_everything_in_remainder() {
        let award = PotAward::split_evenly(Chips(50), Vec::new());
        assert_eq!(award.share, Chips::ZERO);
        assert_eq!(award.remainder, Chips(50));
    }
}
