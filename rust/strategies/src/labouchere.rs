use std::collections::VecDeque;

use wheelsim_engine::bet::{Bet, BetTarget};
use wheelsim_engine::errors::ConfigError;
use wheelsim_engine::strategy::{Bankroll, Strategy};

/// The sequence is worth this fraction of the initial bankroll.
pub const TARGET_PROFIT: f64 = 0.1;
/// No single bet exceeds this many base units.
pub const MAX_BET_UNITS: f64 = 50.0;
/// Longest starting sequence; larger targets are spread over this many entries.
pub const MAX_SEQUENCE_LEN: usize = 100;

/// Cancellation system on red.
///
/// Starts from a list of equal entries, each at least one base unit, adding up to
/// 10% of the bankroll, and bets the sum of its two ends. A win crosses both ends off; a loss appends the amount
/// lost. An exhausted list starts over.
#[derive(Debug, Clone)]
pub struct Labouchere {
    ledger: Bankroll,
    base: f64,
    sequence: VecDeque<f64>,
}

impl Labouchere {
    pub fn new(initial_bankroll: f64, min_bet: f64) -> Result<Self, ConfigError> {
        let ledger = Bankroll::new(initial_bankroll, min_bet)?;
        let sequence = initial_sequence(initial_bankroll, min_bet);
        Ok(Self {
            ledger,
            base: min_bet,
            sequence,
        })
    }

    pub fn sequence(&self) -> &VecDeque<f64> {
        &self.sequence
    }

    fn next_amount(&self) -> f64 {
        let amount = match (self.sequence.front(), self.sequence.back()) {
            (Some(first), Some(last)) if self.sequence.len() > 1 => first + last,
            (Some(only), _) => *only,
            _ => self.base,
        };
        amount.min(self.base * MAX_BET_UNITS)
    }
}

fn initial_sequence(initial_bankroll: f64, base: f64) -> VecDeque<f64> {
    let target = initial_bankroll * TARGET_PROFIT;
    let units = (target / base).ceil().max(1.0);
    let len = if units >= MAX_SEQUENCE_LEN as f64 {
        MAX_SEQUENCE_LEN
    } else {
        units as usize
    };
    let entry = (target / len as f64).max(base);
    std::iter::repeat_n(entry, len).collect()
}

impl Strategy for Labouchere {
    fn name(&self) -> &str {
        "labouchere"
    }

    fn calculate_bet(&self) -> Bet {
        Bet::single(BetTarget::Red, self.ledger.stake(self.next_amount()))
    }

    fn update_bankroll(&mut self, winnings: f64) {
        let amount = self.next_amount();
        self.ledger.apply(winnings);
        if winnings > 0.0 {
            self.sequence.pop_front();
            self.sequence.pop_back();
            if self.sequence.is_empty() {
                self.sequence = initial_sequence(self.ledger.initial(), self.base);
            }
        } else {
            self.sequence.push_back(amount);
        }
    }

    fn reset(&mut self) {
        self.ledger.reset();
        self.sequence = initial_sequence(self.ledger.initial(), self.base);
    }

    fn ledger(&self) -> &Bankroll {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut Bankroll {
        &mut self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_adds_up_to_target() {
        let l = Labouchere::new(1000.0, 5.0).unwrap();
        assert_eq!(l.sequence().len(), 20);
        assert_eq!(l.sequence().iter().sum::<f64>(), 100.0);
        assert_eq!(l.calculate_bet().total(), 10.0);
    }

    #[test]
    fn win_cancels_ends_and_loss_appends() {
        let mut l = Labouchere::new(30.0, 1.0).unwrap();
        // [1, 1, 1]
        l.update_bankroll(-2.0);
        assert_eq!(l.sequence().iter().copied().collect::<Vec<_>>(), vec![1.0, 1.0, 1.0, 2.0]);
        assert_eq!(l.calculate_bet().total(), 3.0);
        l.update_bankroll(3.0);
        assert_eq!(l.sequence().iter().copied().collect::<Vec<_>>(), vec![1.0, 1.0]);
        l.update_bankroll(2.0);
        // exhausted, starts over
        assert_eq!(l.sequence().len(), 3);
    }

    #[test]
    fn bet_is_capped() {
        let mut l = Labouchere::new(100_000.0, 1.0).unwrap();
        for _ in 0..200 {
            l.update_bankroll(-1.0);
        }
        assert_eq!(l.calculate_bet().total(), MAX_BET_UNITS);
    }

    #[test]
    fn large_target_is_spread_over_a_bounded_sequence() {
        let l = Labouchere::new(1e9, 0.01).unwrap();
        assert_eq!(l.sequence().len(), MAX_SEQUENCE_LEN);
        let sum: f64 = l.sequence().iter().sum();
        assert!((sum - 1e8).abs() < 1e-3, "{}", sum);
        assert!(l.sequence().iter().all(|e| *e >= 0.01));
        // two entries of 1e6 are above the per-bet cap
        assert_eq!(l.calculate_bet().total(), 0.01 * MAX_BET_UNITS);
    }
}
