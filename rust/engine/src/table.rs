use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::bet::Bet;
use crate::errors::TableError;
use crate::wheel::{Outcome, WHEEL_SIZE};

/// American roulette table: a seeded wheel plus the paytable.
#[derive(Debug)]
pub struct Table {
    rng: ChaCha20Rng,
}

impl Table {
    pub fn new_with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Uniform draw over the 38 pockets.
    pub fn draw(&mut self) -> Outcome {
        let index = self.rng.random_range(0..WHEEL_SIZE);
        Outcome::from_index(index).unwrap_or(Outcome::ZERO)
    }

    /// Net winnings of `bet` when `outcome` comes up: total payout of the
    /// winning targets (stake returned plus odds) minus the total stake.
    pub fn resolve(bet: &Bet, outcome: Outcome) -> Result<f64, TableError> {
        let mut payout = 0.0;
        for (target, &stake) in bet.iter() {
            target.validate()?;
            if !stake.is_finite() || stake < 0.0 {
                return Err(TableError::InvalidStake {
                    target: target.to_string(),
                    stake,
                });
            }
            if target.covers(outcome) {
                payout += stake * (target.payout_odds() as f64 + 1.0);
            }
        }
        Ok(payout - bet.total())
    }

    /// Draws an outcome and resolves `bet` against it.
    pub fn spin(&mut self, bet: &Bet) -> Result<(Outcome, f64), TableError> {
        let outcome = self.draw();
        let winnings = Self::resolve(bet, outcome)?;
        Ok((outcome, winnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bet::BetTarget;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = Table::new_with_seed(42);
        let mut b = Table::new_with_seed(42);
        let xs: Vec<Outcome> = (0..50).map(|_| a.draw()).collect();
        let ys: Vec<Outcome> = (0..50).map(|_| b.draw()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn empty_bet_resolves_to_zero() {
        assert_eq!(Table::resolve(&Bet::new(), Outcome::ZERO).unwrap(), 0.0);
    }

    #[test]
    fn mixed_bet_nets_wins_against_losses() {
        let mut bet = Bet::new();
        bet.place(BetTarget::Red, 10.0);
        bet.place(BetTarget::Straight(Outcome::number(3).unwrap()), 1.0);
        // 3 is red: 20 back on red, 36 back on the straight
        let w = Table::resolve(&bet, Outcome::number(3).unwrap()).unwrap();
        assert_eq!(w, 20.0 + 36.0 - 11.0);
        // 00 loses both
        let w = Table::resolve(&bet, Outcome::DOUBLE_ZERO).unwrap();
        assert_eq!(w, -11.0);
    }

    #[test]
    fn malformed_target_is_rejected() {
        let bet = Bet::single(BetTarget::Street(13), 1.0);
        assert!(matches!(
            Table::resolve(&bet, Outcome::ZERO),
            Err(TableError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn negative_stake_from_deserialized_bet_is_rejected() {
        let bet: Bet = serde_json::from_str(r#"{"red": -1.0}"#).unwrap();
        assert!(matches!(
            Table::resolve(&bet, Outcome::ZERO),
            Err(TableError::InvalidStake { .. })
        ));
    }
}
