use wheelsim_engine::bet::{Bet, BetTarget};
use wheelsim_engine::errors::ConfigError;
use wheelsim_engine::strategy::{Bankroll, Strategy};

/// Units staked on the first to fourth bet of a winning run.
pub const MULTIPLIERS: [f64; 4] = [1.0, 3.0, 2.0, 6.0];
/// Cycle profit, as a fraction of the initial bankroll, that restarts the sequence.
pub const TARGET_PROFIT: f64 = 0.1;

/// 1-3-2-6 on red. A loss, a completed run of four wins, or reaching the cycle
/// target all restart at one unit.
#[derive(Debug, Clone)]
pub struct OneThreeTwoSix {
    ledger: Bankroll,
    base: f64,
    position: usize,
    cycle_profit: f64,
}

impl OneThreeTwoSix {
    pub fn new(initial_bankroll: f64, min_bet: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            ledger: Bankroll::new(initial_bankroll, min_bet)?,
            base: min_bet,
            position: 0,
            cycle_profit: 0.0,
        })
    }
}

impl Strategy for OneThreeTwoSix {
    fn name(&self) -> &str {
        "one_three_two_six"
    }

    fn calculate_bet(&self) -> Bet {
        let wanted = self.base * MULTIPLIERS[self.position];
        Bet::single(BetTarget::Red, self.ledger.stake(wanted))
    }

    fn update_bankroll(&mut self, winnings: f64) {
        self.ledger.apply(winnings);
        self.cycle_profit += winnings;
        if winnings > 0.0 {
            self.position = (self.position + 1) % MULTIPLIERS.len();
            if self.cycle_profit >= self.ledger.initial() * TARGET_PROFIT {
                self.position = 0;
                self.cycle_profit = 0.0;
            }
        } else {
            self.position = 0;
        }
    }

    fn reset(&mut self) {
        self.ledger.reset();
        self.position = 0;
        self.cycle_profit = 0.0;
    }

    fn ledger(&self) -> &Bankroll {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut Bankroll {
        &mut self.ledger
    }
}
