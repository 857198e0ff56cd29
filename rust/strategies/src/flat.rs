use wheelsim_engine::bet::{Bet, BetTarget};
use wheelsim_engine::errors::ConfigError;
use wheelsim_engine::strategy::{Bankroll, Strategy};

/// One base unit on red every spin. The reference point for every progression.
#[derive(Debug, Clone)]
pub struct Flat {
    ledger: Bankroll,
}

impl Flat {
    pub fn new(initial_bankroll: f64, min_bet: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            ledger: Bankroll::new(initial_bankroll, min_bet)?,
        })
    }
}

impl Strategy for Flat {
    fn name(&self) -> &str {
        "flat"
    }

    fn calculate_bet(&self) -> Bet {
        Bet::single(BetTarget::Red, self.ledger.stake(self.ledger.min_bet()))
    }

    fn update_bankroll(&mut self, winnings: f64) {
        self.ledger.apply(winnings);
    }

    fn reset(&mut self) {
        self.ledger.reset();
    }

    fn ledger(&self) -> &Bankroll {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut Bankroll {
        &mut self.ledger
    }
}
