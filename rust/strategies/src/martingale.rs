use wheelsim_engine::bet::{Bet, BetTarget};
use wheelsim_engine::errors::ConfigError;
use wheelsim_engine::strategy::{Bankroll, NumberClass, Strategy};

/// Doubling stops growing after this many consecutive losses.
pub const MAX_DOUBLINGS: u32 = 10;

/// Classic Martingale on red: `base * 2^losses`, back to base after a win.
#[derive(Debug, Clone)]
pub struct Martingale {
    ledger: Bankroll,
    base: f64,
    consecutive_losses: u32,
}

impl Martingale {
    pub fn new(initial_bankroll: f64, min_bet: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            ledger: Bankroll::new(initial_bankroll, min_bet)?,
            base: min_bet,
            consecutive_losses: 0,
        })
    }

    pub fn consecutive_losses(&self) -> u32 {
        self.consecutive_losses
    }
}

impl Strategy for Martingale {
    fn name(&self) -> &str {
        "martingale"
    }

    fn calculate_bet(&self) -> Bet {
        let doublings = self.consecutive_losses.min(MAX_DOUBLINGS);
        let wanted = self.base * 2f64.powi(doublings as i32);
        Bet::single(BetTarget::Red, self.ledger.stake(wanted))
    }

    fn update_bankroll(&mut self, winnings: f64) {
        self.ledger.apply(winnings);
        if winnings < 0.0 {
            self.consecutive_losses += 1;
        } else {
            self.consecutive_losses = 0;
        }
    }

    fn reset(&mut self) {
        self.ledger.reset();
        self.consecutive_losses = 0;
    }

    fn ledger(&self) -> &Bankroll {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut Bankroll {
        &mut self.ledger
    }

    fn number_class(&self) -> NumberClass {
        NumberClass::RedOrBlack
    }
}
