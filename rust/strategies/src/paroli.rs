use wheelsim_engine::bet::{Bet, BetTarget};
use wheelsim_engine::errors::ConfigError;
use wheelsim_engine::strategy::{Bankroll, NumberClass, Strategy};

/// Win streak length after which the bet falls back to base.
pub const MAX_CONSECUTIVE_WINS: u32 = 3;
/// Bankroll gain, as a fraction of the initial bankroll, that also resets the streak.
pub const TARGET_PROFIT: f64 = 0.1;

/// Reverse Martingale on red: doubles after every win, base after a loss.
#[derive(Debug, Clone)]
pub struct Paroli {
    ledger: Bankroll,
    base: f64,
    consecutive_wins: u32,
}

impl Paroli {
    pub fn new(initial_bankroll: f64, min_bet: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            ledger: Bankroll::new(initial_bankroll, min_bet)?,
            base: min_bet,
            consecutive_wins: 0,
        })
    }
}

impl Strategy for Paroli {
    fn name(&self) -> &str {
        "paroli"
    }

    fn calculate_bet(&self) -> Bet {
        let wanted = self.base * 2f64.powi(self.consecutive_wins as i32);
        Bet::single(BetTarget::Red, self.ledger.stake(wanted))
    }

    fn update_bankroll(&mut self, winnings: f64) {
        self.ledger.apply(winnings);
        if winnings > 0.0 {
            self.consecutive_wins += 1;
            if self.consecutive_wins >= MAX_CONSECUTIVE_WINS {
                self.consecutive_wins = 0;
            }
        } else {
            self.consecutive_wins = 0;
        }
        let target = self.ledger.initial() * (1.0 + TARGET_PROFIT);
        if self.ledger.current() >= target {
            self.consecutive_wins = 0;
        }
    }

    fn reset(&mut self) {
        self.ledger.reset();
        self.consecutive_wins = 0;
    }

    fn ledger(&self) -> &Bankroll {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut Bankroll {
        &mut self.ledger
    }

    fn number_class(&self) -> NumberClass {
        NumberClass::EvenOrOdd
    }
}
