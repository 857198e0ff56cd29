use wheelsim_engine::bet::{Bet, BetTarget};
use wheelsim_engine::errors::ConfigError;
use wheelsim_engine::strategy::{Bankroll, NumberClass, Strategy};

/// Multiples of the base unit. The last entry is the cap.
pub const SEQUENCE: [f64; 10] = [1.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0, 21.0, 34.0, 55.0];

/// After `n` consecutive losses bets `SEQUENCE[n - 1]` units on red; one unit after a win.
#[derive(Debug, Clone)]
pub struct Fibonacci {
    ledger: Bankroll,
    base: f64,
    consecutive_losses: usize,
}

impl Fibonacci {
    pub fn new(initial_bankroll: f64, min_bet: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            ledger: Bankroll::new(initial_bankroll, min_bet)?,
            base: min_bet,
            consecutive_losses: 0,
        })
    }
}

impl Strategy for Fibonacci {
    fn name(&self) -> &str {
        "fibonacci"
    }

    fn calculate_bet(&self) -> Bet {
        let units = match self.consecutive_losses {
            0 => 1.0,
            n => SEQUENCE[(n - 1).min(SEQUENCE.len() - 1)],
        };
        Bet::single(BetTarget::Red, self.ledger.stake(self.base * units))
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
        NumberClass::Low
    }
}
