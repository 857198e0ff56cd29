use wheelsim_engine::bet::{Bet, BetTarget};
use wheelsim_engine::errors::ConfigError;
use wheelsim_engine::strategy::{Bankroll, NumberClass, Strategy};

/// The loss streak restarts from the base bet once it reaches this length.
pub const MAX_CONSECUTIVE_LOSSES: u32 = 5;

/// D'Alembert on red: one unit up after a loss, one unit down after a win.
///
/// The stake never drops below the base bet, and a streak of five losses puts it
/// back on the base bet.
#[derive(Debug, Clone)]
pub struct DAlembert {
    ledger: Bankroll,
    base: f64,
    increment: f64,
    level: u32,
    consecutive_losses: u32,
}

impl DAlembert {
    pub fn new(initial_bankroll: f64, min_bet: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            ledger: Bankroll::new(initial_bankroll, min_bet)?,
            base: min_bet,
            increment: min_bet,
            level: 0,
            consecutive_losses: 0,
        })
    }

    /// Units above the base bet.
    pub fn level(&self) -> u32 {
        self.level
    }
}

impl Strategy for DAlembert {
    fn name(&self) -> &str {
        "dalembert"
    }

    fn calculate_bet(&self) -> Bet {
        let wanted = self.base + self.increment * self.level as f64;
        Bet::single(BetTarget::Red, self.ledger.stake(wanted))
    }

    fn update_bankroll(&mut self, winnings: f64) {
        self.ledger.apply(winnings);
        if winnings < 0.0 {
            self.level += 1;
            self.consecutive_losses += 1;
            if self.consecutive_losses >= MAX_CONSECUTIVE_LOSSES {
                self.level = 0;
                self.consecutive_losses = 0;
            }
        } else {
            self.level = self.level.saturating_sub(1);
            self.consecutive_losses = 0;
        }
    }

    fn reset(&mut self) {
        self.ledger.reset();
        self.level = 0;
        self.consecutive_losses = 0;
    }

    fn ledger(&self) -> &Bankroll {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut Bankroll {
        &mut self.ledger
    }

    fn number_class(&self) -> NumberClass {
        NumberClass::Middle
    }
}
