use wheelsim_engine::bet::{Bet, BetTarget};
use wheelsim_engine::errors::ConfigError;
use wheelsim_engine::strategy::{Bankroll, NumberClass, Strategy};

/// Consecutive losses before the progression restarts on the other color.
pub const MAX_CONSECUTIVE_LOSSES: u32 = 10;
/// Extra base units added per consecutive loss.
pub const EXTRA_UNITS: f64 = 2.0;
/// Spins between color switches.
pub const COLOR_SWITCH_EVERY: u32 = 12;
/// Session profit, as a fraction of the initial bankroll, that turns on aggressive mode.
pub const AGGRESSIVE_TRIGGER: f64 = 0.1;

/// Martingale variant: `2^n * base + n * 2 * base` after `n` losses.
///
/// The extra units grow by half again while the session is at least 10% up.
/// The color alternates between red and black every 12 spins and whenever the
/// loss cap restarts the progression.
#[derive(Debug, Clone)]
pub struct GrandMartingale {
    ledger: Bankroll,
    base: f64,
    consecutive_losses: u32,
    spins_on_color: u32,
    on_red: bool,
    session_profit: f64,
    aggressive: bool,
}

impl GrandMartingale {
    pub fn new(initial_bankroll: f64, min_bet: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            ledger: Bankroll::new(initial_bankroll, min_bet)?,
            base: min_bet,
            consecutive_losses: 0,
            spins_on_color: 0,
            on_red: true,
            session_profit: 0.0,
            aggressive: false,
        })
    }

    fn color(&self) -> BetTarget {
        if self.on_red {
            BetTarget::Red
        } else {
            BetTarget::Black
        }
    }

    pub fn is_aggressive(&self) -> bool {
        self.aggressive
    }
}

impl Strategy for GrandMartingale {
    fn name(&self) -> &str {
        "grand_martingale"
    }

    fn calculate_bet(&self) -> Bet {
        let n = self.consecutive_losses;
        let wanted = if n == 0 {
            self.base
        } else {
            let mut extra = n as f64 * EXTRA_UNITS * self.base;
            if self.aggressive {
                extra *= 1.5;
            }
            2f64.powi(n as i32) * self.base + extra
        };
        Bet::single(self.color(), self.ledger.stake(wanted))
    }

    fn update_bankroll(&mut self, winnings: f64) {
        self.ledger.apply(winnings);
        self.session_profit += winnings;

        let trigger = self.ledger.initial() * AGGRESSIVE_TRIGGER;
        if !self.aggressive && self.session_profit >= trigger {
            self.aggressive = true;
        } else if self.aggressive && self.session_profit <= 0.0 {
            self.aggressive = false;
        }

        if winnings > 0.0 {
            self.consecutive_losses = 0;
        } else {
            self.consecutive_losses += 1;
            if self.consecutive_losses >= MAX_CONSECUTIVE_LOSSES {
                self.consecutive_losses = 0;
                self.on_red = !self.on_red;
            }
        }

        self.spins_on_color += 1;
        if self.spins_on_color >= COLOR_SWITCH_EVERY {
            self.spins_on_color = 0;
            self.on_red = !self.on_red;
        }
    }

    fn reset(&mut self) {
        self.ledger.reset();
        self.consecutive_losses = 0;
        self.spins_on_color = 0;
        self.on_red = true;
        self.session_profit = 0.0;
        self.aggressive = false;
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
