use wheelsim_engine::bet::{Bet, BetTarget};
use wheelsim_engine::errors::ConfigError;
use wheelsim_engine::strategy::{Bankroll, Strategy};
use wheelsim_engine::wheel::Outcome;

/// Units per spin: 14 on high, 5 on the 13-18 six-line, 1 on zero.
pub const HIGH_UNITS: f64 = 14.0;
pub const SIX_LINE_UNITS: f64 = 5.0;
pub const ZERO_UNITS: f64 = 1.0;
pub const UNITS_PER_SPIN: f64 = HIGH_UNITS + SIX_LINE_UNITS + ZERO_UNITS;

pub const MAX_LEVEL: u32 = 4;
/// Session profit in base units that resets the progression.
pub const TARGET_UNITS: f64 = 20.0;
/// Session loss in base units that resets the progression.
pub const STOP_LOSS_UNITS: f64 = 40.0;

/// Six-line covering 13-18 (streets 5 and 6).
const SIX_LINE_13_18: BetTarget = BetTarget::SixLine(5);

/// Fixed coverage of 25 pockets, scaled by a progression level from 1 to 4.
///
/// Two losses in a row raise the level; a win lowers it. Reaching the session
/// target or the stop-loss puts the level back to 1 and starts a new session count.
#[derive(Debug, Clone)]
pub struct JamesBond {
    ledger: Bankroll,
    unit: f64,
    level: u32,
    consecutive_losses: u32,
    session_profit: f64,
}

impl JamesBond {
    pub fn new(initial_bankroll: f64, min_bet: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            ledger: Bankroll::new(initial_bankroll, min_bet)?,
            unit: min_bet,
            level: 1,
            consecutive_losses: 0,
            session_profit: 0.0,
        })
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

impl Strategy for JamesBond {
    fn name(&self) -> &str {
        "james_bond"
    }

    fn calculate_bet(&self) -> Bet {
        if self.ledger.is_bankrupt() {
            return Bet::new();
        }
        let mut unit = self.unit * self.level as f64;
        if unit * UNITS_PER_SPIN > self.ledger.current() {
            unit = self.ledger.current() / UNITS_PER_SPIN;
        }
        let mut bet = Bet::new();
        bet.place(BetTarget::High, unit * HIGH_UNITS);
        bet.place(SIX_LINE_13_18, unit * SIX_LINE_UNITS);
        bet.place(BetTarget::Straight(Outcome::ZERO), unit * ZERO_UNITS);
        bet.clamped_to(self.ledger.current())
    }

    fn update_bankroll(&mut self, winnings: f64) {
        self.ledger.apply(winnings);
        self.session_profit += winnings;

        if winnings >= 0.0 {
            self.consecutive_losses = 0;
            if self.session_profit >= TARGET_UNITS * self.unit {
                self.level = 1;
                self.session_profit = 0.0;
            } else if self.level > 1 {
                self.level -= 1;
            }
        } else {
            self.consecutive_losses += 1;
            if self.consecutive_losses >= 2 {
                self.level = (self.level + 1).min(MAX_LEVEL);
            }
            if self.session_profit <= -STOP_LOSS_UNITS * self.unit {
                self.level = 1;
                self.session_profit = 0.0;
            }
        }
    }

    fn reset(&mut self) {
        self.ledger.reset();
        self.level = 1;
        self.consecutive_losses = 0;
        self.session_profit = 0.0;
    }

    fn ledger(&self) -> &Bankroll {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut Bankroll {
        &mut self.ledger
    }
}
