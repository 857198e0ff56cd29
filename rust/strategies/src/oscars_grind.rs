use wheelsim_engine::bet::{Bet, BetTarget};
use wheelsim_engine::errors::ConfigError;
use wheelsim_engine::strategy::{Bankroll, NumberClass, Strategy};

/// Cycle goal as a fraction of the initial bankroll.
pub const TARGET_PROFIT: f64 = 0.05;
/// A loss streak of this length abandons the cycle.
pub const MAX_CONSECUTIVE_LOSSES: u32 = 5;
/// No single bet exceeds this many base units.
pub const MAX_BET_UNITS: f64 = 20.0;

/// Grinds back losses on red.
///
/// While the current cycle is behind, each bet is one unit plus the deficit; once
/// even or ahead it is one unit. The cycle restarts when it reaches +5% of the
/// initial bankroll or after five straight losses.
#[derive(Debug, Clone)]
pub struct OscarsGrind {
    ledger: Bankroll,
    base: f64,
    cycle_profit: f64,
    consecutive_losses: u32,
}

impl OscarsGrind {
    pub fn new(initial_bankroll: f64, min_bet: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            ledger: Bankroll::new(initial_bankroll, min_bet)?,
            base: min_bet,
            cycle_profit: 0.0,
            consecutive_losses: 0,
        })
    }

    pub fn cycle_profit(&self) -> f64 {
        self.cycle_profit
    }
}

impl Strategy for OscarsGrind {
    fn name(&self) -> &str {
        "oscars_grind"
    }

    fn calculate_bet(&self) -> Bet {
        let wanted = if self.cycle_profit < 0.0 {
            (self.base - self.cycle_profit).min(self.base * MAX_BET_UNITS)
        } else {
            self.base
        };
        Bet::single(BetTarget::Red, self.ledger.stake(wanted))
    }

    fn update_bankroll(&mut self, winnings: f64) {
        self.ledger.apply(winnings);
        self.cycle_profit += winnings;
        if winnings < 0.0 {
            self.consecutive_losses += 1;
        } else {
            self.consecutive_losses = 0;
        }

        let target = self.ledger.initial() * TARGET_PROFIT;
        if self.cycle_profit >= target || self.consecutive_losses >= MAX_CONSECUTIVE_LOSSES {
            self.cycle_profit = 0.0;
            self.consecutive_losses = 0;
        }
    }

    fn reset(&mut self) {
        self.ledger.reset();
        self.cycle_profit = 0.0;
        self.consecutive_losses = 0;
    }

    fn ledger(&self) -> &Bankroll {
        &self.ledger
    }

    fn ledger_mut(&mut self) -> &mut Bankroll {
        &mut self.ledger
    }

    fn number_class(&self) -> NumberClass {
        NumberClass::High
    }
}
