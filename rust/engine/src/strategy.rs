use serde::{Deserialize, Serialize};
use std::fmt;

use crate::bet::Bet;
use crate::errors::ConfigError;
use crate::wheel::Outcome;

/// Bankroll ledger shared by every betting policy.
///
/// Tracks the current balance, the bankruptcy flag, the stake placed on each spin
/// and the outcome of each spin. A ledger becomes terminal once the balance drops
/// below `min_bet`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bankroll {
    initial: f64,
    current: f64,
    min_bet: f64,
    is_bankrupt: bool,
    max_seen: f64,
    min_seen: f64,
    wins: usize,
    bet_history: Vec<f64>,
    spin_history: Vec<Outcome>,
}

impl Bankroll {
    pub fn new(initial: f64, min_bet: f64) -> Result<Self, ConfigError> {
        if !initial.is_finite() || initial <= 0.0 {
            return Err(ConfigError::NonPositiveBankroll(initial));
        }
        if !min_bet.is_finite() || min_bet <= 0.0 {
            return Err(ConfigError::NonPositiveMinBet(min_bet));
        }
        if min_bet > initial {
            return Err(ConfigError::MinBetExceedsBankroll {
                min_bet,
                bankroll: initial,
            });
        }
        Ok(Self {
            initial,
            current: initial,
            min_bet,
            is_bankrupt: false,
            max_seen: initial,
            min_seen: initial,
            wins: 0,
            bet_history: Vec::new(),
            spin_history: Vec::new(),
        })
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }
    pub fn current(&self) -> f64 {
        self.current
    }
    pub fn min_bet(&self) -> f64 {
        self.min_bet
    }
    pub fn is_bankrupt(&self) -> bool {
        self.is_bankrupt
    }
    pub fn bet_history(&self) -> &[f64] {
        &self.bet_history
    }
    pub fn spin_history(&self) -> &[Outcome] {
        &self.spin_history
    }

    /// Largest stake the ledger can cover, never negative.
    pub fn stake(&self, wanted: f64) -> f64 {
        if self.is_bankrupt {
            return 0.0;
        }
        wanted.min(self.current).max(0.0)
    }

    /// Adds net winnings and flips the bankruptcy flag when the balance falls under `min_bet`.
    pub fn apply(&mut self, winnings: f64) {
        self.current = (self.current + winnings).max(0.0);
        self.max_seen = self.max_seen.max(self.current);
        self.min_seen = self.min_seen.min(self.current);
        if self.current < self.min_bet {
            self.is_bankrupt = true;
        }
    }

    pub fn record_spin(&mut self, outcome: Outcome, stake: f64, winnings: f64) {
        self.bet_history.push(stake);
        self.spin_history.push(outcome);
        if winnings > 0.0 {
            self.wins += 1;
        }
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
        self.is_bankrupt = false;
        self.max_seen = self.initial;
        self.min_seen = self.initial;
        self.wins = 0;
        self.bet_history.clear();
        self.spin_history.clear();
    }

    pub fn statistics(&self) -> StrategyStatistics {
        let total_spins = self.spin_history.len();
        StrategyStatistics {
            total_spins,
            wins: self.wins,
            win_rate: if total_spins == 0 {
                0.0
            } else {
                self.wins as f64 / total_spins as f64
            },
            total_wagered: self.bet_history.iter().sum(),
            profit_loss: self.current - self.initial,
            max_bankroll: self.max_seen,
            min_bankroll: self.min_seen,
            current_bankroll: self.current,
        }
    }
}

/// Snapshot of a strategy's ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyStatistics {
    pub total_spins: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub total_wagered: f64,
    pub profit_loss: f64,
    pub max_bankroll: f64,
    pub min_bankroll: f64,
    pub current_bankroll: f64,
}

/// The slice of the wheel a strategy's pattern report focuses on.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberClass {
    Any,
    /// Any non-green number
    RedOrBlack,
    /// 1-18
    Low,
    /// Any non-green number
    EvenOrOdd,
    /// 10-27
    Middle,
    /// 19-36
    High,
}

impl NumberClass {
    pub fn contains(self, outcome: Outcome) -> bool {
        match self {
            NumberClass::Any => true,
            NumberClass::RedOrBlack | NumberClass::EvenOrOdd => !outcome.is_green(),
            NumberClass::Low => outcome.is_low(),
            NumberClass::Middle => outcome.as_number().is_some_and(|n| (10..=27).contains(&n)),
            NumberClass::High => outcome.is_high(),
        }
    }
}

impl fmt::Display for NumberClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NumberClass::Any => "all numbers",
            NumberClass::RedOrBlack => "red/black",
            NumberClass::Low => "low (1-18)",
            NumberClass::EvenOrOdd => "even/odd",
            NumberClass::Middle => "middle (10-27)",
            NumberClass::High => "high (19-36)",
        };
        f.write_str(s)
    }
}

/// A betting policy driven by a [`Session`](crate::session::Session).
///
/// Implementors own a [`Bankroll`] and their progression counters. The session asks
/// for a bet, resolves it, then reports the net result through
/// [`update_bankroll`](Strategy::update_bankroll); all state changes happen there so
/// that [`calculate_bet`](Strategy::calculate_bet) stays a pure function of state.
pub trait Strategy: Send {
    fn name(&self) -> &str;

    /// Next bet. Its total never exceeds the current bankroll and is empty once bankrupt.
    fn calculate_bet(&self) -> Bet;

    /// Applies net winnings of the last spin and advances the progression.
    fn update_bankroll(&mut self, winnings: f64);

    /// Back to the initial bankroll and counters.
    fn reset(&mut self);

    fn ledger(&self) -> &Bankroll;

    fn ledger_mut(&mut self) -> &mut Bankroll;

    fn number_class(&self) -> NumberClass {
        NumberClass::Any
    }

    fn bankroll(&self) -> f64 {
        self.ledger().current()
    }

    fn is_bankrupt(&self) -> bool {
        self.ledger().is_bankrupt()
    }

    fn record_spin(&mut self, outcome: Outcome, stake: f64, winnings: f64) {
        self.ledger_mut().record_spin(outcome, stake, winnings);
    }

    fn get_statistics(&self) -> StrategyStatistics {
        self.ledger().statistics()
    }
}

/// Builds fresh strategies with the uniform `(initial_bankroll, min_bet)` constructor.
pub trait StrategyFactory: Sync {
    fn name(&self) -> &str;

    fn build(&self, initial_bankroll: f64, min_bet: f64) -> Result<Box<dyn Strategy>, ConfigError>;
}
