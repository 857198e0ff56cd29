use tracing::{debug, warn};

use crate::errors::SimulationError;
use crate::record::{SessionResult, SpinRecord, TerminationReason};
use crate::strategy::Strategy;
use crate::table::Table;

/// Lifecycle of a session. Every state other than `Active` is terminal.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionState {
    Active,
    Bankrupt,
    MaxSpinsReached,
    ProfitTargetReached,
}

impl SessionState {
    pub fn termination_reason(self) -> Option<TerminationReason> {
        match self {
            SessionState::Active => None,
            SessionState::Bankrupt => Some(TerminationReason::Bankruptcy),
            SessionState::MaxSpinsReached => Some(TerminationReason::MaxSpinsReached),
            SessionState::ProfitTargetReached => Some(TerminationReason::ProfitTargetReached),
        }
    }
}

/// Limits that end a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub max_spins: usize,
    /// Fraction of the initial bankroll, e.g. `0.5` for +50%
    pub profit_target: f64,
}

/// Drives one strategy against one seeded table until a terminal state.
///
/// Each tick asks the strategy for a bet, clamps it to the bankroll, spins, feeds the
/// net result back and appends a [`SpinRecord`]. Termination is checked in priority
/// order: bankruptcy, spin limit, profit target.
///
/// # Examples
///
/// ```
/// use wheelsim_engine::bet::{Bet, BetTarget};
/// use wheelsim_engine::session::{Session, SessionConfig};
/// use wheelsim_engine::strategy::{Bankroll, Strategy};
///
/// struct RedOnly(Bankroll);
///
/// impl Strategy for RedOnly {
///     fn name(&self) -> &str { "red" }
///     fn calculate_bet(&self) -> Bet { Bet::single(BetTarget::Red, self.0.stake(1.0)) }
///     fn update_bankroll(&mut self, winnings: f64) { self.0.apply(winnings) }
///     fn reset(&mut self) { self.0.reset() }
///     fn ledger(&self) -> &Bankroll { &self.0 }
///     fn ledger_mut(&mut self) -> &mut Bankroll { &mut self.0 }
/// }
///
/// let strategy = Box::new(RedOnly(Bankroll::new(100.0, 1.0).unwrap()));
/// let config = SessionConfig { max_spins: 20, profit_target: 0.5 };
/// let result = Session::new(strategy, 7, config).run().unwrap();
/// assert!(result.num_spins <= 20);
/// ```
pub struct Session {
    strategy: Box<dyn Strategy>,
    table: Table,
    seed: u64,
    config: SessionConfig,
    state: SessionState,
    initial_bankroll: f64,
    wins: usize,
    losses: usize,
    spins: Vec<SpinRecord>,
    bankroll_history: Vec<f64>,
}

impl Session {
    pub fn new(strategy: Box<dyn Strategy>, seed: u64, config: SessionConfig) -> Self {
        let initial_bankroll = strategy.bankroll();
        let state = if strategy.is_bankrupt() {
            SessionState::Bankrupt
        } else if config.max_spins == 0 {
            SessionState::MaxSpinsReached
        } else {
            SessionState::Active
        };
        Self {
            strategy,
            table: Table::new_with_seed(seed),
            seed,
            config,
            state,
            initial_bankroll,
            wins: 0,
            losses: 0,
            spins: Vec::new(),
            bankroll_history: vec![initial_bankroll],
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }

    pub fn spins(&self) -> &[SpinRecord] {
        &self.spins
    }

    /// Plays one spin and returns the state after it.
    pub fn step(&mut self) -> Result<SessionState, SimulationError> {
        if self.state != SessionState::Active {
            return Err(SimulationError::SessionFinished);
        }

        let bankroll = self.strategy.bankroll();
        let mut bet = self.strategy.calculate_bet();
        if bet.total() > bankroll {
            warn!(
                strategy = self.strategy.name(),
                requested = bet.total(),
                bankroll,
                "bet exceeds bankroll, clamping"
            );
            bet = bet.clamped_to(bankroll);
        }

        let (outcome, winnings) = self.table.spin(&bet)?;
        self.strategy.update_bankroll(winnings);
        self.strategy.record_spin(outcome, bet.total(), winnings);

        if winnings > 0.0 {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        let bankroll_after = self.strategy.bankroll();
        self.bankroll_history.push(bankroll_after);
        self.spins.push(SpinRecord {
            outcome,
            bet,
            winnings,
            bankroll_after,
        });

        self.state = self.check_termination();
        Ok(self.state)
    }

    fn check_termination(&self) -> SessionState {
        if self.strategy.is_bankrupt() {
            SessionState::Bankrupt
        } else if self.spins.len() >= self.config.max_spins {
            SessionState::MaxSpinsReached
        } else if self.strategy.bankroll() >= self.initial_bankroll * (1.0 + self.config.profit_target) {
            SessionState::ProfitTargetReached
        } else {
            SessionState::Active
        }
    }

    /// Steps until a terminal state and returns the summary.
    pub fn run(mut self) -> Result<SessionResult, SimulationError> {
        while self.state == SessionState::Active {
            self.step()?;
        }
        let spins = std::mem::take(&mut self.spins);
        let bankroll_history = std::mem::take(&mut self.bankroll_history);
        let result = self.build_result(spins, bankroll_history);
        debug!(
            strategy = %result.strategy,
            seed = result.seed,
            spins = result.num_spins,
            reason = %result.termination_reason,
            final_bankroll = result.final_bankroll,
            "session finished"
        );
        Ok(result)
    }

    /// Summary of a finished session, `None` while still active.
    pub fn get_results(&self) -> Option<SessionResult> {
        self.state
            .termination_reason()
            .map(|_| self.build_result(self.spins.clone(), self.bankroll_history.clone()))
    }

    fn build_result(&self, spins: Vec<SpinRecord>, bankroll_history: Vec<f64>) -> SessionResult {
        let num_spins = spins.len();
        SessionResult {
            strategy: self.strategy.name().to_string(),
            number_class: self.strategy.number_class(),
            seed: self.seed,
            num_spins,
            wins: self.wins,
            losses: self.losses,
            win_rate: if num_spins == 0 {
                0.0
            } else {
                self.wins as f64 / num_spins as f64
            },
            initial_bankroll: self.initial_bankroll,
            final_bankroll: self.strategy.bankroll(),
            termination_reason: self
                .state
                .termination_reason()
                .unwrap_or(TerminationReason::MaxSpinsReached),
            spins,
            bankroll_history,
        }
    }
}
