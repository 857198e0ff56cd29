use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use tracing::info;

use crate::analysis::{Frequency, Pattern, PatternCounts, TOP_N};
use crate::errors::{ConfigError, SimulationError};
use crate::record::{SessionResult, TerminationReason};
use crate::session::{Session, SessionConfig};
use crate::strategy::{Bankroll, NumberClass, StrategyFactory};
use crate::wheel::Outcome;

/// Sessions grouped by strategy name, each list in repetition order.
pub type SimulationResults = BTreeMap<String, Vec<SessionResult>>;

/// Parameters shared by every session of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub initial_bankroll: f64,
    pub min_bet: f64,
    pub num_simulations: usize,
    pub max_spins: usize,
    /// Fraction of the initial bankroll, e.g. `0.5` for +50%
    pub profit_target: f64,
    /// Base seed; drawn from the thread RNG when absent
    pub seed: Option<u64>,
    /// Run each strategy's repetitions on the rayon pool
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            initial_bankroll: 1000.0,
            min_bet: 1.0,
            num_simulations: 100,
            max_spins: 1000,
            profit_target: 0.5,
            seed: None,
            parallel: true,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        Bankroll::new(self.initial_bankroll, self.min_bet)?;
        if !self.profit_target.is_finite() || self.profit_target < 0.0 {
            return Err(ConfigError::InvalidProfitTarget(self.profit_target));
        }
        Ok(())
    }
}

/// Per-strategy aggregate over all of its sessions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateMetrics {
    pub strategy: String,
    pub sessions: usize,
    pub successful_sessions: usize,
    /// Sessions that reached the profit target, or hit the spin limit while ahead
    pub success_rate: f64,
    pub total_spins: usize,
    pub total_wins: usize,
    /// `total_wins / total_spins`
    pub win_rate: f64,
    pub avg_profit_loss: f64,
    pub max_profit_loss: f64,
    pub min_profit_loss: f64,
    pub avg_spins: f64,
    pub terminations: BTreeMap<TerminationReason, usize>,
    pub number_class: NumberClass,
    pub top_numbers: Vec<Frequency<Outcome>>,
    pub top_patterns: Vec<Frequency<Pattern>>,
}

impl AggregateMetrics {
    pub fn termination_count(&self, reason: TerminationReason) -> usize {
        self.terminations.get(&reason).copied().unwrap_or(0)
    }

    /// Share of sessions that ended for `reason`, in percent.
    pub fn termination_pct(&self, reason: TerminationReason) -> f64 {
        if self.sessions == 0 {
            0.0
        } else {
            self.termination_count(reason) as f64 * 100.0 / self.sessions as f64
        }
    }

    pub fn best_numbers(&self) -> Vec<Outcome> {
        self.top_numbers.iter().map(|f| f.value).collect()
    }
}

/// What a history store reports back after recording a strategy's run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Improvement {
    pub strategy: String,
    pub win_rate: f64,
    pub previous_best: Option<f64>,
    pub improved: bool,
}

impl Improvement {
    /// Gain over the previous best, zero when nothing improved.
    pub fn delta(&self) -> f64 {
        match (self.improved, self.previous_best) {
            (true, Some(prev)) => self.win_rate - prev,
            (true, None) => self.win_rate,
            _ => 0.0,
        }
    }
}

/// Destination for per-strategy results that outlive a run.
pub trait HistorySink {
    fn record(&mut self, strategy: &str, win_rate: f64, best_numbers: &[Outcome]) -> Improvement;
}

/// Runs many independent sessions per strategy and aggregates them.
///
/// # Examples
///
/// ```
/// use wheelsim_engine::simulator::{SimulationConfig, Simulator};
///
/// let config = SimulationConfig { num_simulations: 0, seed: Some(1), ..Default::default() };
/// let sim = Simulator::new(config).unwrap();
/// let results = sim.run_simulations(&[]).unwrap();
/// assert!(Simulator::analyze_results(&results).is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulationConfig,
    base_seed: u64,
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let base_seed = config.seed.unwrap_or_else(rand::random);
        Ok(Self { config, base_seed })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn base_seed(&self) -> u64 {
        self.base_seed
    }

    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            max_spins: self.config.max_spins,
            profit_target: self.config.profit_target,
        }
    }

    /// Plays `num_simulations` sessions for every factory, each with a fresh strategy.
    ///
    /// Every factory is built once up front, so a bad strategy or a duplicated name is
    /// reported before any session runs.
    pub fn run_simulations(
        &self,
        factories: &[&dyn StrategyFactory],
    ) -> Result<SimulationResults, SimulationError> {
        let mut seen = HashSet::new();
        for factory in factories {
            if !seen.insert(factory.name()) {
                return Err(ConfigError::DuplicateStrategy(factory.name().to_string()).into());
            }
            factory.build(self.config.initial_bankroll, self.config.min_bet)?;
        }

        let mut results = SimulationResults::new();
        if self.config.num_simulations == 0 || self.config.max_spins == 0 {
            return Ok(results);
        }

        for factory in factories {
            let sessions = self.run_strategy(*factory)?;
            info!(
                strategy = factory.name(),
                sessions = sessions.len(),
                successes = sessions.iter().filter(|s| s.is_success()).count(),
                "strategy finished"
            );
            results.insert(factory.name().to_string(), sessions);
        }
        Ok(results)
    }

    fn run_strategy(
        &self,
        factory: &dyn StrategyFactory,
    ) -> Result<Vec<SessionResult>, SimulationError> {
        let n = self.config.num_simulations;
        if self.config.parallel {
            (0..n)
                .into_par_iter()
                .map(|rep| self.run_session(factory, rep))
                .collect()
        } else {
            (0..n).map(|rep| self.run_session(factory, rep)).collect()
        }
    }

    fn run_session(
        &self,
        factory: &dyn StrategyFactory,
        rep: usize,
    ) -> Result<SessionResult, SimulationError> {
        let strategy = factory.build(self.config.initial_bankroll, self.config.min_bet)?;
        let seed = session_seed(self.base_seed, factory.name(), rep as u64);
        Session::new(strategy, seed, self.session_config()).run()
    }

    /// Aggregates every strategy's sessions.
    pub fn analyze_results(results: &SimulationResults) -> BTreeMap<String, AggregateMetrics> {
        results
            .iter()
            .map(|(name, sessions)| (name.clone(), aggregate(name, sessions)))
            .collect()
    }

    /// Reports each strategy's win rate and best numbers to `sink`.
    pub fn report_history(
        metrics: &BTreeMap<String, AggregateMetrics>,
        sink: &mut dyn HistorySink,
    ) -> Vec<Improvement> {
        metrics
            .values()
            .map(|m| sink.record(&m.strategy, m.win_rate, &m.best_numbers()))
            .collect()
    }
}

fn aggregate(name: &str, sessions: &[SessionResult]) -> AggregateMetrics {
    let count = sessions.len();
    let successful_sessions = sessions.iter().filter(|s| s.is_success()).count();
    let total_spins: usize = sessions.iter().map(|s| s.num_spins).sum();
    let total_wins: usize = sessions.iter().map(|s| s.wins).sum();
    let profits: Vec<f64> = sessions.iter().map(|s| s.profit_loss()).collect();

    let mut terminations: BTreeMap<TerminationReason, usize> =
        TerminationReason::ALL.iter().map(|r| (*r, 0)).collect();
    for s in sessions {
        *terminations.entry(s.termination_reason).or_insert(0) += 1;
    }

    let number_class = sessions
        .first()
        .map(|s| s.number_class)
        .unwrap_or(NumberClass::Any);
    let mut counts = PatternCounts::new();
    for s in sessions {
        let winning: Vec<Outcome> = s.winning_numbers().collect();
        counts.observe_session(&winning);
    }

    let ratio = |num: usize, den: usize| if den == 0 { 0.0 } else { num as f64 / den as f64 };
    AggregateMetrics {
        strategy: name.to_string(),
        sessions: count,
        successful_sessions,
        success_rate: ratio(successful_sessions, count),
        total_spins,
        total_wins,
        win_rate: ratio(total_wins, total_spins),
        avg_profit_loss: if count == 0 {
            0.0
        } else {
            profits.iter().sum::<f64>() / count as f64
        },
        max_profit_loss: profits.iter().copied().reduce(f64::max).unwrap_or(0.0),
        min_profit_loss: profits.iter().copied().reduce(f64::min).unwrap_or(0.0),
        avg_spins: ratio(total_spins, count),
        terminations,
        number_class,
        top_numbers: counts.top_numbers(number_class, TOP_N),
        top_patterns: counts.top_patterns(TOP_N),
    }
}

/// Seed for one session, a pure function of the run seed, strategy and repetition.
pub fn session_seed(base: u64, strategy: &str, rep: u64) -> u64 {
    // FNV-1a over the name, then a splitmix64 finalizer over the mix
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for b in strategy.bytes() {
        h ^= b as u64;
        h = h.wrapping_mul(0x0100_0000_01b3);
    }
    let mut z = base
        .wrapping_add(h.rotate_left(17))
        .wrapping_add(rep.wrapping_mul(0x9e37_79b9_7f4a_7c15));
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_seeds_differ_by_name_and_rep() {
        let a = session_seed(42, "martingale", 0);
        assert_eq!(a, session_seed(42, "martingale", 0));
        assert_ne!(a, session_seed(42, "martingale", 1));
        assert_ne!(a, session_seed(42, "fibonacci", 0));
        assert_ne!(a, session_seed(43, "martingale", 0));
    }

    #[test]
    fn config_validation() {
        let bad = SimulationConfig {
            profit_target: -0.1,
            ..Default::default()
        };
        assert_eq!(
            bad.validate(),
            Err(ConfigError::InvalidProfitTarget(-0.1))
        );
        let bad = SimulationConfig {
            min_bet: 2000.0,
            ..Default::default()
        };
        assert!(Simulator::new(bad).is_err());
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn improvement_delta() {
        let imp = Improvement {
            strategy: "x".into(),
            win_rate: 0.5,
            previous_best: Some(0.4),
            improved: true,
        };
        assert!((imp.delta() - 0.1).abs() < 1e-12);
        let imp = Improvement {
            improved: false,
            ..imp
        };
        assert_eq!(imp.delta(), 0.0);
    }
}
