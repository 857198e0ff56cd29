use std::collections::HashMap;

use wheelsim_engine::bet::{Bet, BetTarget};
use wheelsim_engine::errors::{ConfigError, SimulationError};
use wheelsim_engine::record::TerminationReason;
use wheelsim_engine::simulator::{
    HistorySink, Improvement, SimulationConfig, Simulator,
};
use wheelsim_engine::strategy::{Bankroll, NumberClass, Strategy, StrategyFactory};
use wheelsim_engine::wheel::Outcome;

struct Flat {
    name: &'static str,
    ledger: Bankroll,
    target: BetTarget,
}

impl Strategy for Flat {
    fn name(&self) -> &str {
        self.name
    }
    fn calculate_bet(&self) -> Bet {
        Bet::single(self.target, self.ledger.stake(self.ledger.min_bet()))
    }
    fn update_bankroll(&mut self, winnings: f64) {
        self.ledger.apply(winnings);
    }
    fn reset(&mut self) {
        self.ledger.reset();
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

struct FlatFactory(&'static str, BetTarget);

impl StrategyFactory for FlatFactory {
    fn name(&self) -> &str {
        self.0
    }
    fn build(&self, initial: f64, min_bet: f64) -> Result<Box<dyn Strategy>, ConfigError> {
        Ok(Box::new(Flat {
            name: self.0,
            ledger: Bankroll::new(initial, min_bet)?,
            target: self.1,
        }))
    }
}

struct Broken;

impl StrategyFactory for Broken {
    fn name(&self) -> &str {
        "broken"
    }
    fn build(&self, _: f64, _: f64) -> Result<Box<dyn Strategy>, ConfigError> {
        Err(ConfigError::UnknownStrategy("broken".into()))
    }
}

fn config(parallel: bool) -> SimulationConfig {
    SimulationConfig {
        initial_bankroll: 50.0,
        min_bet: 5.0,
        num_simulations: 40,
        max_spins: 200,
        profit_target: 0.5,
        seed: Some(1234),
        parallel,
    }
}

#[test]
fn sequential_and_parallel_runs_are_identical() {
    let red = FlatFactory("red", BetTarget::Red);
    let dozen = FlatFactory("dozen", BetTarget::Dozen(2));
    let factories: [&dyn StrategyFactory; 2] = [&red, &dozen];

    let seq = Simulator::new(config(false))
        .unwrap()
        .run_simulations(&factories)
        .unwrap();
    let par = Simulator::new(config(true))
        .unwrap()
        .run_simulations(&factories)
        .unwrap();
    assert_eq!(seq, par);
    assert_eq!(seq["red"].len(), 40);

    let again = Simulator::new(config(true))
        .unwrap()
        .run_simulations(&factories)
        .unwrap();
    assert_eq!(par, again);
}

#[test]
fn aggregates_are_consistent_with_sessions() {
    let red = FlatFactory("red", BetTarget::Red);
    let results = Simulator::new(config(true))
        .unwrap()
        .run_simulations(&[&red])
        .unwrap();
    let metrics = Simulator::analyze_results(&results);
    let m = &metrics["red"];
    let sessions = &results["red"];

    assert_eq!(m.sessions, 40);
    assert!((0.0..=1.0).contains(&m.win_rate));
    assert!((0.0..=1.0).contains(&m.success_rate));
    assert_eq!(
        m.total_spins,
        sessions.iter().map(|s| s.num_spins).sum::<usize>()
    );
    let by_reason: usize = TerminationReason::ALL
        .iter()
        .map(|r| m.termination_count(*r))
        .sum();
    assert_eq!(by_reason, 40);
    let pct: f64 = TerminationReason::ALL
        .iter()
        .map(|r| m.termination_pct(*r))
        .sum();
    assert!((pct - 100.0).abs() < 1e-9);
    assert!(m.min_profit_loss <= m.avg_profit_loss && m.avg_profit_loss <= m.max_profit_loss);
    assert_eq!(
        m.successful_sessions,
        sessions.iter().filter(|s| s.is_success()).count()
    );

    // pattern filter: only high numbers are reported for this strategy
    assert!(m.top_numbers.len() <= 5);
    assert!(m.top_numbers.iter().all(|f| f.value.is_high()));
    assert!(m.top_patterns.len() <= 5);
    assert!(m
        .top_numbers
        .windows(2)
        .all(|w| w[0].count >= w[1].count));
}

#[test]
fn zero_simulations_or_spins_give_empty_aggregates() {
    let red = FlatFactory("red", BetTarget::Red);
    for (sims, spins) in [(0, 100), (10, 0)] {
        let cfg = SimulationConfig {
            num_simulations: sims,
            max_spins: spins,
            ..config(true)
        };
        let results = Simulator::new(cfg).unwrap().run_simulations(&[&red]).unwrap();
        assert!(results.is_empty());
        assert!(Simulator::analyze_results(&results).is_empty());
    }
}

#[test]
fn construction_failures_surface_before_any_session() {
    let red = FlatFactory("red", BetTarget::Red);
    let err = Simulator::new(config(true))
        .unwrap()
        .run_simulations(&[&red, &Broken])
        .unwrap_err();
    assert_eq!(
        err,
        SimulationError::Config(ConfigError::UnknownStrategy("broken".into()))
    );

    let again = FlatFactory("red", BetTarget::Black);
    let err = Simulator::new(config(true))
        .unwrap()
        .run_simulations(&[&red, &again])
        .unwrap_err();
    assert_eq!(
        err,
        SimulationError::Config(ConfigError::DuplicateStrategy("red".into()))
    );
}

#[derive(Default)]
struct MemorySink {
    best: HashMap<String, f64>,
    calls: Vec<(String, Vec<Outcome>)>,
}

impl HistorySink for MemorySink {
    fn record(&mut self, strategy: &str, win_rate: f64, best_numbers: &[Outcome]) -> Improvement {
        self.calls.push((strategy.to_string(), best_numbers.to_vec()));
        let previous_best = self.best.get(strategy).copied();
        let improved = previous_best.is_none_or(|p| win_rate > p);
        if improved {
            self.best.insert(strategy.to_string(), win_rate);
        }
        Improvement {
            strategy: strategy.to_string(),
            win_rate,
            previous_best,
            improved,
        }
    }
}

#[test]
fn history_receives_every_strategy() {
    let red = FlatFactory("red", BetTarget::Red);
    let odd = FlatFactory("odd", BetTarget::Odd);
    let results = Simulator::new(config(true))
        .unwrap()
        .run_simulations(&[&red, &odd])
        .unwrap();
    let metrics = Simulator::analyze_results(&results);

    let mut sink = MemorySink::default();
    let first = Simulator::report_history(&metrics, &mut sink);
    assert_eq!(first.len(), 2);
    assert!(first.iter().all(|i| i.improved && i.previous_best.is_none()));
    assert_eq!(sink.calls[0].1, metrics["odd"].best_numbers());

    let second = Simulator::report_history(&metrics, &mut sink);
    assert!(second.iter().all(|i| !i.improved && i.delta() == 0.0));
}
