//! Simulation command handler.
//!
//! `sim` resolves the layered configuration, runs every selected strategy through
//! the [`Simulator`], prints a per-strategy summary, and optionally writes a JSON
//! report and updates the best-result history.

use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use wheelsim_engine::analysis::Frequency;
use wheelsim_engine::record::{SessionResult, TerminationReason};
use wheelsim_engine::simulator::{AggregateMetrics, Improvement, SimulationResults, Simulator};
use wheelsim_engine::strategy::StrategyFactory;
use wheelsim_strategies::StrategyKind;

use crate::cli::SimArgs;
use crate::config::{self, Config};
use crate::error::CliError;
use crate::history::JsonHistoryStore;
use crate::io_utils::write_text_auto;
use crate::ui;

#[derive(Serialize)]
struct Report<'a> {
    generated_at: String,
    base_seed: u64,
    config: &'a Config,
    strategies: Vec<StrategyReport<'a>>,
}

#[derive(Serialize)]
struct StrategyReport<'a> {
    metrics: &'a AggregateMetrics,
    sessions: Vec<SessionSummary>,
}

/// Session result without the per-spin history.
#[derive(Serialize)]
struct SessionSummary {
    seed: u64,
    num_spins: usize,
    wins: usize,
    losses: usize,
    win_rate: f64,
    final_bankroll: f64,
    profit_loss: f64,
    termination_reason: TerminationReason,
}

impl From<&SessionResult> for SessionSummary {
    fn from(s: &SessionResult) -> Self {
        Self {
            seed: s.seed,
            num_spins: s.num_spins,
            wins: s.wins,
            losses: s.losses,
            win_rate: s.win_rate,
            final_bankroll: s.final_bankroll,
            profit_loss: s.profit_loss(),
            termination_reason: s.termination_reason,
        }
    }
}

pub fn handle_sim_command(
    args: &SimArgs,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let resolved = config::resolve(&args.overrides())?;
    let cfg = resolved.config;

    let kinds = selected_strategies(&args.strategies)?;
    let simulator = Simulator::new(cfg.to_simulation_config())?;

    print_configuration(&cfg, simulator.base_seed(), out)?;

    let factories: Vec<&dyn StrategyFactory> =
        kinds.iter().map(|k| k as &dyn StrategyFactory).collect();
    let results = simulator.run_simulations(&factories)?;
    let metrics = Simulator::analyze_results(&results);

    writeln!(out, "\n=== Strategy Summary ===")?;
    for kind in &kinds {
        if let Some(m) = metrics.get(kind.as_str()) {
            print_metrics(m, out)?;
        }
    }

    if let Some(path) = &args.output {
        write_report(path, &cfg, simulator.base_seed(), &kinds, &metrics, &results)?;
        writeln!(out, "\nReport written to {}", path)?;
    }

    if args.no_history {
        return Ok(());
    }
    let mut store = match JsonHistoryStore::load(&cfg.history_path) {
        Ok(store) => store,
        Err(e) => {
            ui::display_warning(err, &format!("history not updated: {}", e))?;
            return Ok(());
        }
    };
    let improvements = Simulator::report_history(&metrics, &mut store);
    store.flush()?;
    print_improvements(&improvements, out)?;
    Ok(())
}

/// Parses `--strategy` values, defaulting to every built-in strategy.
fn selected_strategies(names: &[String]) -> Result<Vec<StrategyKind>, CliError> {
    if names.is_empty() {
        return Ok(StrategyKind::ALL.to_vec());
    }
    Ok(names
        .iter()
        .map(|n| n.parse::<StrategyKind>())
        .collect::<Result<Vec<_>, _>>()?)
}

fn print_configuration(cfg: &Config, base_seed: u64, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "=== Simulation Configuration ===")?;
    writeln!(out, "Initial bankroll: {:.2}", cfg.initial_bankroll)?;
    writeln!(out, "Simulations per strategy: {}", cfg.num_simulations)?;
    writeln!(out, "Minimum bet: {:.2}", cfg.min_bet)?;
    writeln!(out, "Max spins: {}", cfg.max_spins)?;
    writeln!(
        out,
        "Profit target: {}% of initial bankroll",
        cfg.profit_target_pct
    )?;
    writeln!(out, "Seed: {}", base_seed)?;
    writeln!(out, "{}", "-".repeat(40))?;
    Ok(())
}

fn print_metrics(m: &AggregateMetrics, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "\n{} ({}):", m.strategy, m.number_class)?;
    writeln!(out, "  Success rate: {}", ui::pct(m.success_rate))?;
    writeln!(out, "  Win rate: {}", ui::pct(m.win_rate))?;
    writeln!(out, "  Average P/L: {}", ui::signed(m.avg_profit_loss))?;
    writeln!(
        out,
        "  Best/worst P/L: {} / {}",
        ui::signed(m.max_profit_loss),
        ui::signed(m.min_profit_loss)
    )?;
    writeln!(out, "  Average spins: {:.1}", m.avg_spins)?;
    for reason in TerminationReason::ALL {
        writeln!(
            out,
            "  {}: {} ({:.1}%)",
            reason_label(reason),
            m.termination_count(reason),
            m.termination_pct(reason)
        )?;
    }
    if m.top_numbers.is_empty() {
        writeln!(out, "  Most effective numbers: none")?;
    } else {
        writeln!(out, "  Most effective numbers: {}", frequencies(&m.top_numbers))?;
    }
    if !m.top_patterns.is_empty() {
        writeln!(out, "  Top patterns: {}", frequencies(&m.top_patterns))?;
    }
    Ok(())
}

fn reason_label(reason: TerminationReason) -> &'static str {
    match reason {
        TerminationReason::Bankruptcy => "Ended by bankruptcy",
        TerminationReason::MaxSpinsReached => "Ended at max spins",
        TerminationReason::ProfitTargetReached => "Ended at profit target",
    }
}

fn frequencies<T: std::fmt::Display>(items: &[Frequency<T>]) -> String {
    items
        .iter()
        .map(|f| format!("{}({})", f.value, f.count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_improvements(improvements: &[Improvement], out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "\n=== History ===")?;
    for imp in improvements {
        let status = match (imp.improved, imp.previous_best) {
            (true, None) => "first record".to_string(),
            (true, Some(_)) => format!("improved by {}", ui::pct(imp.delta())),
            (false, Some(best)) => format!("no change (best {})", ui::pct(best)),
            (false, None) => "no change".to_string(),
        };
        writeln!(out, "{}: {} {}", imp.strategy, ui::pct(imp.win_rate), status)?;
    }
    Ok(())
}

fn write_report(
    path: &str,
    cfg: &Config,
    base_seed: u64,
    kinds: &[StrategyKind],
    metrics: &BTreeMap<String, AggregateMetrics>,
    results: &SimulationResults,
) -> Result<(), CliError> {
    let strategies = kinds
        .iter()
        .filter_map(|k| {
            let m = metrics.get(k.as_str())?;
            let sessions = results
                .get(k.as_str())
                .map(|ss| ss.iter().map(SessionSummary::from).collect())
                .unwrap_or_default();
            Some(StrategyReport {
                metrics: m,
                sessions,
            })
        })
        .collect();
    let report = Report {
        generated_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        base_seed,
        config: cfg,
        strategies,
    };
    let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::other)?;
    write_text_auto(path, &json).map_err(CliError::Engine)
}
