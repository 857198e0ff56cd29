//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "wheelsim",
    version,
    about = "American roulette betting strategy simulator"
)]
pub struct WheelsimCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run repeated sessions per strategy and summarize them
    Sim(SimArgs),
    /// List the built-in strategies
    Strategies,
    /// Show the stored best results per strategy
    History {
        /// History file (.json or .json.zst); defaults to the configured path
        #[arg(long)]
        input: Option<String>,
    },
    /// Draw outcomes from a seeded wheel
    Spin {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 10)]
        count: usize,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SimArgs {
    #[arg(long)]
    pub initial_bankroll: Option<f64>,
    #[arg(long)]
    pub min_bet: Option<f64>,
    #[arg(long)]
    pub num_simulations: Option<usize>,
    #[arg(long)]
    pub max_spins: Option<usize>,
    /// Profit target as a percentage of the initial bankroll
    #[arg(long)]
    pub profit_target: Option<f64>,
    /// Strategy to run; repeat for several. Runs all strategies when omitted
    #[arg(long = "strategy", value_name = "NAME")]
    pub strategies: Vec<String>,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write the full JSON report here (.zst compresses it)
    #[arg(long)]
    pub output: Option<String>,
    #[arg(long, value_name = "PATH", conflicts_with = "no_history")]
    pub history: Option<String>,
    /// Leave the history file untouched
    #[arg(long)]
    pub no_history: bool,
    /// Run sessions on the current thread only
    #[arg(long)]
    pub sequential: bool,
}

impl SimArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            initial_bankroll: self.initial_bankroll,
            min_bet: self.min_bet,
            num_simulations: self.num_simulations,
            max_spins: self.max_spins,
            profit_target_pct: self.profit_target,
            seed: self.seed,
            sequential: self.sequential.then_some(true),
            history_path: self.history.clone(),
        }
    }
}
