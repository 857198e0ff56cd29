//! # wheelsim CLI Library
//!
//! Command-line surface for the roulette strategy simulator. [`run`] parses the
//! arguments and dispatches to a subcommand, writing to the given streams so the
//! whole CLI can be driven from tests.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = ["wheelsim", "sim", "--num-simulations", "10", "--no-history"];
//! let code = wheelsim_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `sim`: Run repeated sessions per strategy, report and update history
//! - `strategies`: List the built-in strategies
//! - `history`: Show the stored best results
//! - `spin`: Draw outcomes from a seeded wheel
//! - `cfg`: Display the resolved configuration

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod history;
pub mod io_utils;
pub mod logging;
pub mod ui;

use cli::{Commands, WheelsimCli};
use commands::{
    handle_cfg_command, handle_history_command, handle_sim_command, handle_spin_command,
    handle_strategies_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["sim", "strategies", "history", "spin", "cfg"];

/// Main entry point for the CLI application.
///
/// Returns the process exit code: [`exit_code::SUCCESS`] or [`exit_code::ERROR`].
/// `--help` and `--version` print to `out` and succeed.
///
/// ```
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = wheelsim_cli::run(["wheelsim", "spin", "--seed", "42", "--count", "3"], &mut out, &mut err);
/// assert_eq!(code, 0);
/// assert!(String::from_utf8(out).unwrap().starts_with("Seed: 42"));
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match WheelsimCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => return report_parse_error(e, out, err),
    };

    let result = match cli.cmd {
        Commands::Sim(args) => handle_sim_command(&args, out, err),
        Commands::Strategies => handle_strategies_command(out),
        Commands::History { input } => handle_history_command(input, out, err),
        Commands::Spin { seed, count } => handle_spin_command(seed, count, out),
        Commands::Cfg => handle_cfg_command(out),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = ui::write_error(err, &e.to_string());
            exit_code::ERROR
        }
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    use clap::error::ErrorKind;

    // Help and version should print to stdout and exit 0
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return match write!(out, "{}", e) {
            Ok(()) => exit_code::SUCCESS,
            Err(_) => exit_code::ERROR,
        };
    }

    let _ = write_usage(&e, err);
    exit_code::ERROR
}

fn write_usage(e: &clap::Error, err: &mut dyn Write) -> std::io::Result<()> {
    writeln!(err, "{}", e)?;
    writeln!(err)?;
    writeln!(err, "wheelsim roulette simulator")?;
    writeln!(err, "Usage: wheelsim <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: wheelsim --help")
}
