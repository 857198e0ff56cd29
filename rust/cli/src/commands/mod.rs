//! Command handlers, one module per subcommand.
//!
//! Each handler takes its parsed arguments plus the output streams as
//! `&mut dyn Write` and returns `Result<(), CliError>`; [`crate::run`] maps the
//! result to an exit code.

mod cfg;
mod history;
mod sim;
mod spin;
mod strategies;

pub use cfg::handle_cfg_command;
pub use history::handle_history_command;
pub use sim::handle_sim_command;
pub use spin::handle_spin_command;
pub use strategies::handle_strategies_command;
