//! Configuration command handler.
//!
//! Prints every setting with the layer it came from:
//!
//! ```json
//! {
//!   "initial_bankroll": {
//!     "value": 1000.0,
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let config::ConfigResolved { config, sources } = config::load_with_sources()?;
    let display = serde_json::json!({
        "initial_bankroll": {
            "value": config.initial_bankroll,
            "source": sources.initial_bankroll,
        },
        "min_bet": {
            "value": config.min_bet,
            "source": sources.min_bet,
        },
        "num_simulations": {
            "value": config.num_simulations,
            "source": sources.num_simulations,
        },
        "max_spins": {
            "value": config.max_spins,
            "source": sources.max_spins,
        },
        "profit_target_pct": {
            "value": config.profit_target_pct,
            "source": sources.profit_target_pct,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "sequential": {
            "value": config.sequential,
            "source": sources.sequential,
        },
        "history_path": {
            "value": config.history_path,
            "source": sources.history_path,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
