use std::io::Write;

use wheelsim_strategies::StrategyKind;

use crate::error::CliError;

/// Lists every built-in strategy with the number class its report focuses on.
pub fn handle_strategies_command(out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(out, "Available strategies:")?;
    for kind in StrategyKind::ALL {
        // Class is a property of the progression, so any valid bankroll will do.
        let class = kind.create(100.0, 1.0)?.number_class();
        writeln!(out, "  {:<18} [{}] {}", kind.as_str(), class, kind.description())?;
    }
    Ok(())
}
