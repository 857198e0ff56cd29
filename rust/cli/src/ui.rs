//! Terminal output helpers shared by the commands.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Formats a signed amount with two decimals, e.g. `+12.50` or `-3.00`.
pub fn signed(amount: f64) -> String {
    format!("{:+.2}", amount)
}

/// Formats a ratio in `[0, 1]` as a percentage with two decimals.
pub fn pct(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}
