use std::io::Write;

use crate::config;
use crate::error::CliError;
use crate::history::JsonHistoryStore;
use crate::ui;

/// Prints the stored best result per strategy.
///
/// Reads `input`, or the configured history path when omitted. A missing file is
/// reported as an empty history rather than an error.
pub fn handle_history_command(
    input: Option<String>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let path = match input {
        Some(p) => p,
        None => config::load()?.history_path,
    };
    if !std::path::Path::new(&path).exists() {
        ui::display_warning(err, &format!("no history at {}", path))?;
        return Ok(());
    }

    let store = JsonHistoryStore::load(&path)?;
    writeln!(out, "History: {}", store.path())?;
    if store.entries().is_empty() {
        writeln!(out, "  (empty)")?;
        return Ok(());
    }
    for (name, entry) in store.entries() {
        let numbers = entry
            .best_numbers
            .iter()
            .map(|o| o.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(out, "\n{}:", name)?;
        writeln!(out, "  Best win rate: {}", ui::pct(entry.best_win_rate))?;
        if let Some(prev) = entry.previous_best {
            writeln!(out, "  Previous best: {}", ui::pct(prev))?;
        }
        let numbers = if numbers.is_empty() { "none" } else { numbers.as_str() };
        writeln!(out, "  Best numbers: {}", numbers)?;
        writeln!(out, "  Last update: {}", entry.last_update)?;
    }
    Ok(())
}
