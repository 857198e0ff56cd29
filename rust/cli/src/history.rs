//! Best-result history persisted across runs as a JSON file.
//!
//! The store is loaded once before a run, updated in memory through
//! [`HistorySink`], and written back once with [`JsonHistoryStore::flush`].

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use wheelsim_engine::simulator::{HistorySink, Improvement};
use wheelsim_engine::wheel::Outcome;

use crate::error::CliError;
use crate::io_utils::{read_text_auto, write_text_auto};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub best_win_rate: f64,
    pub best_numbers: Vec<Outcome>,
    pub wins_count: usize,
    /// RFC 3339 timestamp of the last run that reported this strategy
    pub last_update: String,
    pub previous_best: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct JsonHistoryStore {
    path: String,
    entries: BTreeMap<String, HistoryEntry>,
}

impl JsonHistoryStore {
    /// Reads the history at `path`; a missing file yields an empty store.
    pub fn load(path: &str) -> Result<Self, CliError> {
        let entries = if Path::new(path).exists() {
            let text = read_text_auto(path)
                .map_err(|e| CliError::InvalidInput(format!("cannot read {}: {}", path, e)))?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&text).map_err(|e| {
                    CliError::InvalidInput(format!("malformed history {}: {}", path, e))
                })?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: path.to_string(),
            entries,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn entries(&self) -> &BTreeMap<String, HistoryEntry> {
        &self.entries
    }

    pub fn get(&self, strategy: &str) -> Option<&HistoryEntry> {
        self.entries.get(strategy)
    }

    pub fn flush(&self) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| CliError::Engine(e.to_string()))?;
        write_text_auto(&self.path, &json).map_err(CliError::Engine)
    }

    fn record_at(
        &mut self,
        strategy: &str,
        win_rate: f64,
        best_numbers: &[Outcome],
        now: String,
    ) -> Improvement {
        let previous = self.entries.get(strategy).map(|e| e.best_win_rate);
        let improved = previous.is_none_or(|best| win_rate > best);

        match self.entries.get_mut(strategy) {
            Some(entry) => {
                if improved {
                    entry.previous_best = Some(entry.best_win_rate);
                    entry.best_win_rate = win_rate;
                    entry.best_numbers = best_numbers.to_vec();
                    entry.wins_count = best_numbers.len();
                }
                entry.last_update = now;
            }
            None => {
                self.entries.insert(
                    strategy.to_string(),
                    HistoryEntry {
                        best_win_rate: win_rate,
                        best_numbers: best_numbers.to_vec(),
                        wins_count: best_numbers.len(),
                        last_update: now,
                        previous_best: None,
                    },
                );
            }
        }

        Improvement {
            strategy: strategy.to_string(),
            win_rate,
            previous_best: previous,
            improved,
        }
    }
}

impl HistorySink for JsonHistoryStore {
    fn record(&mut self, strategy: &str, win_rate: f64, best_numbers: &[Outcome]) -> Improvement {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.record_at(strategy, win_rate, best_numbers, now)
    }
}
