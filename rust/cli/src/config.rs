//! Layered configuration for the `sim` command.
//!
//! Values resolve in order: built-in defaults, the TOML file named by
//! `WHEELSIM_CONFIG`, `WHEELSIM_*` environment variables, then command-line flags.
//! Every value remembers which layer set it so `wheelsim cfg` can explain itself.

use serde::{Deserialize, Serialize};
use std::fs;
use std::str::FromStr;

use wheelsim_engine::simulator::SimulationConfig;

pub const CONFIG_PATH_VAR: &str = "WHEELSIM_CONFIG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub initial_bankroll: f64,
    pub min_bet: f64,
    pub num_simulations: usize,
    pub max_spins: usize,
    /// Percent of the initial bankroll, e.g. `50.0` for +50%
    pub profit_target_pct: f64,
    pub seed: Option<u64>,
    pub sequential: bool,
    pub history_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_bankroll: 1000.0,
            min_bet: 1.0,
            num_simulations: 100,
            max_spins: 1000,
            profit_target_pct: 50.0,
            seed: None,
            sequential: false,
            history_path: "output/history.json".into(),
        }
    }
}

impl Config {
    pub fn to_simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            initial_bankroll: self.initial_bankroll,
            min_bet: self.min_bet,
            num_simulations: self.num_simulations,
            max_spins: self.max_spins,
            profit_target: self.profit_target_pct / 100.0,
            seed: self.seed,
            parallel: !self.sequential,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
    Cli,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigSources {
    pub initial_bankroll: ValueSource,
    pub min_bet: ValueSource,
    pub num_simulations: ValueSource,
    pub max_spins: ValueSource,
    pub profit_target_pct: ValueSource,
    pub seed: ValueSource,
    pub sequential: ValueSource,
    pub history_path: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            initial_bankroll: ValueSource::Default,
            min_bet: ValueSource::Default,
            num_simulations: ValueSource::Default,
            max_spins: ValueSource::Default,
            profit_target_pct: ValueSource::Default,
            seed: ValueSource::Default,
            sequential: ValueSource::Default,
            history_path: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

/// Values given on the command line; `None` leaves the lower layers in charge.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub initial_bankroll: Option<f64>,
    pub min_bet: Option<f64>,
    pub num_simulations: Option<usize>,
    pub max_spins: Option<usize>,
    pub profit_target_pct: Option<f64>,
    pub seed: Option<u64>,
    pub sequential: Option<bool>,
    pub history_path: Option<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read {}: {}", CONFIG_PATH_VAR, e),
            ConfigError::Parse(e) => write!(f, "cannot parse {}: {}", CONFIG_PATH_VAR, e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

/// Resolves defaults, the config file and the environment, then validates.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let resolved = load_unvalidated()?;
    validate(&resolved.config)?;
    Ok(resolved)
}

/// Like [`load_with_sources`] but applies `overrides` before validating.
pub fn resolve(overrides: &Overrides) -> Result<ConfigResolved, ConfigError> {
    let mut resolved = load_unvalidated()?;
    apply_overrides(&mut resolved, overrides);
    validate(&resolved.config)?;
    Ok(resolved)
}

fn load_unvalidated() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(CONFIG_PATH_VAR)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.initial_bankroll {
            cfg.initial_bankroll = v;
            sources.initial_bankroll = ValueSource::File;
        }
        if let Some(v) = f.min_bet {
            cfg.min_bet = v;
            sources.min_bet = ValueSource::File;
        }
        if let Some(v) = f.num_simulations {
            cfg.num_simulations = v;
            sources.num_simulations = ValueSource::File;
        }
        if let Some(v) = f.max_spins {
            cfg.max_spins = v;
            sources.max_spins = ValueSource::File;
        }
        if let Some(v) = f.profit_target_pct {
            cfg.profit_target_pct = v;
            sources.profit_target_pct = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.sequential {
            cfg.sequential = v;
            sources.sequential = ValueSource::File;
        }
        if let Some(v) = f.history_path {
            cfg.history_path = v;
            sources.history_path = ValueSource::File;
        }
    }

    if let Some(v) = env_value::<u64>("WHEELSIM_SEED", "seed")? {
        cfg.seed = Some(v);
        sources.seed = ValueSource::Env;
    }
    if let Some(v) = env_value::<f64>("WHEELSIM_BANKROLL", "bankroll")? {
        cfg.initial_bankroll = v;
        sources.initial_bankroll = ValueSource::Env;
    }
    if let Some(v) = env_value::<f64>("WHEELSIM_MIN_BET", "min bet")? {
        cfg.min_bet = v;
        sources.min_bet = ValueSource::Env;
    }
    if let Some(v) = env_value::<usize>("WHEELSIM_SIMULATIONS", "simulation count")? {
        cfg.num_simulations = v;
        sources.num_simulations = ValueSource::Env;
    }
    if let Some(v) = env_value::<usize>("WHEELSIM_MAX_SPINS", "max spins")? {
        cfg.max_spins = v;
        sources.max_spins = ValueSource::Env;
    }
    if let Some(v) = env_value::<f64>("WHEELSIM_PROFIT_TARGET", "profit target")? {
        cfg.profit_target_pct = v;
        sources.profit_target_pct = ValueSource::Env;
    }
    if let Ok(seq) = std::env::var("WHEELSIM_SEQUENTIAL")
        && !seq.is_empty()
    {
        cfg.sequential =
            parse_bool(&seq).ok_or_else(|| ConfigError::Invalid("Invalid sequential".into()))?;
        sources.sequential = ValueSource::Env;
    }

    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

fn apply_overrides(resolved: &mut ConfigResolved, o: &Overrides) {
    let (cfg, src) = (&mut resolved.config, &mut resolved.sources);
    if let Some(v) = o.initial_bankroll {
        cfg.initial_bankroll = v;
        src.initial_bankroll = ValueSource::Cli;
    }
    if let Some(v) = o.min_bet {
        cfg.min_bet = v;
        src.min_bet = ValueSource::Cli;
    }
    if let Some(v) = o.num_simulations {
        cfg.num_simulations = v;
        src.num_simulations = ValueSource::Cli;
    }
    if let Some(v) = o.max_spins {
        cfg.max_spins = v;
        src.max_spins = ValueSource::Cli;
    }
    if let Some(v) = o.profit_target_pct {
        cfg.profit_target_pct = v;
        src.profit_target_pct = ValueSource::Cli;
    }
    if let Some(v) = o.seed {
        cfg.seed = Some(v);
        src.seed = ValueSource::Cli;
    }
    if let Some(v) = o.sequential {
        cfg.sequential = v;
        src.sequential = ValueSource::Cli;
    }
    if let Some(v) = &o.history_path {
        cfg.history_path = v.clone();
        src.history_path = ValueSource::Cli;
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    initial_bankroll: Option<f64>,
    #[serde(default)]
    min_bet: Option<f64>,
    #[serde(default)]
    num_simulations: Option<usize>,
    #[serde(default)]
    max_spins: Option<usize>,
    #[serde(default)]
    profit_target_pct: Option<f64>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    sequential: Option<bool>,
    #[serde(default)]
    history_path: Option<String>,
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.num_simulations == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: num_simulations must be >0".into(),
        ));
    }
    if !cfg.profit_target_pct.is_finite() || cfg.profit_target_pct < 0.0 {
        return Err(ConfigError::Invalid(format!(
            "Invalid configuration: profit target must be a non-negative percentage, got {}",
            cfg.profit_target_pct
        )));
    }
    cfg.to_simulation_config()
        .validate()
        .map_err(|e| ConfigError::Invalid(format!("Invalid configuration: {}", e)))
}

fn env_value<T: FromStr>(var: &str, what: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) if !raw.is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("Invalid {}: {}", what, raw))),
        _ => Ok(None),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}
