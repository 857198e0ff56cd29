use thiserror::Error;

/// Bet validation failures raised by the table.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TableError {
    #[error("Unknown bet label: {0}")]
    UnknownLabel(String),
    #[error("Invalid bet target {target}: {reason}")]
    InvalidTarget { target: String, reason: String },
    #[error("Invalid stake {stake} on {target}")]
    InvalidStake { target: String, stake: f64 },
}

/// Rejected configuration. Always raised before any session runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Initial bankroll must be positive, got {0}")]
    NonPositiveBankroll(f64),
    #[error("Minimum bet must be positive, got {0}")]
    NonPositiveMinBet(f64),
    #[error("Minimum bet {min_bet} exceeds initial bankroll {bankroll}")]
    MinBetExceedsBankroll { min_bet: f64, bankroll: f64 },
    #[error("Profit target must be a finite non-negative fraction, got {0}")]
    InvalidProfitTarget(f64),
    #[error("Unknown strategy: {0}")]
    UnknownStrategy(String),
    #[error("Strategy {0} listed more than once")]
    DuplicateStrategy(String),
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("Session already finished")]
    SessionFinished,
}
