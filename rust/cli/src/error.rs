//! Error types for the CLI application.
//!
//! Commands return [`CliError`] and propagate with `?`; [`crate::run`] turns any error
//! into an `Error: ...` line on stderr and a non-zero exit code.

use std::fmt;

use wheelsim_engine::errors::{ConfigError, SimulationError};

#[derive(Debug)]
pub enum CliError {
    /// I/O error (file operations, stdout/stderr writes, etc.)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Engine-related error
    Engine(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Engine(msg) => write!(f, "Engine error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<String> for CliError {
    fn from(error: String) -> Self {
        CliError::Engine(error)
    }
}

impl From<&str> for CliError {
    fn from(error: &str) -> Self {
        CliError::Engine(error.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

impl From<SimulationError> for CliError {
    fn from(error: SimulationError) -> Self {
        match error {
            SimulationError::Config(e) => CliError::Config(e.to_string()),
            other => CliError::Engine(other.to_string()),
        }
    }
}

impl From<crate::config::ConfigError> for CliError {
    fn from(error: crate::config::ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_config_errors_map_to_config() {
        let err: CliError = ConfigError::NonPositiveBankroll(0.0).into();
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error:"));

        let err: CliError = SimulationError::from(ConfigError::UnknownStrategy("x".into())).into();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn session_errors_map_to_engine() {
        let err: CliError = SimulationError::SessionFinished.into();
        assert!(matches!(err, CliError::Engine(_)));
    }

    #[test]
    fn io_error_keeps_source() {
        use std::error::Error;
        let err: CliError = std::io::Error::other("disk").into();
        assert!(err.source().is_some());
    }
}
