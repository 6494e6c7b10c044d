//! Error types for CLI commands.

use std::path::PathBuf;

use dynamigrate_core::ledger::LedgerError;
use dynamigrate_core::profile::ConfigError;
use thiserror::Error;

/// Result type alias for the commands module.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Errors that can occur while running a command.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Operation cancelled by user")]
    UserCancelled,

    #[error("Failed to read migrations directory {}: {source}", path.display())]
    MigrationsDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid timestamp '{0}': expected YYYYMMDDHHMMSS")]
    InvalidTimestamp(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
