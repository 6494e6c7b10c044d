use thiserror::Error;

/// Errors that can occur during ledger operations.
///
/// Each variant keeps the store's own error text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Failed to set up ledger table: {0}")]
    Schema(String),
    #[error("Failed to record migration: {0}")]
    Write(String),
    #[error("Failed to remove migration: {0}")]
    Delete(String),
    #[error("Failed to read ledger: {0}")]
    Read(String),
    #[error("Invalid ledger record: {0}")]
    InvalidRecord(String),
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
