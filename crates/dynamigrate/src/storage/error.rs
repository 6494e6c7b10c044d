//! Errors surfaced by the table client.

use aws_sdk_dynamodb::error::DisplayErrorContext;
use thiserror::Error;

/// A failed store call. Carries the store's message verbatim.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for table client calls.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Map an SDK error to StoreError, keeping the whole source chain.
///
/// `SdkError`'s own `Display` only says "service error"; the service's code
/// and message live in the source chain.
pub fn map_sdk_error<E>(err: E) -> StoreError
where
    E: std::error::Error,
{
    StoreError::new(DisplayErrorContext(&err).to_string())
}
