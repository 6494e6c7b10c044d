use thiserror::Error;

/// Errors that can occur while loading or resolving connection profiles.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Please provide region for profile:{0}")]
    MissingRegion(String),
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),
    #[error("Failed to read config file {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("Invalid config file: {0}")]
    Parse(String),
}

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
