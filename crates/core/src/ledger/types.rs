use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// chrono format of the `APPLIED_AT` sort key (`YYYYMMDDHHMMSS`).
pub const APPLIED_AT_FORMAT: &str = "%Y%m%d%H%M%S";

/// One applied migration, as stored in the ledger.
///
/// The pair (`file_name`, `applied_at`) is the table's primary key, so applying
/// the same file twice at different times yields two entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MigrationEntry {
    #[serde(rename = "FILE_NAME")]
    pub file_name: String,
    #[serde(rename = "APPLIED_AT")]
    pub applied_at: String,
}

impl MigrationEntry {
    pub fn new(file_name: impl Into<String>, applied_at: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            applied_at: applied_at.into(),
        }
    }

    /// Creates an entry stamped with the given instant.
    pub fn applied_on(file_name: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self::new(file_name, format_applied_at(at))
    }
}

/// Formats an instant as an `APPLIED_AT` value.
pub fn format_applied_at(at: DateTime<Utc>) -> String {
    at.format(APPLIED_AT_FORMAT).to_string()
}
