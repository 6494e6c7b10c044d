//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between wire items and ledger entries.

use aws_sdk_dynamodb::types::AttributeValue;
use dynamigrate_core::ledger::{LedgerError, MigrationEntry, APPLIED_AT_ATTR, FILE_NAME_ATTR};

use super::backend::Item;

/// Convert a MigrationEntry to its primary key.
///
/// The ledger stores nothing beyond the key, so this is also the full item.
pub fn entry_to_key(entry: &MigrationEntry) -> Item {
    let mut item = Item::new();
    item.insert(
        FILE_NAME_ATTR.to_string(),
        AttributeValue::S(entry.file_name.clone()),
    );
    item.insert(
        APPLIED_AT_ATTR.to_string(),
        AttributeValue::S(entry.applied_at.clone()),
    );
    item
}

/// Convert a DynamoDB item to MigrationEntry.
pub fn item_to_entry(item: &Item) -> Result<MigrationEntry, LedgerError> {
    Ok(MigrationEntry {
        file_name: get_string(item, FILE_NAME_ATTR)?,
        applied_at: get_string(item, APPLIED_AT_ATTR)?,
    })
}

/// Get a required string attribute.
fn get_string(item: &Item, key: &str) -> Result<String, LedgerError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| LedgerError::InvalidRecord(format!("Missing or invalid field: {}", key)))
}
