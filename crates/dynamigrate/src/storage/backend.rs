//! The key-value store seam used by the ledger operations.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use dynamigrate_core::ledger::{LedgerTableSchema, TableStatus};

use super::error::StoreResult;

/// A DynamoDB item in wire form.
pub type Item = HashMap<String, AttributeValue>;

/// One page of a scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanPage {
    pub items: Vec<Item>,
    /// Continuation marker. `None` on the last page.
    pub last_evaluated_key: Option<Item>,
}

/// Table operations the ledger needs from the store.
///
/// Each call is a single request; implementations do not retry.
#[async_trait]
pub trait TableClient: Send + Sync {
    /// Issues a create-table request for the schema.
    async fn create_table(&self, schema: &LedgerTableSchema) -> StoreResult<()>;

    /// Blocks until the table is active, within the client's polling bounds.
    async fn wait_until_active(&self, table_name: &str) -> StoreResult<()>;

    /// Describes the table. Fails if it does not exist.
    async fn describe_table(&self, table_name: &str) -> StoreResult<TableStatus>;

    /// Writes an item, replacing any item with the same key.
    async fn put_item(&self, table_name: &str, item: Item) -> StoreResult<()>;

    /// Deletes the item with the given key. Missing items are not an error.
    async fn delete_item(&self, table_name: &str, key: Item) -> StoreResult<()>;

    /// Fetches one scan page, starting after `exclusive_start_key` when set.
    async fn scan(
        &self,
        table_name: &str,
        exclusive_start_key: Option<Item>,
    ) -> StoreResult<ScanPage>;
}
