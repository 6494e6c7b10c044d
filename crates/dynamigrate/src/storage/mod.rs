//! Ledger persistence on DynamoDB.
//!
//! `backend` defines the [`TableClient`] seam, `dynamodb` implements it on
//! top of the AWS SDK, and `ledger` holds the operations the CLI calls.

mod backend;
mod conversions;
mod dynamodb;
mod error;
mod ledger;

#[cfg(test)]
pub(crate) mod testing;

pub use backend::{Item, ScanPage, TableClient};
pub use conversions::{entry_to_key, item_to_entry};
pub use dynamodb::WaitPolicy;
pub use error::{map_sdk_error, StoreError, StoreResult};
pub use ledger::{ensure_schema, list_all, record_migration, remove_migration, table_exists};
