mod error;
mod schema;
mod sorting;
mod status;
mod types;

pub use error::{LedgerError, Result};
pub use schema::{
    describe_schema, AttributeType, BillingMode, KeyAttribute, LedgerTableSchema, TableStatus,
    APPLIED_AT_ATTR, FILE_NAME_ATTR, LEDGER_TABLE_NAME,
};
pub use sorting::sort_chronologically;
pub use status::{compute_status, MigrationStatus};
pub use types::{format_applied_at, MigrationEntry, APPLIED_AT_FORMAT};
