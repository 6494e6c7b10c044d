//! Migration ledger operations.
//!
//! Every function issues requests through a [`TableClient`] and maps store
//! failures to [`LedgerError`] with the store's message intact.

use dynamigrate_core::ledger::{
    LedgerError, LedgerTableSchema, MigrationEntry, Result, LEDGER_TABLE_NAME,
};

use super::backend::TableClient;
use super::conversions::{entry_to_key, item_to_entry};

/// Creates the ledger table and waits for it to become active.
///
/// Creating a table that already exists fails; use [`table_exists`] first.
pub async fn ensure_schema<C>(client: &C) -> Result<()>
where
    C: TableClient + ?Sized,
{
    let schema = LedgerTableSchema::migrations_log();

    client
        .create_table(&schema)
        .await
        .map_err(|e| LedgerError::Schema(e.to_string()))?;
    tracing::info!(table = %schema.table_name, "Created ledger table");

    client
        .wait_until_active(&schema.table_name)
        .await
        .map_err(|e| LedgerError::Schema(e.to_string()))?;
    tracing::debug!(table = %schema.table_name, "Ledger table is active");

    Ok(())
}

/// Returns true if the ledger table can be described.
///
/// Any describe failure, including permission or network errors, reads as
/// `false`.
pub async fn table_exists<C>(client: &C) -> bool
where
    C: TableClient + ?Sized,
{
    match client.describe_table(LEDGER_TABLE_NAME).await {
        Ok(status) => {
            tracing::debug!(table = LEDGER_TABLE_NAME, ?status, "Ledger table found");
            true
        }
        Err(err) => {
            tracing::debug!(table = LEDGER_TABLE_NAME, error = %err, "Ledger table not available");
            false
        }
    }
}

/// Records an applied migration. Overwrites an entry with the same key.
pub async fn record_migration<C>(client: &C, entry: &MigrationEntry) -> Result<()>
where
    C: TableClient + ?Sized,
{
    client
        .put_item(LEDGER_TABLE_NAME, entry_to_key(entry))
        .await
        .map_err(|e| LedgerError::Write(e.to_string()))?;

    tracing::info!(
        file_name = %entry.file_name,
        applied_at = %entry.applied_at,
        "Recorded migration"
    );
    Ok(())
}

/// Removes a migration entry. Removing a missing entry succeeds.
pub async fn remove_migration<C>(client: &C, entry: &MigrationEntry) -> Result<()>
where
    C: TableClient + ?Sized,
{
    client
        .delete_item(LEDGER_TABLE_NAME, entry_to_key(entry))
        .await
        .map_err(|e| LedgerError::Delete(e.to_string()))?;

    tracing::info!(
        file_name = %entry.file_name,
        applied_at = %entry.applied_at,
        "Removed migration"
    );
    Ok(())
}

/// Reads the whole ledger.
///
/// Pages are concatenated in retrieval order; the store gives no ordering
/// guarantee, so sort with `sort_chronologically` when order matters. The
/// loop ends only when a page carries no continuation marker. A failing page
/// fails the call and nothing read so far is returned.
pub async fn list_all<C>(client: &C) -> Result<Vec<MigrationEntry>>
where
    C: TableClient + ?Sized,
{
    let mut entries = Vec::new();
    let mut start_key = None;
    let mut pages = 0usize;

    loop {
        let page = client
            .scan(LEDGER_TABLE_NAME, start_key.take())
            .await
            .map_err(|e| LedgerError::Read(e.to_string()))?;
        pages += 1;

        for item in &page.items {
            entries.push(item_to_entry(item)?);
        }

        match page.last_evaluated_key {
            Some(key) if !key.is_empty() => start_key = Some(key),
            _ => break,
        }
    }

    tracing::debug!(pages, entries = entries.len(), "Read ledger");
    Ok(entries)
}
