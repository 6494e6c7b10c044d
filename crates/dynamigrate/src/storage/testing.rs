//! In-memory `TableClient` for tests.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use dynamigrate_core::ledger::{LedgerTableSchema, MigrationEntry, TableStatus};

use super::backend::{Item, ScanPage, TableClient};
use super::conversions::{entry_to_key, item_to_entry};
use super::error::{StoreError, StoreResult};

/// A scripted scan response: items plus continuation marker, or an error message.
pub type ScriptedPage = Result<(Vec<Item>, Option<Item>), String>;

/// Builds a wire item for a ledger entry.
pub fn item(file_name: &str, applied_at: &str) -> Item {
    entry_to_key(&MigrationEntry::new(file_name, applied_at))
}

/// Table backed by a map, with optional scripted failures and scan pages.
///
/// Without scripted pages, a scan returns every stored item in one page.
#[derive(Default)]
pub struct FakeTable {
    items: Mutex<BTreeMap<(String, String), Item>>,
    pages: Mutex<Option<VecDeque<ScriptedPage>>>,
    scan_requests: Mutex<Vec<Option<Item>>>,
    created: Mutex<Vec<LedgerTableSchema>>,
    waited_for: Mutex<Vec<String>>,
    create_error: Option<String>,
    wait_error: Option<String>,
    describe_error: Option<String>,
    put_error: Option<String>,
    delete_error: Option<String>,
}

impl FakeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_create(mut self, message: &str) -> Self {
        self.create_error = Some(message.to_string());
        self
    }

    pub fn fail_wait(mut self, message: &str) -> Self {
        self.wait_error = Some(message.to_string());
        self
    }

    pub fn fail_describe(mut self, message: &str) -> Self {
        self.describe_error = Some(message.to_string());
        self
    }

    pub fn fail_put(mut self, message: &str) -> Self {
        self.put_error = Some(message.to_string());
        self
    }

    pub fn fail_delete(mut self, message: &str) -> Self {
        self.delete_error = Some(message.to_string());
        self
    }

    pub fn with_pages(self, pages: Vec<ScriptedPage>) -> Self {
        *self.pages.lock().unwrap() = Some(pages.into());
        self
    }

    /// Entries currently stored, in key order.
    pub fn stored(&self) -> Vec<MigrationEntry> {
        self.items
            .lock()
            .unwrap()
            .values()
            .map(|item| item_to_entry(item).unwrap())
            .collect()
    }

    pub fn created(&self) -> Vec<LedgerTableSchema> {
        self.created.lock().unwrap().clone()
    }

    pub fn waited_for(&self) -> Vec<String> {
        self.waited_for.lock().unwrap().clone()
    }

    /// The `exclusive_start_key` of every scan request, in order.
    pub fn scan_requests(&self) -> Vec<Option<Item>> {
        self.scan_requests.lock().unwrap().clone()
    }
}

fn fail_with(error: &Option<String>) -> StoreResult<()> {
    match error {
        Some(message) => Err(StoreError::new(message.clone())),
        None => Ok(()),
    }
}

fn key_of(item: &Item) -> StoreResult<(String, String)> {
    let entry = item_to_entry(item).map_err(|e| StoreError::new(e.to_string()))?;
    Ok((entry.file_name, entry.applied_at))
}

#[async_trait]
impl TableClient for FakeTable {
    async fn create_table(&self, schema: &LedgerTableSchema) -> StoreResult<()> {
        fail_with(&self.create_error)?;
        self.created.lock().unwrap().push(schema.clone());
        Ok(())
    }

    async fn wait_until_active(&self, table_name: &str) -> StoreResult<()> {
        fail_with(&self.wait_error)?;
        self.waited_for.lock().unwrap().push(table_name.to_string());
        Ok(())
    }

    async fn describe_table(&self, _table_name: &str) -> StoreResult<TableStatus> {
        fail_with(&self.describe_error)?;
        Ok(TableStatus::Active)
    }

    async fn put_item(&self, _table_name: &str, item: Item) -> StoreResult<()> {
        fail_with(&self.put_error)?;
        let key = key_of(&item)?;
        self.items.lock().unwrap().insert(key, item);
        Ok(())
    }

    async fn delete_item(&self, _table_name: &str, key: Item) -> StoreResult<()> {
        fail_with(&self.delete_error)?;
        let key = key_of(&key)?;
        self.items.lock().unwrap().remove(&key);
        Ok(())
    }

    async fn scan(
        &self,
        _table_name: &str,
        exclusive_start_key: Option<Item>,
    ) -> StoreResult<ScanPage> {
        self.scan_requests
            .lock()
            .unwrap()
            .push(exclusive_start_key);

        let mut pages = self.pages.lock().unwrap();
        match pages.as_mut() {
            Some(scripted) => match scripted.pop_front() {
                Some(Ok((items, last_evaluated_key))) => Ok(ScanPage {
                    items,
                    last_evaluated_key,
                }),
                Some(Err(message)) => Err(StoreError::new(message)),
                None => Err(StoreError::new("No scripted scan page left")),
            },
            None => Ok(ScanPage {
                items: self.items.lock().unwrap().values().cloned().collect(),
                last_evaluated_key: None,
            }),
        }
    }
}
