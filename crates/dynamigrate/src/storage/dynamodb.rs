//! `TableClient` on top of the AWS SDK (Imperative Shell).

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode as SdkBillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType, TableStatus as SdkTableStatus,
};
use aws_sdk_dynamodb::Client;
use dynamigrate_core::ledger::{
    AttributeType, BillingMode, KeyAttribute, LedgerTableSchema, TableStatus,
};

use super::backend::{Item, ScanPage, TableClient};
use super::error::{map_sdk_error, StoreError, StoreResult};
use crate::connector::ClientHandle;

/// Polling bounds for `wait_until_active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 60,
            delay: Duration::from_secs(2),
        }
    }
}

#[async_trait]
impl TableClient for ClientHandle {
    async fn create_table(&self, schema: &LedgerTableSchema) -> StoreResult<()> {
        let (key_schema, attribute_definitions) = key_schema(schema)?;

        self.client
            .create_table()
            .table_name(&schema.table_name)
            .set_key_schema(Some(key_schema))
            .set_attribute_definitions(Some(attribute_definitions))
            .billing_mode(to_billing_mode(schema.billing_mode))
            .send()
            .await
            .map_err(map_sdk_error)?;
        Ok(())
    }

    async fn wait_until_active(&self, table_name: &str) -> StoreResult<()> {
        for attempt in 1..=self.wait.max_attempts {
            match fetch_table_status(&self.client, table_name).await? {
                Some(TableStatus::Active) => return Ok(()),
                Some(TableStatus::Deleting) => {
                    return Err(StoreError::new(format!(
                        "Table {} was deleted while waiting for it to become active",
                        table_name
                    )));
                }
                status => {
                    tracing::debug!(table = table_name, attempt, ?status, "Table not active yet");
                }
            }
            tokio::time::sleep(self.wait.delay).await;
        }

        Err(StoreError::new(format!(
            "Timeout waiting for table {} to become active",
            table_name
        )))
    }

    async fn describe_table(&self, table_name: &str) -> StoreResult<TableStatus> {
        fetch_table_status(&self.client, table_name)
            .await?
            .ok_or_else(|| StoreError::new(format!("Table '{}' not found", table_name)))
    }

    async fn put_item(&self, table_name: &str, item: Item) -> StoreResult<()> {
        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(map_sdk_error)?;
        Ok(())
    }

    async fn delete_item(&self, table_name: &str, key: Item) -> StoreResult<()> {
        self.client
            .delete_item()
            .table_name(table_name)
            .set_key(Some(key))
            .send()
            .await
            .map_err(map_sdk_error)?;
        Ok(())
    }

    async fn scan(
        &self,
        table_name: &str,
        exclusive_start_key: Option<Item>,
    ) -> StoreResult<ScanPage> {
        let output = self
            .client
            .scan()
            .table_name(table_name)
            .set_exclusive_start_key(exclusive_start_key)
            .send()
            .await
            .map_err(map_sdk_error)?;

        Ok(ScanPage {
            items: output.items.unwrap_or_default(),
            last_evaluated_key: output.last_evaluated_key,
        })
    }
}

/// Fetches current table status, returns None if table doesn't exist.
async fn fetch_table_status(client: &Client, table_name: &str) -> StoreResult<Option<TableStatus>> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(response) => Ok(Some(to_table_status(
            response.table().and_then(|t| t.table_status()),
        ))),
        Err(err) => {
            let err = err.into_service_error();
            if err.is_resource_not_found_exception() {
                Ok(None)
            } else {
                Err(map_sdk_error(err))
            }
        }
    }
}

/// Builds the key schema and attribute definitions for a create-table call.
fn key_schema(
    schema: &LedgerTableSchema,
) -> StoreResult<(Vec<KeySchemaElement>, Vec<AttributeDefinition>)> {
    let keys = [
        (&schema.partition_key, KeyType::Hash),
        (&schema.sort_key, KeyType::Range),
    ];

    let mut key_schema = Vec::with_capacity(keys.len());
    let mut attribute_definitions = Vec::with_capacity(keys.len());

    for (attribute, key_type) in keys {
        key_schema.push(
            KeySchemaElement::builder()
                .attribute_name(&attribute.name)
                .key_type(key_type)
                .build()
                .map_err(map_sdk_error)?,
        );
        attribute_definitions.push(attribute_definition(attribute)?);
    }

    Ok((key_schema, attribute_definitions))
}

fn attribute_definition(attribute: &KeyAttribute) -> StoreResult<AttributeDefinition> {
    AttributeDefinition::builder()
        .attribute_name(&attribute.name)
        .attribute_type(to_scalar_type(&attribute.attribute_type))
        .build()
        .map_err(map_sdk_error)
}

fn to_scalar_type(attr_type: &AttributeType) -> ScalarAttributeType {
    match attr_type {
        AttributeType::String => ScalarAttributeType::S,
    }
}

fn to_billing_mode(mode: BillingMode) -> SdkBillingMode {
    match mode {
        BillingMode::PayPerRequest => SdkBillingMode::PayPerRequest,
    }
}

fn to_table_status(status: Option<&SdkTableStatus>) -> TableStatus {
    match status {
        Some(SdkTableStatus::Active) => TableStatus::Active,
        Some(SdkTableStatus::Creating) => TableStatus::Creating,
        Some(SdkTableStatus::Updating) => TableStatus::Updating,
        Some(SdkTableStatus::Deleting) => TableStatus::Deleting,
        _ => TableStatus::Other,
    }
}
