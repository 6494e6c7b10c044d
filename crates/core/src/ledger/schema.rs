//! Ledger table schema (Functional Core - pure data).

/// Name of the ledger table.
pub const LEDGER_TABLE_NAME: &str = "MIGRATIONS_LOG_DB";
/// Partition key attribute.
pub const FILE_NAME_ATTR: &str = "FILE_NAME";
/// Sort key attribute.
pub const APPLIED_AT_ATTR: &str = "APPLIED_AT";

/// Table schema definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerTableSchema {
    pub table_name: String,
    pub partition_key: KeyAttribute,
    pub sort_key: KeyAttribute,
    pub billing_mode: BillingMode,
}

/// A key attribute definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyAttribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

/// DynamoDB attribute types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    String,
}

/// Billing mode for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMode {
    PayPerRequest,
}

/// Table status as reported by a describe call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
    /// Anything the ledger does not act on (archived, inaccessible, ...).
    Other,
}

impl LedgerTableSchema {
    /// Returns the ledger schema. This is a pure function - no I/O.
    pub fn migrations_log() -> Self {
        Self {
            table_name: LEDGER_TABLE_NAME.to_string(),
            partition_key: KeyAttribute {
                name: FILE_NAME_ATTR.to_string(),
                attribute_type: AttributeType::String,
            },
            sort_key: KeyAttribute {
                name: APPLIED_AT_ATTR.to_string(),
                attribute_type: AttributeType::String,
            },
            billing_mode: BillingMode::PayPerRequest,
        }
    }
}

impl AttributeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "S",
        }
    }
}

/// Pure function: Format the schema for display.
pub fn describe_schema(schema: &LedgerTableSchema) -> Vec<String> {
    vec![
        format!("+ Create table: {}", schema.table_name),
        format!(
            "  Partition key: {} ({})",
            schema.partition_key.name,
            schema.partition_key.attribute_type.as_str()
        ),
        format!(
            "  Sort key: {} ({})",
            schema.sort_key.name,
            schema.sort_key.attribute_type.as_str()
        ),
        match schema.billing_mode {
            BillingMode::PayPerRequest => "  Billing: PAY_PER_REQUEST".to_string(),
        },
    ]
}
