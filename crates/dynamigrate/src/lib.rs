//! Migration ledger for DynamoDB.
//!
//! Resolves connection profiles into DynamoDB clients and keeps the
//! `MIGRATIONS_LOG_DB` table recording which migration files were applied
//! and when. Pure types and rules live in `dynamigrate_core`.

pub mod commands;
pub mod config;
pub mod connector;
pub mod prelude;
pub mod storage;
