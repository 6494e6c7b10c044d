//! dynamigrate_core - pure types and functions for the migrations ledger.
//!
//! Nothing in this crate performs I/O. The DynamoDB side lives in the
//! `dynamigrate` crate.

pub mod ledger;
pub mod profile;
