//! Joins migration files on disk with the ledger (Functional Core).

use std::collections::HashMap;

use serde::Serialize;

use super::types::MigrationEntry;

/// Applied state of one migration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MigrationStatus {
    pub file_name: String,
    /// Latest `APPLIED_AT` for the file, or `None` when pending.
    pub applied_at: Option<String>,
}

impl MigrationStatus {
    pub fn is_pending(&self) -> bool {
        self.applied_at.is_none()
    }

    /// Value shown in the status table.
    pub fn applied_at_display(&self) -> &str {
        self.applied_at.as_deref().unwrap_or("PENDING")
    }
}

/// Computes the status of every migration.
///
/// Files are reported in name order. Ledger entries whose file is no longer
/// present follow, in name order.
pub fn compute_status(files: &[String], entries: &[MigrationEntry]) -> Vec<MigrationStatus> {
    let mut latest: HashMap<&str, &str> = HashMap::new();
    for entry in entries {
        let slot = latest.entry(entry.file_name.as_str()).or_default();
        if entry.applied_at.as_str() > *slot {
            *slot = entry.applied_at.as_str();
        }
    }

    let mut on_disk: Vec<&str> = files.iter().map(String::as_str).collect();
    on_disk.sort_unstable();
    on_disk.dedup();

    let mut missing: Vec<&str> = latest
        .keys()
        .copied()
        .filter(|name| on_disk.binary_search(name).is_err())
        .collect();
    missing.sort_unstable();

    on_disk
        .into_iter()
        .chain(missing)
        .map(|name| MigrationStatus {
            file_name: name.to_string(),
            applied_at: latest.get(name).map(|at| at.to_string()),
        })
        .collect()
}
