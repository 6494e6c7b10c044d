//! Migration directory scanning and status rendering.

use std::path::Path;

use dynamigrate_core::ledger::MigrationStatus;

use super::error::{CommandError, Result};

/// Output format for the `status` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

/// Lists the migration file names in `dir`, sorted.
///
/// Subdirectories and hidden files are skipped. A missing directory reads as
/// empty so `status` still shows what the ledger holds.
pub fn read_migration_files(dir: &Path) -> Result<Vec<String>> {
    let read_dir = match std::fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(dir = %dir.display(), "Migrations directory not found");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(CommandError::MigrationsDir {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    let mut files = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| CommandError::MigrationsDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_file && !name.starts_with('.') {
            files.push(name);
        }
    }

    files.sort();
    Ok(files)
}

/// Renders the status table without colors.
///
/// The file name column is padded to the longest name.
pub fn format_status_table(statuses: &[MigrationStatus]) -> Vec<String> {
    let width = statuses
        .iter()
        .map(|s| s.file_name.len())
        .chain(std::iter::once("FILE_NAME".len()))
        .max()
        .unwrap_or_default();

    let mut lines = Vec::with_capacity(statuses.len() + 1);
    lines.push(format!("{:<width$}  APPLIED_AT", "FILE_NAME", width = width));
    for status in statuses {
        lines.push(format!(
            "{:<width$}  {}",
            status.file_name,
            status.applied_at_display(),
            width = width
        ));
    }
    lines
}

/// Renders the statuses as a pretty-printed JSON array.
pub fn format_status_json(statuses: &[MigrationStatus]) -> Result<String> {
    Ok(serde_json::to_string_pretty(statuses)?)
}
