use super::types::MigrationEntry;

/// Sorts entries by `APPLIED_AT`, then by file name.
///
/// The sort is stable, and `APPLIED_AT` values compare correctly as strings
/// because the format is fixed-width.
pub fn sort_chronologically(entries: &mut [MigrationEntry]) {
    entries.sort_by(|a, b| {
        a.applied_at
            .cmp(&b.applied_at)
            .then_with(|| a.file_name.cmp(&b.file_name))
    });
}
