//! CLI commands for the migrations ledger.

mod error;
mod status;

pub use error::{CommandError, Result};
pub use status::{format_status_json, format_status_table, read_migration_files, OutputFormat};

use std::path::PathBuf;

use chrono::{NaiveDateTime, Utc};
use dialoguer::Confirm;
use dynamigrate_core::ledger::{
    compute_status, describe_schema, format_applied_at, sort_chronologically, LedgerTableSchema,
    MigrationEntry, APPLIED_AT_FORMAT,
};
use dynamigrate_core::profile::DEFAULT_PROFILE;

use crate::config::{JsonProfileFile, DEFAULT_CONFIG_PATH};
use crate::connector::Connector;
use crate::prelude::*;
use crate::storage::{self, TableClient};

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Silence the command output
    #[clap(long, global = true)]
    pub silent: bool,

    /// Enable verbose output
    #[clap(long, global = true)]
    pub verbose: bool,
}

impl Global {
    pub fn is_silent(&self) -> bool {
        self.silent
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Where to find the connection profiles and which one to use.
#[derive(Debug, Clone, clap::Args)]
pub struct ConnectionArgs {
    /// JSON file listing the connection profiles.
    #[arg(long, global = true, env = "DYNAMIGRATE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Profile to connect with.
    #[arg(long, global = true, env = "DYNAMIGRATE_PROFILE", default_value = DEFAULT_PROFILE)]
    pub profile: String,
}

/// Available ledger commands.
#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Create the ledger table if it does not exist.
    Init(InitCommand),

    /// Show which migrations have been applied.
    Status(StatusCommand),

    /// Record a migration as applied.
    Record(RecordCommand),

    /// Remove a migration entry from the ledger.
    Remove(RemoveCommand),
}

/// Create the ledger table.
#[derive(Debug, clap::Parser)]
#[command(long_about = "Create the MIGRATIONS_LOG_DB ledger table.

The table is keyed by FILE_NAME (partition) and APPLIED_AT (sort), both
strings, and billed per request. If the table already exists nothing is
changed. Otherwise the schema is shown and confirmation is asked before
creating it and waiting for it to become active.")]
pub struct InitCommand {
    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

/// Show applied and pending migrations.
#[derive(Debug, clap::Parser)]
pub struct StatusCommand {
    /// Directory holding the migration files.
    #[arg(long, env = "DYNAMIGRATE_MIGRATIONS_DIR", default_value = "migrations")]
    pub migrations_dir: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

/// Record a migration as applied.
#[derive(Debug, clap::Parser)]
pub struct RecordCommand {
    /// Migration file name.
    pub file_name: String,

    /// Application time as YYYYMMDDHHMMSS (defaults to now, UTC).
    #[arg(long, value_name = "TIMESTAMP")]
    pub applied_at: Option<String>,
}

/// Remove a migration entry.
#[derive(Debug, clap::Parser)]
pub struct RemoveCommand {
    /// Migration file name.
    pub file_name: String,

    /// Application time of the entry, as stored in the ledger.
    pub applied_at: String,

    /// Skip confirmation prompts.
    #[arg(long)]
    pub force: bool,
}

/// Main entry point: connects with the selected profile and runs `command`.
pub async fn run(command: Command, connection: ConnectionArgs, global: Global) -> Result<()> {
    let connector = Connector::new(JsonProfileFile::new(&connection.config));
    let client = connector.connect(Some(connection.profile.as_str())).await?;

    if !global.is_silent() {
        aprintln!("{} {}", p_b("Target:"), client.target_display());
        aprintln!();
    }

    match command {
        Command::Init(cmd) => run_init(&client, cmd, &global).await,
        Command::Status(cmd) => run_status(&client, cmd, &global).await,
        Command::Record(cmd) => run_record(&client, cmd, &global).await,
        Command::Remove(cmd) => run_remove(&client, cmd, &global).await,
    }
}

async fn run_init<C>(client: &C, cmd: InitCommand, global: &Global) -> Result<()>
where
    C: TableClient + ?Sized,
{
    if storage::table_exists(client).await {
        if !global.is_silent() {
            aprintln!("{}", p_g("Ledger table already exists."));
        }
        return Ok(());
    }

    if !global.is_silent() {
        aprintln!("{}", p_c("Deploy Plan:"));
        for line in describe_schema(&LedgerTableSchema::migrations_log()) {
            if line.starts_with('+') {
                aprintln!("  {}", p_g(&line));
            } else {
                aprintln!("  {}", line);
            }
        }
        aprintln!();
    }

    confirm(cmd.force, "Create the ledger table?", true)?;

    if !global.is_silent() {
        aprintln!("{}", p_b("Creating table..."));
    }

    storage::ensure_schema(client).await?;

    if !global.is_silent() {
        aprintln!("{}", p_g("Ledger table created successfully."));
    }
    Ok(())
}

async fn run_status<C>(client: &C, cmd: StatusCommand, global: &Global) -> Result<()>
where
    C: TableClient + ?Sized,
{
    let mut entries = storage::list_all(client).await?;
    sort_chronologically(&mut entries);

    let files = read_migration_files(&cmd.migrations_dir)?;
    let statuses = compute_status(&files, &entries);

    match cmd.format {
        OutputFormat::Json => {
            aprintln!("{}", format_status_json(&statuses)?);
        }
        OutputFormat::Pretty => {
            let mut lines = format_status_table(&statuses).into_iter();
            if let Some(header) = lines.next() {
                aprintln!("{}", p_b(&header));
            }
            for (line, status) in lines.zip(&statuses) {
                if status.is_pending() {
                    aprintln!("{}", p_y(&line));
                } else {
                    aprintln!("{}", p_g(&line));
                }
            }

            if !global.is_silent() {
                let pending = statuses.iter().filter(|s| s.is_pending()).count();
                aprintln!();
                aprintln!(
                    "{} applied, {} pending",
                    statuses.len() - pending,
                    pending
                );
            }

            if global.is_verbose() && !entries.is_empty() {
                aprintln!();
                aprintln!("{}", p_c("Ledger history:"));
                for entry in &entries {
                    aprintln!("  {}  {}", entry.applied_at, entry.file_name);
                }
            }
        }
    }

    Ok(())
}

async fn run_record<C>(client: &C, cmd: RecordCommand, global: &Global) -> Result<()>
where
    C: TableClient + ?Sized,
{
    let applied_at = match cmd.applied_at {
        Some(ts) => parse_applied_at(&ts)?,
        None => format_applied_at(Utc::now()),
    };
    let entry = MigrationEntry::new(cmd.file_name, applied_at);

    storage::record_migration(client, &entry).await?;

    if !global.is_silent() {
        aprintln!(
            "{} {} at {}",
            p_g("Recorded"),
            entry.file_name,
            entry.applied_at
        );
    }
    Ok(())
}

async fn run_remove<C>(client: &C, cmd: RemoveCommand, global: &Global) -> Result<()>
where
    C: TableClient + ?Sized,
{
    let entry = MigrationEntry::new(cmd.file_name, cmd.applied_at);

    if !global.is_silent() {
        aprintln!("{}", p_y("Remove Plan:"));
        aprintln!(
            "  {}",
            p_r(&format!(
                "- {} applied at {}",
                entry.file_name, entry.applied_at
            ))
        );
        aprintln!();
    }

    confirm(cmd.force, "Remove this entry from the ledger?", false)?;

    storage::remove_migration(client, &entry).await?;

    if !global.is_silent() {
        aprintln!("{}", p_g("Ledger entry removed."));
    }
    Ok(())
}

/// Validates a user supplied `APPLIED_AT` value.
fn parse_applied_at(value: &str) -> Result<String> {
    let well_formed = value.len() == 14
        && value.bytes().all(|b| b.is_ascii_digit())
        && NaiveDateTime::parse_from_str(value, APPLIED_AT_FORMAT).is_ok();

    if well_formed {
        Ok(value.to_string())
    } else {
        Err(CommandError::InvalidTimestamp(value.to_string()))
    }
}

/// Asks for confirmation unless `force` is set.
fn confirm(force: bool, prompt: &str, default: bool) -> Result<()> {
    if force {
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()
        .map_err(|e| CommandError::Prompt(e.to_string()))?;

    if confirmed {
        Ok(())
    } else {
        Err(CommandError::UserCancelled)
    }
}

#[cfg(test)]
mod tests {
    use dynamigrate_core::ledger::LedgerError;

    use super::*;
    use crate::storage::testing::FakeTable;

    fn quiet() -> Global {
        Global {
            silent: true,
            verbose: false,
        }
    }

    #[test]
    fn test_parse_applied_at() {
        assert_eq!(parse_applied_at("20201014172343").unwrap(), "20201014172343");
        assert!(matches!(
            parse_applied_at("2020-10-14"),
            Err(CommandError::InvalidTimestamp(_))
        ));
        assert!(parse_applied_at("20201399172343").is_err());
        assert!(parse_applied_at("+2020101417234").is_err());
    }

    #[tokio::test]
    async fn test_init_skips_existing_table() {
        let table = FakeTable::new();

        run_init(&table, InitCommand { force: true }, &quiet())
            .await
            .unwrap();

        assert!(table.created().is_empty());
    }

    #[tokio::test]
    async fn test_init_creates_missing_table() {
        let table = FakeTable::new().fail_describe("Resource Not Found");

        run_init(&table, InitCommand { force: true }, &quiet())
            .await
            .unwrap();

        assert_eq!(table.created(), vec![LedgerTableSchema::migrations_log()]);
        assert_eq!(table.waited_for(), vec!["MIGRATIONS_LOG_DB".to_string()]);
    }

    #[tokio::test]
    async fn test_init_reports_create_failure() {
        let table = FakeTable::new()
            .fail_describe("Resource Not Found")
            .fail_create("Could not create table");

        let err = run_init(&table, InitCommand { force: true }, &quiet())
            .await
            .unwrap_err();

        assert!(matches!(err, CommandError::Ledger(LedgerError::Schema(_))));
    }

    #[tokio::test]
    async fn test_record_with_explicit_timestamp() {
        let table = FakeTable::new();
        let cmd = RecordCommand {
            file_name: "abc.ts".to_string(),
            applied_at: Some("20201014172343".to_string()),
        };

        run_record(&table, cmd, &quiet()).await.unwrap();

        assert_eq!(
            table.stored(),
            vec![MigrationEntry::new("abc.ts", "20201014172343")]
        );
    }

    #[tokio::test]
    async fn test_record_defaults_to_now() {
        let table = FakeTable::new();
        let cmd = RecordCommand {
            file_name: "abc.ts".to_string(),
            applied_at: None,
        };

        run_record(&table, cmd, &quiet()).await.unwrap();

        let stored = table.stored();
        assert_eq!(stored.len(), 1);
        assert!(parse_applied_at(&stored[0].applied_at).is_ok());
    }

    #[tokio::test]
    async fn test_record_rejects_bad_timestamp() {
        let table = FakeTable::new();
        let cmd = RecordCommand {
            file_name: "abc.ts".to_string(),
            applied_at: Some("yesterday".to_string()),
        };

        let err = run_record(&table, cmd, &quiet()).await.unwrap_err();

        assert!(matches!(err, CommandError::InvalidTimestamp(_)));
        assert!(table.stored().is_empty());
    }

    #[tokio::test]
    async fn test_remove_with_force() {
        let table = FakeTable::new();
        let entry = MigrationEntry::new("123.ts", "20201014172343");
        storage::record_migration(&table, &entry).await.unwrap();

        let cmd = RemoveCommand {
            file_name: "123.ts".to_string(),
            applied_at: "20201014172343".to_string(),
            force: true,
        };
        run_remove(&table, cmd, &quiet()).await.unwrap();

        assert!(table.stored().is_empty());
    }

    #[tokio::test]
    async fn test_status_reads_ledger_and_directory() {
        let table = FakeTable::new();
        storage::record_migration(&table, &MigrationEntry::new("1.ts", "20201014172343"))
            .await
            .unwrap();

        let cmd = StatusCommand {
            migrations_dir: std::env::temp_dir().join("dynamigrate-commands-no-such-dir"),
            format: OutputFormat::Json,
        };
        run_status(&table, cmd, &quiet()).await.unwrap();

        assert_eq!(table.scan_requests(), vec![None]);
    }

    #[tokio::test]
    async fn test_status_propagates_read_error() {
        let table = FakeTable::new().with_pages(vec![Err("Throughput exceeded".to_string())]);
        let cmd = StatusCommand {
            migrations_dir: PathBuf::from("migrations"),
            format: OutputFormat::Pretty,
        };

        let err = run_status(&table, cmd, &quiet()).await.unwrap_err();

        assert!(matches!(err, CommandError::Ledger(LedgerError::Read(_))));
    }
}
