use clap::Parser;
use dynamigrate::commands::{self, Command, ConnectionArgs, Global};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Track applied DynamoDB migrations
#[derive(Debug, Parser)]
#[command(name = "dynamigrate")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    global: Global,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.global.is_verbose() {
        "dynamigrate=debug"
    } else {
        "dynamigrate=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    commands::run(cli.command, cli.connection, cli.global).await?;

    Ok(())
}
