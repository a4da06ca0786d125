use clap::{Parser, Subcommand};
use serde::Serialize;

use scoutsync::{config::Config, error::Error, service::SyncOrchestrator, startup};

/// Synchronize competition events and matches from the feed.
#[derive(Parser)]
#[command(name = "scoutsync", version, about)]
struct Cli {
    /// Worker count for bulk upserts, overriding SYNC_WORKERS
    #[arg(long, global = true)]
    workers: Option<usize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Synchronize the configured season's events and print them
    Events,
    /// Synchronize one event's matches and print them
    Matches {
        /// Feed key of the event, e.g. 2025casj
        event_key: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let cli = Cli::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli, config).await {
        tracing::error!(kind = ?e.kind(), "{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: Config) -> Result<(), Error> {
    let db = startup::connect_to_database(&config).await?;
    let feed = startup::build_feed_client(&config)?;
    let workers = cli.workers.unwrap_or(config.sync_workers);

    let sync = SyncOrchestrator::new(&db, &feed, config.feed_year, workers);

    match cli.command {
        Command::Events => print_json(&sync.get_events().await?),
        Command::Matches { event_key } => {
            print_json(&sync.get_matches_for_event(&event_key).await?)
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::error!("Failed to serialize output: {}", e),
    }
}
