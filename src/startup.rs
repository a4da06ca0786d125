use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

use crate::{config::Config, error::Error, feed::FeedClient};

/// Install the global `tracing` subscriber, honouring `RUST_LOG` and defaulting to `info`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Build the feed client with the configured base URL, API key, and user agent
pub fn build_feed_client(config: &Config) -> Result<FeedClient, Error> {
    let feed = FeedClient::new(
        &config.feed_base_url,
        &config.feed_api_key,
        &config.user_agent,
    )?;

    Ok(feed)
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}
