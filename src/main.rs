//! # Listings Service Entry Point
//!
//! Minimal bootstrap standing in for the service layer: loads configuration,
//! wires logging and the connection pool, seeds demonstration data and
//! issues a sample listing from each repository.

use listings::config::ConfigLoader;
use listings::db::{health_check, init_pool};
use listings::logging::init_subscriber;
use listings::repositories::{EventRepository, RaceRepository};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::new().load()?;
    init_subscriber(&config);

    tracing::info!(
        profile = %config.profile,
        database_url = %config.database_url,
        "starting listings service"
    );
    if let Ok(json) = config.as_json() {
        tracing::debug!(config = %json, "loaded configuration");
    }

    let db = init_pool(&config).await?;
    health_check(&db).await?;

    let races = RaceRepository::new(db.clone());
    let events = EventRepository::new(db);

    if config.seed_on_startup {
        races.init().await?;
        events.init().await?;
    }

    let race_count = races.list(None, "").await?.len();
    let event_count = events.list(None, "").await?.len();
    tracing::info!(race_count, event_count, "listing repositories ready");

    Ok(())
}
