//! Demonstration sports event data.

use anyhow::Result;
use chrono::SecondsFormat;
use rand::Rng;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

use crate::models::event;
use crate::schema::ensure_schema;
use crate::seeds::{SEED_ROWS, fixture_name, fixture_start_time};

/// Seeds the events table with generated demonstration rows. Skips a table
/// that already holds data.
pub async fn seed(db: &DatabaseConnection) -> Result<()> {
    ensure_schema(db).await?;

    let existing = event::Entity::find().count(db).await?;
    if existing > 0 {
        tracing::info!(existing, "events table already populated, skipping seed");
        return Ok(());
    }

    let mut rng = rand::thread_rng();
    for id in 1..=SEED_ROWS {
        let start = fixture_start_time(&mut rng);
        let row = event::ActiveModel {
            id: Set(id),
            sport_id: Set(rng.gen_range(1..=10)),
            name: Set(fixture_name(&mut rng)),
            advertised_start_time: Set(start.to_rfc3339_opts(SecondsFormat::Secs, true)),
            status: Set(rng.gen_range(0..=3)),
        };
        row.insert(db).await?;
    }

    tracing::info!(rows = SEED_ROWS, "seeded demonstration events");
    Ok(())
}
