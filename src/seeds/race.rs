//! Demonstration race data.

use anyhow::Result;
use chrono::SecondsFormat;
use rand::Rng;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

use crate::models::race;
use crate::schema::ensure_schema;
use crate::seeds::{SEED_ROWS, fixture_name, fixture_start_time};

/// Seeds the races table with generated demonstration rows.
///
/// The schema is created on demand and an already-populated table is left
/// untouched, so restarting against an existing database file stays
/// idempotent.
pub async fn seed(db: &DatabaseConnection) -> Result<()> {
    ensure_schema(db).await?;

    let existing = race::Entity::find().count(db).await?;
    if existing > 0 {
        tracing::info!(existing, "races table already populated, skipping seed");
        return Ok(());
    }

    let mut rng = rand::thread_rng();
    for id in 1..=SEED_ROWS {
        let start = fixture_start_time(&mut rng);
        let row = race::ActiveModel {
            id: Set(id),
            meeting_id: Set(rng.gen_range(1..=10)),
            name: Set(fixture_name(&mut rng)),
            number: Set(rng.gen_range(1..=12)),
            visible: Set(rng.gen_bool(0.5)),
            advertised_start_time: Set(start.to_rfc3339_opts(SecondsFormat::Secs, true)),
        };
        row.insert(db).await?;
    }

    tracing::info!(rows = SEED_ROWS, "seeded demonstration races");
    Ok(())
}
