//! Table definitions for the listing store.

use anyhow::Result;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};

const CREATE_RACES: &str = "CREATE TABLE IF NOT EXISTS races (id INTEGER PRIMARY KEY, meeting_id INTEGER, name TEXT, number INTEGER, visible INTEGER, advertised_start_time DATETIME)";

const CREATE_EVENTS: &str = "CREATE TABLE IF NOT EXISTS events (id INTEGER PRIMARY KEY, sport_id INTEGER, name TEXT, advertised_start_time DATETIME, status INTEGER)";

/// Creates the races and events tables when they do not exist yet.
pub async fn ensure_schema(db: &DatabaseConnection) -> Result<()> {
    for ddl in [CREATE_RACES, CREATE_EVENTS] {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            ddl.to_string(),
        ))
        .await?;
    }

    Ok(())
}
