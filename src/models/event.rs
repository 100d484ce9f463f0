//! Sports event entity model and domain record.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sports event entity backing the `events` table.
///
/// Unlike races, `status` is a stored integer code with no derivation.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub sport_id: i64,
    pub name: String,
    pub advertised_start_time: String,
    pub status: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// A sports event as returned by the listing repository.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: i64,
    pub sport_id: i64,
    pub name: String,
    pub advertised_start_time: DateTime<Utc>,
    pub status: i64,
}
