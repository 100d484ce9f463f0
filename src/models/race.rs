//! Race entity model and domain record.
//!
//! The entity mirrors the `races` table and is what seeds and tests insert
//! through; [`RaceRecord`] is the immutable shape returned by list/get
//! queries, carrying the parsed start time and the derived status.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Race entity backing the `races` table.
///
/// `advertised_start_time` is stored as RFC 3339 text and parsed only when
/// rows are mapped into [`RaceRecord`]s.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "races")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub meeting_id: i64,
    pub name: String,
    pub number: i64,
    pub visible: bool,
    pub advertised_start_time: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Race status derived at query time from the advertised start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RaceStatus {
    /// The advertised start is at or after the current time.
    Open,
    /// The advertised start has passed.
    Closed,
}

impl RaceStatus {
    /// Maps the computed status column: 0 is open, anything else closed.
    pub fn from_code(code: i64) -> Self {
        if code == 0 {
            RaceStatus::Open
        } else {
            RaceStatus::Closed
        }
    }
}

/// A race as returned by the listing repository.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RaceRecord {
    pub id: i64,
    pub meeting_id: i64,
    pub name: String,
    pub number: i64,
    pub visible: bool,
    pub advertised_start_time: DateTime<Utc>,
    pub status: RaceStatus,
}
