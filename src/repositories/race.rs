//! Race repository: listing wiring, row mapping and one-time seeding.

use sea_orm::{DatabaseConnection, FromQueryResult, QueryResult};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::error::RepositoryError;
use crate::models::race::{RaceRecord, RaceStatus};
use crate::repositories::builder::ListFilter;
use crate::repositories::listing::{Listed, ListingRepository, parse_start_time};
use crate::repositories::queries;
use crate::seeds;

/// Raw shape of one races list row, including the computed status column.
#[derive(Debug, FromQueryResult)]
struct RaceRow {
    id: i64,
    meeting_id: i64,
    name: String,
    number: i64,
    visible: bool,
    advertised_start_time: String,
    status: i64,
}

impl Listed for RaceRecord {
    const ENTITY: &'static str = "race";
    const GROUPING_COLUMN: &'static str = "meeting_id";
    const VISIBLE_COLUMN: Option<&'static str> = Some("visible");

    fn list_query() -> &'static str {
        queries::races_list()
    }

    fn from_row(row: &QueryResult) -> Result<Self, RepositoryError> {
        let row = RaceRow::from_query_result(row, "").map_err(RepositoryError::database_error)?;
        let advertised_start_time = parse_start_time(&row.advertised_start_time)?;

        Ok(RaceRecord {
            id: row.id,
            meeting_id: row.meeting_id,
            name: row.name,
            number: row.number,
            visible: row.visible,
            advertised_start_time,
            status: RaceStatus::from_code(row.status),
        })
    }
}

/// Repository for race listing queries.
#[derive(Debug, Clone)]
pub struct RaceRepository {
    repo: ListingRepository<RaceRecord>,
    init: Arc<OnceCell<()>>,
}

impl RaceRepository {
    /// Creates a repository over the shared connection pool. The pool is
    /// borrowed wiring, not owned state.
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repo: ListingRepository::new(db),
            init: Arc::new(OnceCell::new()),
        }
    }

    /// Seeds demonstration races at most once per repository instance.
    ///
    /// The first caller runs the seed; concurrent callers await its outcome
    /// rather than re-running it. A failed attempt leaves the guard unset so
    /// a later call may retry.
    pub async fn init(&self) -> anyhow::Result<()> {
        self.init
            .get_or_try_init(|| seeds::race::seed(self.repo.db()))
            .await?;
        Ok(())
    }

    /// Lists races matching `filter`, ordered per `order_by`.
    pub async fn list(
        &self,
        filter: Option<&ListFilter>,
        order_by: &str,
    ) -> Result<Vec<RaceRecord>, RepositoryError> {
        self.repo.list(filter, order_by).await
    }

    /// Fetches a single race by id, signalling not-found when absent.
    pub async fn get(&self, id: i64) -> Result<RaceRecord, RepositoryError> {
        self.repo.get(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::db::init_pool;
    use crate::models::race;
    use crate::schema::ensure_schema;
    use chrono::{DateTime, Duration, SecondsFormat, Timelike, Utc};
    use sea_orm::{ActiveModelTrait, Set};

    async fn test_db() -> DatabaseConnection {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            // A pooled :memory: database is per-connection; cap the pool so
            // every query sees the same database.
            db_max_connections: 1,
            ..AppConfig::default()
        };

        let db = init_pool(&config).await.expect("failed to init test DB");
        ensure_schema(&db).await.expect("failed to create schema");
        db
    }

    async fn insert_race(
        db: &DatabaseConnection,
        id: i64,
        meeting_id: i64,
        visible: bool,
        start: DateTime<Utc>,
    ) {
        let row = race::ActiveModel {
            id: Set(id),
            meeting_id: Set(meeting_id),
            name: Set(format!("Race {id}")),
            number: Set(id),
            visible: Set(visible),
            advertised_start_time: Set(start.to_rfc3339_opts(SecondsFormat::Secs, true)),
        };
        row.insert(db).await.unwrap();
    }

    #[tokio::test]
    async fn list_applies_filters_and_requested_order() {
        let db = test_db().await;
        let now = Utc::now();

        // Inserted out of id order on purpose.
        insert_race(&db, 1, 1, true, now + Duration::hours(1)).await;
        insert_race(&db, 2, 5, true, now + Duration::hours(2)).await;
        insert_race(&db, 4, 6, false, now + Duration::hours(3)).await;
        insert_race(&db, 3, 1, false, now + Duration::hours(4)).await;

        let repo = RaceRepository::new(db);

        let cases: Vec<(&str, ListFilter, Vec<i64>)> = vec![
            (
                "no_results",
                ListFilter::for_grouping_ids([10]),
                vec![],
            ),
            ("empty_filter", ListFilter::default(), vec![1, 2, 3, 4]),
            (
                "single_meeting_id",
                ListFilter::for_grouping_ids([1]),
                vec![1, 3],
            ),
            (
                "multiple_meeting_id",
                ListFilter::for_grouping_ids([1, 5]),
                vec![1, 2, 3],
            ),
            (
                "no_meeting_id_visible_only",
                ListFilter {
                    visible_only: true,
                    ..ListFilter::default()
                },
                vec![1, 2],
            ),
            (
                "single_meeting_id_visible_only",
                ListFilter {
                    grouping_ids: vec![1],
                    visible_only: true,
                },
                vec![1],
            ),
            (
                "multiple_meeting_id_visible_only",
                ListFilter {
                    grouping_ids: vec![5, 6],
                    visible_only: true,
                },
                vec![2],
            ),
        ];

        for (name, filter, expected_ids) in cases {
            let races = repo.list(Some(&filter), "id").await.unwrap();
            let ids: Vec<i64> = races.iter().map(|race| race.id).collect();
            assert_eq!(ids, expected_ids, "case {name}");

            if filter.visible_only {
                assert!(races.iter().all(|race| race.visible), "case {name}");
            }
        }
    }

    #[tokio::test]
    async fn list_derives_status_and_orders_by_it() {
        let db = test_db().await;
        let now = Utc::now();

        insert_race(&db, 1, 1, true, now + Duration::days(1)).await;
        insert_race(&db, 2, 2, true, now - Duration::days(1)).await;
        insert_race(&db, 3, 3, true, now + Duration::days(30)).await;
        insert_race(&db, 4, 4, true, now - Duration::days(30)).await;

        let repo = RaceRepository::new(db);
        let races = repo.list(None, "status").await.unwrap();
        assert_eq!(races.len(), 4);

        let expected = |id: i64| {
            if id == 1 || id == 3 {
                RaceStatus::Open
            } else {
                RaceStatus::Closed
            }
        };
        for race in &races {
            assert_eq!(race.status, expected(race.id), "race {}", race.id);
        }

        // Open races sort before closed ones; order within each pair is
        // unspecified.
        let mut open_ids: Vec<i64> = races[..2].iter().map(|race| race.id).collect();
        let mut closed_ids: Vec<i64> = races[2..].iter().map(|race| race.id).collect();
        open_ids.sort_unstable();
        closed_ids.sort_unstable();
        assert_eq!(open_ids, vec![1, 3]);
        assert_eq!(closed_ids, vec![2, 4]);
    }

    #[tokio::test]
    async fn list_with_unmatched_filter_returns_empty_ok() {
        let db = test_db().await;
        let repo = RaceRepository::new(db);

        let filter = ListFilter::for_grouping_ids([99]);
        let races = repo.list(Some(&filter), "").await.unwrap();
        assert!(races.is_empty());
    }

    #[tokio::test]
    async fn get_on_empty_store_signals_not_found() {
        let db = test_db().await;
        let repo = RaceRepository::new(db);

        let err = repo.get(42).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "race with id 42 was not found");
    }

    #[tokio::test]
    async fn get_round_trips_the_stored_start_time() {
        let db = test_db().await;
        // Stored with whole-second precision.
        let start = Utc::now()
            .with_nanosecond(0)
            .map(|t| t + Duration::days(1))
            .unwrap();
        insert_race(&db, 7, 3, true, start).await;

        let repo = RaceRepository::new(db);
        let race = repo.get(7).await.unwrap();

        assert_eq!(race.id, 7);
        assert_eq!(race.meeting_id, 3);
        assert_eq!(race.advertised_start_time, start);
        assert_eq!(race.status, RaceStatus::Open);
    }

    #[tokio::test]
    async fn corrupt_stored_timestamp_aborts_the_call() {
        let db = test_db().await;
        let row = race::ActiveModel {
            id: Set(1),
            meeting_id: Set(1),
            name: Set("Race 1".to_string()),
            number: Set(1),
            visible: Set(true),
            advertised_start_time: Set("next tuesday".to_string()),
        };
        row.insert(&db).await.unwrap();

        let repo = RaceRepository::new(db);
        let err = repo.list(None, "").await.unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::InvalidTimestamp { ref value, .. } if value == "next tuesday"
        ));
    }
}
