//! Sports event repository: listing wiring, row mapping and one-time seeding.
//!
//! Structurally the race repository's twin; the differences are the column
//! wiring (`sport_id`, no visibility column) and the stored status code.

use sea_orm::{DatabaseConnection, FromQueryResult, QueryResult};
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::error::RepositoryError;
use crate::models::event::EventRecord;
use crate::repositories::builder::ListFilter;
use crate::repositories::listing::{Listed, ListingRepository, parse_start_time};
use crate::repositories::queries;
use crate::seeds;

#[derive(Debug, FromQueryResult)]
struct EventRow {
    id: i64,
    sport_id: i64,
    name: String,
    advertised_start_time: String,
    status: i64,
}

impl Listed for EventRecord {
    const ENTITY: &'static str = "event";
    const GROUPING_COLUMN: &'static str = "sport_id";
    const VISIBLE_COLUMN: Option<&'static str> = None;

    fn list_query() -> &'static str {
        queries::events_list()
    }

    fn from_row(row: &QueryResult) -> Result<Self, RepositoryError> {
        let row = EventRow::from_query_result(row, "").map_err(RepositoryError::database_error)?;
        let advertised_start_time = parse_start_time(&row.advertised_start_time)?;

        Ok(EventRecord {
            id: row.id,
            sport_id: row.sport_id,
            name: row.name,
            advertised_start_time,
            status: row.status,
        })
    }
}

/// Repository for sports event listing queries.
#[derive(Debug, Clone)]
pub struct EventRepository {
    repo: ListingRepository<EventRecord>,
    init: Arc<OnceCell<()>>,
}

impl EventRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            repo: ListingRepository::new(db),
            init: Arc::new(OnceCell::new()),
        }
    }

    /// Seeds demonstration events at most once per repository instance;
    /// concurrent callers await the first attempt's outcome.
    pub async fn init(&self) -> anyhow::Result<()> {
        self.init
            .get_or_try_init(|| seeds::event::seed(self.repo.db()))
            .await?;
        Ok(())
    }

    /// Lists events matching `filter`, ordered per `order_by`.
    pub async fn list(
        &self,
        filter: Option<&ListFilter>,
        order_by: &str,
    ) -> Result<Vec<EventRecord>, RepositoryError> {
        self.repo.list(filter, order_by).await
    }

    /// Fetches a single event by id, signalling not-found when absent.
    pub async fn get(&self, id: i64) -> Result<EventRecord, RepositoryError> {
        self.repo.get(id).await
    }
}
