//! Generic list/get pipeline shared by the race and event repositories.
//!
//! The pipeline is the same for both entities: base template, filter
//! compiler, order compiler, execution, row mapping. [`Listed`] supplies the
//! per-entity pieces (template, column wiring and the row conversion) so the
//! pipeline exists once instead of per entity.

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, QueryResult, Value};
use std::marker::PhantomData;

use crate::error::RepositoryError;
use crate::repositories::builder::{ListFilter, SelectBuilder};

/// An entity served by the generic listing pipeline.
pub trait Listed: Sized + Send + Sync {
    /// Entity name used in the not-found condition.
    const ENTITY: &'static str;

    /// Column matched by the filter's grouping identifiers.
    const GROUPING_COLUMN: &'static str;

    /// Visibility flag column, for entities that have one.
    const VISIBLE_COLUMN: Option<&'static str>;

    /// Base SELECT for list queries, including any computed columns.
    fn list_query() -> &'static str;

    /// Converts one result row into a domain record.
    fn from_row(row: &QueryResult) -> Result<Self, RepositoryError>;
}

/// Read-only repository over one [`Listed`] entity.
///
/// Stateless apart from the shared connection pool: every call issues exactly
/// one query and waits for its result.
#[derive(Debug, Clone)]
pub struct ListingRepository<T> {
    db: DatabaseConnection,
    _record: PhantomData<T>,
}

impl<T: Listed> ListingRepository<T> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns the records matching `filter` (all records when absent),
    /// ordered per `order_by` or by advertised start time when that is
    /// empty. Zero matches is a successful empty result.
    pub async fn list(
        &self,
        filter: Option<&ListFilter>,
        order_by: &str,
    ) -> Result<Vec<T>, RepositoryError> {
        let mut query = SelectBuilder::new(T::list_query());
        query.filter(filter, T::GROUPING_COLUMN, T::VISIBLE_COLUMN);
        query.order_by(order_by);

        self.fetch(query).await
    }

    /// Returns the single record with the given id, or the not-found
    /// condition when no row matches.
    pub async fn get(&self, id: i64) -> Result<T, RepositoryError> {
        let mut query = SelectBuilder::new(T::list_query());
        query.predicate("id = ?", [Value::from(id)]);

        let records = self.fetch(query).await?;
        records
            .into_iter()
            .next()
            .ok_or(RepositoryError::NotFound {
                entity: T::ENTITY,
                id,
            })
    }

    async fn fetch(&self, query: SelectBuilder) -> Result<Vec<T>, RepositoryError> {
        let statement = query.build(self.db.get_database_backend());
        let rows = self
            .db
            .query_all(statement)
            .await
            .map_err(RepositoryError::database_error)?;

        rows.iter().map(T::from_row).collect()
    }
}

/// Parses a stored RFC 3339 start time into the wire timestamp type.
/// A malformed stored value is a data-corruption error, never coerced.
pub(crate) fn parse_start_time(value: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| RepositoryError::InvalidTimestamp {
            value: value.to_string(),
            source,
        })
}
