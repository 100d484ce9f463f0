//! # Error Handling
//!
//! Typed error taxonomy for the listing repositories. Execution failures are
//! propagated verbatim, the not-found outcome of `get` is a distinct variant
//! rather than a generic error, and a stored timestamp that cannot be parsed
//! aborts the call instead of being coerced.

use thiserror::Error;

/// Errors surfaced by the listing repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// `get` matched no row for the requested id.
    #[error("{entity} with id {id} was not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Store connectivity or query execution failure.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A stored start time that is not valid RFC 3339 text.
    #[error("stored timestamp {value:?} is not valid RFC 3339: {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl RepositoryError {
    /// Wraps a SeaORM error as a repository database error.
    pub fn database_error(err: sea_orm::DbErr) -> Self {
        Self::Database(err)
    }

    /// True for the not-found condition, as opposed to a query failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
