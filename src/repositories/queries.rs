//! Base list queries per entity.
//!
//! These templates are the fixed SELECT half of every list/get query; filter
//! and order clauses are appended by the [`super::builder::SelectBuilder`].

/// Races list query.
///
/// The computed `status` column returns 0 (open) while the advertised start,
/// interpreted in local time, is at or after now, and 1 (closed) once it has
/// passed. Keeping the derivation in SQL lets callers order by status.
pub(crate) fn races_list() -> &'static str {
    "SELECT \
     id, \
     meeting_id, \
     name, \
     number, \
     visible, \
     advertised_start_time, \
     CASE WHEN datetime(advertised_start_time, 'localtime') >= datetime('now', 'localtime') THEN 0 ELSE 1 END AS status \
     FROM races"
}

/// Events list query. `status` is a stored column with no derivation.
pub(crate) fn events_list() -> &'static str {
    "SELECT id, sport_id, name, advertised_start_time, status FROM events"
}
