//! Dynamic query composition for the listing repositories.
//!
//! [`SelectBuilder`] accumulates predicate fragments and their bound values
//! as parallel lists and only joins them into SQL text at [`SelectBuilder::build`],
//! so the placeholder count and the value order cannot drift apart.

use sea_orm::{DbBackend, Statement, Value};
use serde::{Deserialize, Serialize};

/// Column used when no usable order-by specification is supplied.
const DEFAULT_ORDER: &str = "advertised_start_time";

/// Optional constraints for a list query.
///
/// A default-valued filter applies no predicate at all and behaves exactly
/// like an absent filter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ListFilter {
    /// Grouping identifiers to match: meeting ids for races, sport ids for
    /// events. Matched with a single `IN` clause whose placeholders preserve
    /// input order.
    pub grouping_ids: Vec<i64>,
    /// Restrict results to visible rows. Ignored by entities without a
    /// visibility column.
    pub visible_only: bool,
}

impl ListFilter {
    /// A filter matching only the given grouping identifiers.
    pub fn for_grouping_ids(ids: impl Into<Vec<i64>>) -> Self {
        Self {
            grouping_ids: ids.into(),
            ..Self::default()
        }
    }
}

/// Builds one parameterized SELECT from a base template.
#[derive(Debug)]
pub(crate) struct SelectBuilder {
    base: &'static str,
    predicates: Vec<String>,
    values: Vec<Value>,
    order: Option<String>,
}

impl SelectBuilder {
    pub(crate) fn new(base: &'static str) -> Self {
        Self {
            base,
            predicates: Vec::new(),
            values: Vec::new(),
            order: None,
        }
    }

    /// Appends one predicate fragment together with its bound values.
    pub(crate) fn predicate<I>(&mut self, fragment: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = Value>,
    {
        self.predicates.push(fragment.into());
        self.values.extend(values);
    }

    /// Applies the optional structured filter for an entity whose grouping
    /// column is `grouping_column` and whose visibility column, if any, is
    /// `visible_column`. Cannot fail and performs no execution.
    pub(crate) fn filter(
        &mut self,
        filter: Option<&ListFilter>,
        grouping_column: &str,
        visible_column: Option<&str>,
    ) {
        let Some(filter) = filter else { return };

        if !filter.grouping_ids.is_empty() {
            let placeholders = vec!["?"; filter.grouping_ids.len()].join(",");
            self.predicate(
                format!("{grouping_column} IN ({placeholders})"),
                filter.grouping_ids.iter().map(|id| Value::from(*id)),
            );
        }

        if filter.visible_only
            && let Some(column) = visible_column
        {
            // The flag is inlined as a literal, not bound.
            self.predicate(format!("{column} = 1"), []);
        }
    }

    /// Sets the `ORDER BY` clause from a raw comma-separated specification.
    ///
    /// Each token optionally carries a direction suffix. Tokens are cleaned
    /// up (doubled spaces collapsed, surrounding whitespace trimmed, empty
    /// segments dropped) but their content is appended verbatim: order-by
    /// tokens are identifiers, not data values, and are not parameterized.
    /// Column names must be validated above this layer before untrusted
    /// input is ever passed here.
    pub(crate) fn order_by(&mut self, raw: &str) {
        if raw.trim().is_empty() {
            self.order = Some(DEFAULT_ORDER.to_string());
            return;
        }

        let fields: Vec<String> = raw
            .split(',')
            .filter_map(|token| {
                let token = token.replace("  ", " ");
                let token = token.trim();
                (!token.is_empty()).then(|| token.to_string())
            })
            .collect();

        if fields.is_empty() {
            self.order = Some(DEFAULT_ORDER.to_string());
        } else {
            self.order = Some(fields.join(", "));
        }
    }

    /// Joins the accumulated pieces into a single parameterized statement.
    pub(crate) fn build(self, backend: DbBackend) -> Statement {
        let mut sql = self.base.to_string();

        if !self.predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.predicates.join(" AND "));
        }

        if let Some(order) = &self.order {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }

        Statement::from_sql_and_values(backend, sql, self.values)
    }
}
