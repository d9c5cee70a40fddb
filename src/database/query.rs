//! Query and filter descriptions
//!
//! A [`Query`] is an opaque SQL statement plus bind parameters; the source
//! wraps it in count, window and rank statements. A [`Filter`] is an opaque
//! WHERE fragment used to locate records.

use crate::types::Window;
use duckdb::types::Value;

/// Alias of the wrapped query in generated SQL
const QUERY_ALIAS: &str = "pagekit_q";

/// Name of the rank column added by rank lookups
const RANK_COLUMN: &str = "pagekit_pos";

/// SQL statement to paginate
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    sql: String,
    params: Vec<Value>,
    order_by: Option<String>,
}

impl Query {
    /// Create a query from SQL text
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            order_by: None,
        }
    }

    /// Bind the next positional (`?`) parameter
    #[must_use]
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Bind several positional parameters
    #[must_use]
    pub fn bind_all(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.params.extend(values);
        self
    }

    /// Order pages and ranks by `order` (e.g. `"created_at DESC, id"`)
    ///
    /// Without an ordering, windows and ranks follow the order the query
    /// itself produces. Rows with equal sort keys have no defined relative
    /// order: include a unique column to make ranks agree with page contents.
    #[must_use]
    pub fn order_by(mut self, order: impl Into<String>) -> Self {
        self.order_by = Some(order.into());
        self
    }

    /// SQL text as given
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound parameters
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Ordering clause, if any
    pub fn ordering(&self) -> Option<&str> {
        self.order_by.as_deref()
    }

    /// SQL without trailing whitespace or semicolons, safe to wrap
    fn base(&self) -> &str {
        self.sql.trim().trim_end_matches(';').trim_end()
    }

    /// The query as a subquery
    ///
    /// The closing parenthesis goes on its own line so a trailing `--`
    /// comment in the query cannot swallow it.
    fn wrapped(&self, alias: &str) -> String {
        format!("({}\n) AS {alias}", self.base())
    }

    /// Statement counting the query's rows
    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM {}", self.wrapped(QUERY_ALIAS))
    }

    /// Statement fetching the rows inside `window` (all rows for `None`)
    pub fn window_sql(&self, window: Option<Window>) -> String {
        let mut sql = format!("SELECT * FROM {}", self.wrapped(QUERY_ALIAS));

        if let Some(order) = &self.order_by {
            sql = format!("{sql} ORDER BY {order}");
        }
        if let Some(window) = window {
            sql = format!("{sql} {window}");
        }

        sql
    }

    /// Statement returning the smallest rank among rows matching `filter`
    pub fn rank_sql(&self, filter: &Filter) -> String {
        let over = self
            .order_by
            .as_ref()
            .map(|order| format!("ORDER BY {order}"))
            .unwrap_or_default();

        format!(
            "SELECT MIN({RANK_COLUMN}) FROM (SELECT *, ROW_NUMBER() OVER ({over}) AS {RANK_COLUMN} \
             FROM {}) AS pagekit_r WHERE {}",
            self.wrapped("pagekit_t"),
            filter.clause()
        )
    }
}

impl From<&str> for Query {
    fn from(sql: &str) -> Self {
        Self::new(sql)
    }
}

impl From<String> for Query {
    fn from(sql: String) -> Self {
        Self::new(sql)
    }
}

/// Condition selecting the records to locate
///
/// Conditions are opaque SQL evaluated against the query's columns and are
/// combined with AND. Each may use positional (`?`) parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Filter {
    conditions: Vec<String>,
    params: Vec<Value>,
}

impl Filter {
    /// Create a filter from one condition
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            conditions: vec![condition.into()],
            params: Vec::new(),
        }
    }

    /// Create a filter from one condition with a single parameter
    pub fn with_param(condition: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(condition).bind(value)
    }

    /// Add a condition
    #[must_use]
    pub fn and(mut self, condition: impl Into<String>) -> Self {
        self.conditions.push(condition.into());
        self
    }

    /// Bind the next positional parameter
    #[must_use]
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    /// WHERE clause body
    pub fn clause(&self) -> String {
        if self.conditions.is_empty() {
            return "TRUE".to_string();
        }
        self.conditions
            .iter()
            .map(|condition| format!("({condition})"))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    /// Bound parameters
    pub fn params(&self) -> &[Value] {
        &self.params
    }
}
