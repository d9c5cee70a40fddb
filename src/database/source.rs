//! DuckDB-backed data source
//!
//! Counts, windows and ranks are pushed down to DuckDB so a page never
//! requires reading the whole result.

use super::query::{Filter, Query};
use crate::config::{SourceConfig, IN_MEMORY};
use crate::error::{Error, Result};
use crate::pagination::Paginator;
use crate::source::DataSource;
use crate::types::{JsonObject, Row, Window};
use duckdb::{params_from_iter, Connection};
use serde_json::Value;
use std::borrow::Cow;

/// Open a DuckDB database file, or an in-memory database for `:memory:`
pub fn open_database(path: &str) -> Result<Connection> {
    let conn = if path == IN_MEMORY {
        Connection::open_in_memory()
    } else {
        Connection::open(path)
    };
    conn.map_err(|e| Error::config(format!("Failed to open DuckDB database '{path}': {e}")))
}

/// Data source running a query on a DuckDB connection
///
/// The connection is borrowed, so several paginators (one per request) can
/// share it.
pub struct QuerySource<'c> {
    /// DuckDB connection
    conn: &'c Connection,
    /// Query being paginated
    query: Query,
}

impl<'c> QuerySource<'c> {
    /// Create a source for `query` on `conn`
    pub fn new(conn: &'c Connection, query: impl Into<Query>) -> Self {
        Self {
            conn,
            query: query.into(),
        }
    }

    /// Create a source from a config definition
    pub fn from_config(conn: &'c Connection, config: &SourceConfig) -> Result<Self> {
        config.validate()?;

        let mut query = Query::new(config.query.clone())
            .bind_all(config.params.iter().map(json_to_duckdb_value));
        if let Some(order) = &config.order_by {
            query = query.order_by(order.clone());
        }

        Ok(Self::new(conn, query))
    }

    /// Query being paginated
    pub fn query(&self) -> &Query {
        &self.query
    }

    /// Run a statement and collect its rows as JSON objects
    fn query_rows(&self, sql: &str, params: &[duckdb::types::Value]) -> Result<Vec<Row>> {
        tracing::debug!("Executing query: {}", sql);

        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(params.iter()))?;
        let columns = rows
            .as_ref()
            .map(duckdb::Statement::column_names)
            .unwrap_or_default();

        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            let mut object = JsonObject::new();
            for (index, name) in columns.iter().enumerate() {
                let value: duckdb::types::Value = row.get(index)?;
                object.insert(name.clone(), duckdb_value_to_json(value));
            }
            records.push(Value::Object(object));
        }

        Ok(records)
    }
}

impl std::fmt::Debug for QuerySource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuerySource")
            .field("query", &self.query)
            .finish_non_exhaustive()
    }
}

impl DataSource for QuerySource<'_> {
    type Record = Row;
    type Predicate<'p> = Filter;

    fn count(&self) -> Result<u64> {
        let sql = self.query.count_sql();
        tracing::debug!("Executing query: {}", sql);

        let count: i64 = self.conn.query_row(
            &sql,
            params_from_iter(self.query.params().iter()),
            |row| row.get(0),
        )?;

        u64::try_from(count).map_err(|_| Error::backend(format!("Negative row count {count}")))
    }

    fn fetch_window(&self, window: Window) -> Result<Cow<'_, [Row]>> {
        let sql = self.query.window_sql(Some(window));
        self.query_rows(&sql, self.query.params()).map(Cow::Owned)
    }

    fn fetch_all(&self) -> Result<Cow<'_, [Row]>> {
        let sql = self.query.window_sql(None);
        self.query_rows(&sql, self.query.params()).map(Cow::Owned)
    }

    fn locate_rank(&self, predicate: &Filter) -> Result<Option<u64>> {
        let sql = self.query.rank_sql(predicate);
        tracing::debug!("Executing query: {}", sql);

        let params = self.query.params().iter().chain(predicate.params());
        let rank: Option<i64> = self
            .conn
            .query_row(&sql, params_from_iter(params), |row| row.get(0))?;

        Ok(rank.and_then(|rank| u64::try_from(rank).ok()))
    }
}

impl<'c> Paginator<QuerySource<'c>> {
    /// Paginate `query` on a DuckDB connection
    pub fn from_query(
        conn: &'c Connection,
        query: impl Into<Query>,
        page_size: u64,
        page: i64,
    ) -> Self {
        Self::new(QuerySource::new(conn, query), page_size, page)
    }
}

// ============================================================================
// Value conversion
// ============================================================================

/// Convert a JSON value (from config or the command line) to a bind parameter
pub fn json_to_duckdb_value(value: &Value) -> duckdb::types::Value {
    match value {
        Value::Null => duckdb::types::Value::Null,
        Value::Bool(b) => duckdb::types::Value::Boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                duckdb::types::Value::BigInt(i)
            } else if let Some(u) = n.as_u64() {
                duckdb::types::Value::UBigInt(u)
            } else {
                duckdb::types::Value::Double(n.as_f64().unwrap_or_default())
            }
        }
        Value::String(s) => duckdb::types::Value::Text(s.clone()),
        other => duckdb::types::Value::Text(other.to_string()),
    }
}

/// Convert DuckDB Value to JSON Value
fn duckdb_value_to_json(value: duckdb::types::Value) -> Value {
    match value {
        duckdb::types::Value::Null => Value::Null,
        duckdb::types::Value::Boolean(b) => Value::Bool(b),
        duckdb::types::Value::TinyInt(i) => Value::Number(i.into()),
        duckdb::types::Value::SmallInt(i) => Value::Number(i.into()),
        duckdb::types::Value::Int(i) => Value::Number(i.into()),
        duckdb::types::Value::BigInt(i) => Value::Number(i.into()),
        duckdb::types::Value::HugeInt(i) => Value::String(i.to_string()),
        duckdb::types::Value::UTinyInt(i) => Value::Number(i.into()),
        duckdb::types::Value::USmallInt(i) => Value::Number(i.into()),
        duckdb::types::Value::UInt(i) => Value::Number(i.into()),
        duckdb::types::Value::UBigInt(i) => Value::Number(i.into()),
        duckdb::types::Value::Float(f) => {
            serde_json::Number::from_f64(f64::from(f)).map_or(Value::Null, Value::Number)
        }
        duckdb::types::Value::Double(f) => {
            serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)
        }
        duckdb::types::Value::Text(s) => Value::String(s),
        duckdb::types::Value::Blob(b) => Value::String(base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            b,
        )),
        duckdb::types::Value::Timestamp(_, i) => {
            // Microseconds since epoch
            let secs = i.div_euclid(1_000_000);
            let nsecs = (i.rem_euclid(1_000_000) * 1000) as u32;
            chrono::DateTime::from_timestamp(secs, nsecs)
                .map(|dt| Value::String(dt.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()))
                .unwrap_or(Value::Number(i.into()))
        }
        duckdb::types::Value::Date32(d) => {
            // Days since epoch (719163 is the number of days from 1 CE to 1970-01-01)
            chrono::NaiveDate::from_num_days_from_ce_opt(d + 719_163)
                .map(|date| Value::String(date.format("%Y-%m-%d").to_string()))
                .unwrap_or(Value::Number(d.into()))
        }
        duckdb::types::Value::Time64(_, t) => {
            // Microseconds since midnight
            let secs = t / 1_000_000;
            let micros = t % 1_000_000;
            Value::String(format!(
                "{:02}:{:02}:{:02}.{:06}",
                secs / 3600,
                (secs % 3600) / 60,
                secs % 60,
                micros
            ))
        }
        _ => Value::String(format!("{value:?}")),
    }
}
