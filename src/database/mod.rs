//! Query-backed data source via DuckDB
//!
//! This module paginates SQL queries with DuckDB as the query engine.
//! Counting, windowing and rank lookups run inside the database.

mod query;
mod source;

pub use query::{Filter, Query};
pub use source::{json_to_duckdb_value, open_database, QuerySource};
