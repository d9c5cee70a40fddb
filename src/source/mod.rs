//! Data source module
//!
//! Backends the paginator reads from.
//!
//! # Overview
//!
//! A [`DataSource`] can count its records, fetch a bounded window of them and,
//! optionally, report the 1-based rank of the first record matching a
//! predicate. Two backends ship with the crate:
//! - [`MemorySource`] - an in-memory sequence (owned or borrowed)
//! - [`crate::database::QuerySource`] - a DuckDB query

mod memory;

pub use memory::MemorySource;

use crate::error::{Error, Result};
use crate::types::Window;
use std::borrow::Cow;

/// Capability the paginator needs from a backend
///
/// Implementations must present a stable ordering for the lifetime of a
/// paginator: windows and ranks are only meaningful against a fixed order.
pub trait DataSource {
    /// Record type returned by fetches
    type Record: Clone;

    /// Predicate understood by [`DataSource::locate_rank`]
    type Predicate<'p>: ?Sized;

    /// Total number of records
    fn count(&self) -> Result<u64>;

    /// Fetch the records inside `window`
    ///
    /// The result holds at most `window.limit` records; fewer at the tail.
    fn fetch_window(&self, window: Window) -> Result<Cow<'_, [Self::Record]>>;

    /// Fetch every record, without a window
    fn fetch_all(&self) -> Result<Cow<'_, [Self::Record]>>;

    /// 1-based rank of the first record matching `predicate`
    ///
    /// Backends that cannot rank records report [`Error::Unsupported`].
    fn locate_rank(&self, predicate: &Self::Predicate<'_>) -> Result<Option<u64>> {
        let _ = predicate;
        Err(Error::unsupported("locate_rank"))
    }
}

#[cfg(test)]
mod tests;
