//! Common types used throughout pagekit
//!
//! This module contains shared type definitions and type aliases
//! used by the engine and by every data source.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// A row produced by a query-backed source
pub type Row = JsonValue;

// ============================================================================
// Window
// ============================================================================

/// Offset/limit pair identifying the records of one page
///
/// `offset` is zero-based; `limit` is the page size and is always > 0.
/// An unbounded fetch is expressed by the absence of a window, never by a
/// zero limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    /// Number of records to skip
    pub offset: u64,
    /// Maximum number of records to return
    pub limit: u64,
}

impl Window {
    /// Create a new window
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// Window covering the given 1-based page
    ///
    /// Returns `None` for page 0 or a page size of 0, both of which mean
    /// "no window: fetch everything".
    pub fn for_page(page: u64, page_size: u64) -> Option<Self> {
        if page_size == 0 || page == 0 {
            return None;
        }
        Some(Self {
            offset: (page - 1) * page_size,
            limit: page_size,
        })
    }

    /// Exclusive end offset of the window
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.limit)
    }

    /// Clamp the window to a sequence of `len` items, returning a slice range
    pub fn clamp_to(&self, len: usize) -> std::ops::Range<usize> {
        let start = usize::try_from(self.offset).unwrap_or(usize::MAX).min(len);
        let end = usize::try_from(self.end()).unwrap_or(usize::MAX).min(len);
        start..end
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LIMIT {} OFFSET {}", self.limit, self.offset)
    }
}
