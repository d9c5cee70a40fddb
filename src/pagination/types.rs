//! Pagination types
//!
//! Read-only views derived from a paginator's state.

use serde::{Deserialize, Serialize};

/// Snapshot of a paginator's derived state
///
/// Recomputed on demand by [`super::Paginator::info`]; holding one does not
/// keep anything in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageInfo {
    /// Effective (clamped) page, 0 when there are no pages
    pub page: u64,
    /// Total number of pages
    pub page_count: u64,
    /// Records per page, 0 when unpaginated
    pub page_size: u64,
    /// Total number of records
    pub count: u64,
    /// 1-based number of the first record on the page, 0 when empty
    pub first: u64,
    /// 1-based number of the last record on the page, 0 when empty
    pub last: u64,
    /// Whether a page precedes this one
    pub has_previous: bool,
    /// Whether a page follows this one
    pub has_next: bool,
}

impl PageInfo {
    /// Check if the page holds no records
    pub fn is_empty(&self) -> bool {
        self.page == 0
    }

    /// Number of records on the page
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.last + 1 - self.first
        }
    }

    /// Human-readable "showing X-Y of Z" label
    pub fn range_label(&self) -> String {
        if self.is_empty() {
            return "No records".to_string();
        }
        format!("Showing {}-{} of {}", self.first, self.last, self.count)
    }
}

impl std::fmt::Display for PageInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "page {}/{} ({})",
            self.page,
            self.page_count,
            self.range_label()
        )
    }
}
