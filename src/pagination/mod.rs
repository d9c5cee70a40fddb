//! Pagination module
//!
//! # Overview
//!
//! [`Paginator`] computes page state over a [`crate::source::DataSource`]:
//! - total count and page count, fetched lazily and memoized
//! - the effective page, clamped to the valid range
//! - first/last record numbers for "showing X-Y of Z" displays
//! - the fetch window of the current page
//! - locating and seeking to the page that holds a given record

mod engine;
mod types;

pub use engine::{clamp_page, page_count_for, Paginator};
pub use types::PageInfo;
