// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

//! # pagekit
//!
//! Page-oriented access to an ordered collection of records.
//!
//! A [`Paginator`] sits on top of a [`DataSource`] (an in-memory slice or a
//! DuckDB query) and answers the usual questions: how many records, how
//! many pages, which records are on page N, and which page holds a given
//! record. Totals are counted once and remembered until
//! [`Paginator::invalidate`] is called.
//!
//! ## Quick Start
//!
//! ```rust
//! use pagekit::Paginator;
//!
//! let records: Vec<u32> = (1..=95).collect();
//! let mut paginator = Paginator::from_vec(records, 20, 5);
//!
//! assert_eq!(paginator.page_count().unwrap(), 5);
//! assert_eq!(paginator.first_number().unwrap(), 81);
//! assert_eq!(paginator.last_number().unwrap(), 95);
//!
//! let page = paginator.fetch_page(Some(2)).unwrap();
//! assert_eq!(page.first(), Some(&21));
//!
//! let target = paginator.seek_to(&|n: &u32| *n == 77).unwrap();
//! assert_eq!(target, Some(4));
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Paginator<S>                         │
//! │  count()  page_count()  page()  fetch_page()  seek_to()     │
//! │                  Totals (memoized, reset together)          │
//! └─────────────────────────────────────────────────────────────┘
//!                               │ DataSource
//!               ┌───────────────┴───────────────┐
//!        MemorySource<T>                 QuerySource (DuckDB)
//!        borrowed sub-slices             COUNT / LIMIT OFFSET /
//!        linear predicate scan           ROW_NUMBER() rank
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Data sources behind a paginator
pub mod source;

/// Paginator engine
pub mod pagination;

/// DuckDB query source
pub mod database;

/// Paginator configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{PaginatorConfig, SourceConfig};
pub use database::{Filter, Query, QuerySource};
pub use error::{Error, Result};
pub use pagination::{clamp_page, page_count_for, PageInfo, Paginator};
pub use source::{DataSource, MemorySource};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
