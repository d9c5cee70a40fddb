//! CLI module
//!
//! Command-line interface for paginating DuckDB queries.
//!
//! # Commands
//!
//! - `page` - Print a page of records with its page information
//! - `info` - Print page information only
//! - `seek` - Jump to the page holding the first matching record

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
