//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paginate DuckDB queries from the command line
#[derive(Parser, Debug)]
#[command(name = "pagekit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Paginator configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// DuckDB database file (":memory:" for a scratch database)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// SQL query to paginate
    #[arg(short, long, global = true)]
    pub query: Option<String>,

    /// Positional query parameter, JSON literal or plain text (repeatable)
    #[arg(long = "param", global = true)]
    pub params: Vec<String>,

    /// Ordering for pages and seeks (e.g. "created_at DESC, id")
    #[arg(long, global = true)]
    pub order_by: Option<String>,

    /// Records per page (0 = everything on one page)
    #[arg(short = 's', long, global = true)]
    pub page_size: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the records of a page
    Page {
        /// Page to show (clamped to the valid range)
        #[arg(short, long, allow_hyphen_values = true)]
        page: Option<i64>,
    },

    /// Print page information without records
    Info {
        /// Page to describe (clamped to the valid range)
        #[arg(short, long, allow_hyphen_values = true)]
        page: Option<i64>,
    },

    /// Show the page holding the first record matching a condition
    Seek {
        /// SQL condition on the query's columns (repeatable, combined with AND)
        #[arg(long = "where", required = true)]
        conditions: Vec<String>,

        /// Positional parameter for the conditions, JSON literal or plain text (repeatable)
        #[arg(long = "bind")]
        binds: Vec<String>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}
