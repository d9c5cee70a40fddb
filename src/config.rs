//! Configuration types for paginators
//!
//! Paginator settings (and, for the CLI, the query to paginate) loaded
//! from YAML:
//!
//! ```yaml
//! page_size: 20
//! page: 1
//! max_page_size: 500
//! source:
//!   database: data.duckdb
//!   query: SELECT * FROM orders WHERE status = ?
//!   params: [shipped]
//!   order_by: id
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Database path that opens a fresh in-memory DuckDB
pub const IN_MEMORY: &str = ":memory:";

// ============================================================================
// Paginator Config
// ============================================================================

/// Paginator settings
///
/// Values are signed so that a negative page size in a file is reported as
/// an invalid value instead of a parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatorConfig {
    /// Records per page (0 = unpaginated)
    #[serde(default = "default_page_size")]
    pub page_size: i64,

    /// Initial page (clamped at use, so any value is accepted)
    #[serde(default = "default_page")]
    pub page: i64,

    /// Upper bound accepted for `page_size`
    #[serde(default)]
    pub max_page_size: Option<u64>,

    /// Query to paginate
    #[serde(default)]
    pub source: Option<SourceConfig>,
}

fn default_page_size() -> i64 {
    20
}

fn default_page() -> i64 {
    1
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page: default_page(),
            max_page_size: None,
            source: None,
        }
    }
}

impl PaginatorConfig {
    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::config(format!("Failed to parse paginator YAML: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.page_size < 0 {
            return Err(Error::invalid_value(
                "page_size",
                format!("must not be negative, got {}", self.page_size),
            ));
        }

        if let Some(max) = self.max_page_size {
            if self.page_size as u64 > max {
                return Err(Error::invalid_value(
                    "page_size",
                    format!("{} exceeds max_page_size {max}", self.page_size),
                ));
            }
        }

        if let Some(source) = &self.source {
            source.validate()?;
        }

        Ok(())
    }

    /// Validated page size
    pub fn page_size(&self) -> Result<u64> {
        u64::try_from(self.page_size).map_err(|_| {
            Error::invalid_value(
                "page_size",
                format!("must not be negative, got {}", self.page_size),
            )
        })
    }
}

// ============================================================================
// Source Config
// ============================================================================

/// Query to paginate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// DuckDB database file, or `:memory:`
    #[serde(default = "default_database")]
    pub database: String,

    /// SQL query producing the records
    pub query: String,

    /// Positional bind parameters for `query`
    #[serde(default)]
    pub params: Vec<serde_json::Value>,

    /// Ordering applied to pages and rank lookups (e.g. `id` or `created_at DESC, id`)
    #[serde(default)]
    pub order_by: Option<String>,
}

fn default_database() -> String {
    IN_MEMORY.to_string()
}

impl SourceConfig {
    /// Validate the source definition
    pub fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(Error::invalid_value("source.database", "cannot be empty"));
        }

        if self.query.trim().is_empty() {
            return Err(Error::invalid_value("source.query", "cannot be empty"));
        }

        if self
            .order_by
            .as_ref()
            .is_some_and(|order| order.trim().is_empty())
        {
            return Err(Error::invalid_value(
                "source.order_by",
                "cannot be blank when given",
            ));
        }

        Ok(())
    }

    /// Whether the database lives in memory only
    pub fn is_in_memory(&self) -> bool {
        self.database == IN_MEMORY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PaginatorConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, PaginatorConfig::default());
        assert_eq!(config.page_size().unwrap(), 20);
        assert_eq!(config.page, 1);
        assert!(config.source.is_none());
    }

    #[test]
    fn test_full_config() {
        let yaml = r"
page_size: 50
page: 3
max_page_size: 100
source:
  database: orders.duckdb
  query: SELECT * FROM orders WHERE status = ?
  params: [shipped]
  order_by: id
";
        let config = PaginatorConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.page_size().unwrap(), 50);
        assert_eq!(config.page, 3);
        assert_eq!(config.max_page_size, Some(100));

        let source = config.source.unwrap();
        assert_eq!(source.database, "orders.duckdb");
        assert_eq!(source.params, vec![json!("shipped")]);
        assert_eq!(source.order_by.as_deref(), Some("id"));
        assert!(!source.is_in_memory());
    }

    #[test]
    fn test_source_database_defaults_to_memory() {
        let config = PaginatorConfig::from_yaml_str("source:\n  query: SELECT 1\n").unwrap();
        assert!(config.source.unwrap().is_in_memory());
    }

    #[test]
    fn test_negative_page_size_rejected() {
        let err = PaginatorConfig::from_yaml_str("page_size: -5").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfigValue { ref field, .. } if field == "page_size"
        ));
    }

    #[test]
    fn test_page_size_above_max_rejected() {
        let err = PaginatorConfig::from_yaml_str("page_size: 500\nmax_page_size: 100").unwrap_err();
        assert!(err.to_string().contains("exceeds max_page_size 100"));
    }

    #[test]
    fn test_zero_page_size_allowed() {
        let config = PaginatorConfig::from_yaml_str("page_size: 0\nmax_page_size: 10").unwrap();
        assert_eq!(config.page_size().unwrap(), 0);
    }

    #[test]
    fn test_negative_page_accepted() {
        let config = PaginatorConfig::from_yaml_str("page: -4").unwrap();
        assert_eq!(config.page, -4);
    }

    #[test]
    fn test_empty_query_rejected() {
        let err = PaginatorConfig::from_yaml_str("source:\n  query: '  '\n").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfigValue { ref field, .. } if field == "source.query"
        ));
    }

    #[test]
    fn test_blank_order_by_rejected() {
        let err =
            PaginatorConfig::from_yaml_str("source:\n  query: SELECT 1\n  order_by: ''\n").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = PaginatorConfig::from_yaml_str("page_size: [1, 2").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("Failed to parse paginator YAML"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size: 7").unwrap();
        writeln!(file, "page: 2").unwrap();

        let config = PaginatorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.page_size().unwrap(), 7);
        assert_eq!(config.page, 2);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PaginatorConfig::from_file(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
        assert!(err.is_config());
    }
}
