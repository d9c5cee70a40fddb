//! Error types for pagekit
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for pagekit
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    // ============================================================================
    // Backend Errors
    // ============================================================================
    #[error("Database error: {0}")]
    Database(#[from] duckdb::Error),

    #[error("Backend failure: {message}")]
    Backend { message: String },

    #[error("Operation '{operation}' is not supported by this data source")]
    Unsupported { operation: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a backend error
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Create an unsupported operation error
    pub fn unsupported(operation: impl Into<String>) -> Self {
        Self::Unsupported {
            operation: operation.into(),
        }
    }

    /// Check if this error came from the data source rather than from the caller
    pub fn is_backend(&self) -> bool {
        matches!(
            self,
            Error::Database(_) | Error::Backend { .. } | Error::Anyhow(_)
        )
    }

    /// Check if this error is a configuration problem
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::MissingConfigField { .. }
                | Error::InvalidConfigValue { .. }
                | Error::FileNotFound { .. }
        )
    }
}

/// Result type alias for pagekit
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("query");
        assert_eq!(err.to_string(), "Missing required config field: query");

        let err = Error::invalid_value("page_size", "must not be negative");
        assert_eq!(
            err.to_string(),
            "Invalid config value for 'page_size': must not be negative"
        );

        let err = Error::unsupported("locate_rank");
        assert_eq!(
            err.to_string(),
            "Operation 'locate_rank' is not supported by this data source"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(Error::backend("connection reset").is_backend());
        assert!(Error::from(anyhow::anyhow!("socket closed")).is_backend());
        assert!(!Error::unsupported("locate_rank").is_backend());
        assert!(!Error::config("bad").is_backend());

        assert!(Error::invalid_value("page_size", "negative").is_config());
        assert!(Error::missing_field("query").is_config());
        assert!(Error::FileNotFound {
            path: "paginator.yaml".to_string()
        }
        .is_config());
        assert!(!Error::backend("boom").is_config());
    }
}
