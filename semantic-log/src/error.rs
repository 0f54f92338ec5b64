//! # Error Types
//!
//! Centralized error definitions for the semantic-log crate.
//! All errors implement `std::error::Error` and `std::fmt::Display`.

use thiserror::Error;

/// Unified error type for semantic-log operations.
///
/// Emission itself never fails; these errors come from resolving a category
/// name, parsing category definitions, or loading sink configuration.
#[derive(Error, Debug)]
pub enum LogError {
    /// A caller asked for a category the table does not contain.
    #[error("Unknown log category: '{name}'")]
    UnknownCategory { name: String },

    #[error("Invalid category definitions: {0}")]
    InvalidCategories(#[source] serde_json::Error),

    #[error("Invalid severity '{value}': expected trace, debug, info, warning or error")]
    InvalidSeverity { value: String },

    #[error("Invalid label color '{value}'")]
    InvalidColor { value: String },

    #[error("I/O error reading {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid sink configuration: {0}")]
    InvalidConfig(#[source] serde_json::Error),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidEnv { key: String, value: String },

    #[error("Invalid time format: '{format}'")]
    InvalidTimeFormat { format: String },
}

impl LogError {
    pub fn unknown_category(name: impl Into<String>) -> Self {
        LogError::UnknownCategory { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_message() {
        let err = LogError::unknown_category("ingest");
        assert_eq!(err.to_string(), "Unknown log category: 'ingest'");
    }

    #[test]
    fn test_invalid_severity_message() {
        let err = LogError::InvalidSeverity {
            value: "loud".to_string(),
        };
        assert!(err.to_string().contains("'loud'"));
    }
}
