//! Error handling for Recoup
//!
//! Defines custom error types and establishes a unified Result type
//! using anyhow for context chaining and error propagation.

use thiserror::Error;

/// Core error types for tracker operations
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("database error: {0}")]
    DbError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("validation error: {0}")]
    ValidationError(String),

    #[error("currency error: {0}")]
    CurrencyError(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for tracker operations
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting_is_readable() {
        let err = TrackerError::DbError("connection failed".to_string());
        assert_eq!(err.to_string(), "database error: connection failed");
    }

    #[test]
    fn test_anyhow_context_chains_errors() {
        use anyhow::Context;
        let result: Result<()> =
            Err(anyhow::anyhow!("original error")).context("failed to record sale");
        match result {
            Err(e) => {
                let msg = e.to_string();
                assert!(msg.contains("failed to record sale"));
                let debug_msg = format!("{:?}", e);
                assert!(debug_msg.contains("original error") || msg.contains("original error"));
            }
            Ok(_) => panic!("expected error"),
        }
    }

    #[test]
    fn test_tracker_error_variants() {
        let db_err = TrackerError::DbError("test".to_string());
        assert!(db_err.to_string().starts_with("database error"));

        let validation_err = TrackerError::ValidationError("test".to_string());
        assert!(validation_err.to_string().starts_with("validation error"));

        let currency_err = TrackerError::CurrencyError("test".to_string());
        assert!(currency_err.to_string().starts_with("currency error"));
    }
}
