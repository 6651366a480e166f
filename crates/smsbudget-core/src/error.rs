//! Error types for smsbudget-core
//!
//! Analysis never fails. Only storage and invalid spend amounts produce errors,
//! and a corrupt budget record is recovered rather than reported.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for smsbudget operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // Store Errors
    // ===================
    #[error("Failed to read stored record '{key}'")]
    StoreRead {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write stored record '{key}'")]
    StoreWrite {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid data directory: {path} - {reason}")]
    InvalidDataDir { path: PathBuf, reason: String },

    // ===================
    // Serialization Errors
    // ===================
    #[error("Failed to serialize cost tracker state")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    // ===================
    // Input Errors
    // ===================
    #[error("Invalid cost amount: {amount} (must be a finite, non-negative USD value)")]
    InvalidAmount { amount: f64 },
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidAmount { amount: -1.5 };
        assert_eq!(
            err.to_string(),
            "Invalid cost amount: -1.5 (must be a finite, non-negative USD value)"
        );

        let err = CoreError::StoreWrite {
            key: "gpbc_cost_tracker".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "Failed to write stored record 'gpbc_cost_tracker'");
        assert!(std::error::Error::source(&err).is_some());
    }
}
