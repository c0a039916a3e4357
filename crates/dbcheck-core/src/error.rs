//! Error types for driver and connection operations

use thiserror::Error;

/// Core error type returned by `Connection` implementations
#[derive(Error, Debug)]
pub enum DbCheckError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for connection operations
pub type Result<T> = std::result::Result<T, DbCheckError>;
