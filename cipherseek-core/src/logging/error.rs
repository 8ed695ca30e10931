//! Logging error types

use thiserror::Error;

/// Errors surfaced while setting up the tracing stack
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The global subscriber could not be installed
    #[error("Failed to initialize logging: {0}")]
    InitializationFailed(String),

    /// Rejected logging configuration
    #[error("Invalid logging configuration: {0}")]
    InvalidConfiguration(String),
}
