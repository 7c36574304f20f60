//! Error types for dayplan operations.

use thiserror::Error;

/// Errors that can occur in dayplan operations.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Import rejected: {0}")]
    Import(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for dayplan operations.
pub type PlanResult<T> = Result<T, PlanError>;
