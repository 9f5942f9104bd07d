//! Error types for the circulation desk

use thiserror::Error;

/// Main catalog error type
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
