//! Error types for the core module.
//!
//! The aggregator and solver are total and never produce these; they only
//! cover strict lookups and decoding of input documents.

use thiserror::Error;

/// Result type alias for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur at the fallible edges of the core crate.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Cost category not found: {0}")]
    CategoryNotFound(String),

    #[error("Cost item not found: {category}/{item}")]
    ItemNotFound { category: String, item: String },

    #[error("Unit type not found: {0}")]
    UnitTypeNotFound(String),

    #[error("Unit allocation not found: {0}")]
    AllocationNotFound(String),

    #[error("Unsupported input format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
