//! Error Types
//!
//! Ordinary user input never produces an error - every user-facing outcome
//! is an `Understanding`. The variants here are startup and data-integrity
//! problems, surfaced loudly before the engine serves requests.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Catalog integrity violation, fatal at load time
    #[error("Catalog integrity error: {0}")]
    Catalog(String),

    /// Alias mapped to two different canonical symbols
    #[error("Duplicate alias '{alias}' maps to both {existing} and {conflicting}")]
    DuplicateAlias {
        alias: String,
        existing: String,
        conflicting: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
