//! Error types shared across marketdesk crates

use thiserror::Error;

/// Result type alias for marketdesk operations
pub type Result<T> = std::result::Result<T, MarketdeskError>;

/// Main error type for marketdesk
#[derive(Error, Debug)]
pub enum MarketdeskError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
