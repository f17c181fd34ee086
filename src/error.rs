//! Error types for bytelog
//!
//! Provides a unified error type for all store operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for bytelog operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Framing Errors
    // -------------------------------------------------------------------------
    /// A length header or payload ran past the end of the log. Raised when a
    /// position does not point at a valid record boundary or the file was
    /// truncated mid-record.
    #[error("log corruption detected: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Lifecycle Errors
    // -------------------------------------------------------------------------
    /// The store was closed; no further operations are permitted.
    #[error("store is closed")]
    Closed,
}
