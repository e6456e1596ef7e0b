/// tablemap Error Module
///
/// This module defines the error types for the crate. It provides
/// structured error handling with proper error propagation instead of
/// diagnostic prints or stringly-typed results.
use thiserror::Error;

/// Error type covering every failure the mapper can surface:
/// - Store-level failures (connection, execution, scanning)
/// - Statement building against an incomplete field map
/// - Caller-supplied value/destination shapes that do not match a key-string
/// - Configuration loading
#[derive(Error, Debug)]
pub enum TableMapError {
    /// Database-related errors from SQLite operations, propagated unchanged
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A key-string referenced a character with no registered field
    #[error("Unknown field key '{0}'")]
    UnknownField(char),

    /// Caller-supplied values or destinations disagree with the key-string length
    #[error("Shape mismatch: key-string names {expected} columns but caller supplied {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Malformed statement-build requests (e.g. an empty key-string)
    #[error("Statement error: {0}")]
    Statement(String),

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system and I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Result to use TableMapError as the error type.
///
/// This provides a consistent error type across the entire crate
/// instead of using `Result<T, String>` or mixed error types.
pub type Result<T> = std::result::Result<T, TableMapError>;
