//! Error types for the structure engines.

use thiserror::Error;

/// Result type alias for structure operations.
pub type StructureResult<T> = Result<T, StructureError>;

/// Errors raised before any structural mutation is committed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    /// Hash table operations require a non-empty key.
    #[error("hash table keys must be non-empty")]
    EmptyKey,
}
