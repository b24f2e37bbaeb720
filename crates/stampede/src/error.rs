//! Error types for bulk operations.

use stampede_core::selector::SelectorError;
use thiserror::Error;

/// Errors raised by bulk operations.
///
/// Storage errors are propagated from the driver unchanged; this layer
/// performs no retries and no error translation, and the enclosing
/// transaction rolls back fully.
#[derive(Debug, Error)]
pub enum BulkError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Field selection failed (e.g. the resolved key field set is empty).
    #[error("field selection error: {0}")]
    Selector(#[from] SelectorError),

    /// No connection is registered under the requested alias.
    #[error("unknown connection alias: {0}")]
    UnknownConnection(String),
}

/// Result type alias for bulk operations.
pub type Result<T> = std::result::Result<T, BulkError>;
