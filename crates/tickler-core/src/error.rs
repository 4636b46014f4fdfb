use crate::item::ItemId;
use thiserror::Error;

/// Result type for domain operations that never touch storage.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Domain invariant violations.
///
/// These are raised before any persistence call is made, so an operation
/// failing with a `CoreError` never leaves a partial write behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("completion percentage must be between 0 and 100, got {0}")]
    PercentageOutOfRange(i64),
    #[error("unknown incoming period: '{0}' (expected today, tomorrow or week)")]
    UnknownPeriod(String),
    #[error("time arithmetic out of range: {0}")]
    TimeOutOfRange(String),
    #[error("invalid item id: {0}")]
    InvalidItemId(String),
}

#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("item already exists: {0}")]
    Conflict(String),
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("storage query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}

/// Errors surfaced by the item service.
///
/// Storage failures are carried through untouched; the boundary layer decides
/// how to report them.
#[derive(Debug, Clone, Error)]
pub enum ServiceError {
    #[error("item not found: {0}")]
    NotFound(ItemId),
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] CoreError),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
