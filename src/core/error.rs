//! Error types for the synchronization core
//!
//! No error here is fatal to the process: a failed status write rolls the
//! optimistic projection back, a failed audit batch is dropped, and bad
//! incoming data is skipped per-item.

use thiserror::Error;

/// Errors reported by a [`StatusStore`](crate::store::StatusStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("write to {path} failed: {reason}")]
    WriteFailed { path: String, reason: String },

    #[error("read from {path} failed: {reason}")]
    ReadFailed { path: String, reason: String },

    #[error("store connection closed")]
    Closed,
}

impl StoreError {
    pub fn write_failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::WriteFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ReadFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the mutation surfaces of the core.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The zone id is not part of the static configuration.
    #[error("unknown zone: {0}")]
    UnknownZone(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
pub type SyncResult<T> = std::result::Result<T, SyncError>;
