//! Store error taxonomy
//!
//! Validation and duplicate-prevention failures surface synchronously so the
//! caller can give immediate feedback. Persistence failures wrap
//! [`StorageError`], with capacity exhaustion distinguishable from generic
//! I/O failure. Load corruption and not-found on update/delete are not
//! errors at all: the former recovers to an empty collection, the latter is
//! an idempotent no-op.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by [`crate::NoteStore`] and [`crate::LinkStore`]
#[derive(Error, Debug)]
pub enum StoreError {
    /// Note content was empty after trimming
    #[error("note content is empty")]
    EmptyContent,

    /// An edge with the same ordered pair already exists
    #[error("link from '{from}' to '{to}' already exists")]
    DuplicateLink { from: String, to: String },

    /// Imported payload was not an array of record-shaped objects
    #[error("invalid import payload: {0}")]
    ImportFormat(String),

    /// A collection could not be serialized for persistence or export
    #[error("failed to serialize collection: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The durable write or read failed
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl StoreError {
    /// True when the in-memory mutation applied but the durable write hit
    /// storage-capacity exhaustion. Callers should warn the user that the
    /// change was not written durably.
    pub fn is_capacity(&self) -> bool {
        matches!(self, StoreError::Storage(e) if e.is_capacity())
    }

    /// Recovery suggestion for storage failures, if one applies
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            StoreError::Storage(e) => e.recovery_suggestion(),
            _ => None,
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_link_display() {
        let err = StoreError::DuplicateLink {
            from: "5-1".to_string(),
            to: "5-9".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("5-1"));
        assert!(msg.contains("5-9"));
        assert!(msg.contains("already exists"));
    }

    #[test]
    fn test_capacity_detection() {
        let err = StoreError::Storage(StorageError::CapacityExceeded {
            key: "doc-links".to_string(),
        });
        assert!(err.is_capacity());

        assert!(!StoreError::EmptyContent.is_capacity());
        assert!(!StoreError::ImportFormat("not an array".to_string()).is_capacity());
    }
}
