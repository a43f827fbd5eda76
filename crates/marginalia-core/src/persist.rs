//! Shared persistence helpers
//!
//! Both stores follow the same cycle: read the whole collection once at
//! open, rewrite the whole collection after every mutation. These helpers
//! keep the serialization rules (a JSON array of flat records) in one place
//! so the two stores cannot drift apart.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::{StoreError, StoreResult};
use crate::storage::StoragePort;

/// Load the collection stored under `key`.
///
/// A missing key yields an empty collection. So do corrupt data and a failed
/// read: the store must come up usable, so both conditions are logged and
/// swallowed here instead of reaching the caller.
pub(crate) fn load_collection<T: DeserializeOwned>(storage: &dyn StoragePort, key: &str) -> Vec<T> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            warn!(key, error = %err, "failed to read stored collection, starting empty");
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(err) => {
            warn!(key, error = %err, "stored collection is corrupt, starting empty");
            Vec::new()
        }
    }
}

/// Rewrite the whole collection stored under `key`
pub(crate) fn persist_collection<T: Serialize>(
    storage: &dyn StoragePort,
    key: &str,
    items: &[T],
) -> StoreResult<()> {
    let raw = serde_json::to_string(items)?;
    storage.set(key, &raw)?;
    Ok(())
}

/// Pretty-printed snapshot of a collection, suitable for export files
pub(crate) fn export_snapshot<T: Serialize>(items: &[T]) -> StoreResult<String> {
    Ok(serde_json::to_string_pretty(items)?)
}

/// Parse an import snapshot into records.
///
/// Anything that is not an array of record-shaped objects is a single
/// format error; there is no partial success.
pub(crate) fn parse_snapshot<T: DeserializeOwned>(payload: &str) -> StoreResult<Vec<T>> {
    serde_json::from_str(payload).map_err(|e| StoreError::ImportFormat(e.to_string()))
}

/// Outcome of a merge-import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Records appended by the merge
    pub imported: usize,
    /// Records skipped because they already existed
    pub skipped: usize,
}
