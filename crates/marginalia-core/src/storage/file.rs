//! File-backed storage
//!
//! One JSON document per key under the data directory
//! (`<data_dir>/<key>.json`). Writes are atomic (write to a temp file, sync,
//! rename) so a crash never leaves a half-written collection behind.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::{StorageError, StorageResult};
use super::StoragePort;

/// Filesystem key-value backend
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Open a storage rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| StorageError::CreateDirectory {
            path: root.clone(),
            source,
        })?;
        Ok(Self { root })
    }

    /// The directory holding the stored documents
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl StoragePort for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| StorageError::ReadError { path, source })
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        atomic_write(&self.path_for(key), value.as_bytes())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        let entries = fs::read_dir(&self.root).map_err(|source| StorageError::ReadError {
            path: self.root.clone(),
            source,
        })?;

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Write data to a file atomically
///
/// Writes to a temp file in the same directory, syncs it, then renames over
/// the target so the target is never left partially written.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file =
        File::create(&temp_path).map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|source| StorageError::AtomicWriteFailed {
        from: temp_path,
        to: path.to_path_buf(),
        source,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_key_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path()).unwrap();

        assert!(storage.get("notes-1-1").unwrap().is_none());
    }

    #[test]
    fn test_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path()).unwrap();

        storage.set("doc-links", "[]").unwrap();
        assert_eq!(storage.get("doc-links").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_replaces_whole_value() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path()).unwrap();

        storage.set("notes-2-1", "first").unwrap();
        storage.set("notes-2-1", "second").unwrap();
        assert_eq!(storage.get("notes-2-1").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_keys_lists_stored_documents() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path()).unwrap();

        storage.set("notes-1-1", "[]").unwrap();
        storage.set("notes-2-3", "[]").unwrap();
        storage.set("doc-links", "[]").unwrap();

        let keys = storage.keys().unwrap();
        assert_eq!(keys, vec!["doc-links", "notes-1-1", "notes-2-3"]);
    }

    #[test]
    fn test_keys_ignore_foreign_files() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path()).unwrap();

        storage.set("notes-1-1", "[]").unwrap();
        fs::write(temp_dir.path().join("stray.txt"), "not ours").unwrap();

        assert_eq!(storage.keys().unwrap(), vec!["notes-1-1"]);
    }

    #[test]
    fn test_open_creates_root_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let storage = FileStorage::open(&nested).unwrap();
        assert!(nested.exists());
        storage.set("doc-links", "[]").unwrap();
        assert!(nested.join("doc-links.json").exists());
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let storage = FileStorage::open(temp_dir.path()).unwrap();
            storage.set("notes-11-4", r#"[{"id":"1"}]"#).unwrap();
        }
        let storage = FileStorage::open(temp_dir.path()).unwrap();
        assert_eq!(
            storage.get("notes-11-4").unwrap().as_deref(),
            Some(r#"[{"id":"1"}]"#)
        );
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path()).unwrap();

        storage.set("doc-links", "[]").unwrap();
        assert!(!temp_dir.path().join("doc-links.tmp").exists());
    }
}
