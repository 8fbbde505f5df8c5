//! Key/value storage
//!
//! String keys to string values, persisted as one JSON object. Mirrors the
//! semantics of a browser's local storage: values are opaque strings and a
//! missing key is simply absent.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result, StorageError};

/// Key/value store, optionally backed by a JSON file
///
/// Every write re-reads the file and changes only its own key, so separate
/// keys written by two processes both survive. Two processes writing the
/// same key: the last write wins.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    items: BTreeMap<String, String>,
    /// Backing file (None keeps everything in memory)
    path: Option<PathBuf>,
}

impl LocalStorage {
    /// Create a store that never touches the filesystem
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open a store backed by `path`. A missing or blank file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let items = read_items(&path)?;
        Ok(Self {
            items,
            path: Some(path),
        })
    }

    /// Like [`LocalStorage::open`], but a file that is not a JSON object of
    /// strings is moved aside to `<file>.bak` and an empty store is opened
    pub fn open_or_recover(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        match Self::open(&path) {
            Err(Error::Storage(StorageError::Corrupt { reason, .. })) => {
                let backup = backup_path(&path);
                std::fs::rename(&path, &backup).map_err(|e| StorageError::WriteFailed {
                    path: backup.clone(),
                    reason: format!("Failed to move corrupt file aside: {}", e),
                })?;
                warn!(
                    "Storage file {} was corrupt ({}); moved to {}",
                    path.display(),
                    reason,
                    backup.display()
                );
                Ok(Self {
                    items: BTreeMap::new(),
                    path: Some(path),
                })
            }
            other => other,
        }
    }

    /// Backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the value stored under `key`
    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn set_item(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        let mut next = self.latest();
        next.insert(key.to_string(), value.into());
        self.commit(next)
    }

    /// Remove `key`, returning the previous value
    pub fn remove_item(&mut self, key: &str) -> Result<Option<String>> {
        let mut next = self.latest();
        let previous = next.remove(key);
        if previous.is_some() {
            self.commit(next)?;
        } else {
            self.items = next;
        }
        Ok(previous)
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items as they sit on disk right now, so keys written by another
    /// process since we opened are carried into the next write
    fn latest(&self) -> BTreeMap<String, String> {
        match &self.path {
            Some(path) => read_items(path).unwrap_or_else(|e| {
                debug!("Keeping in-memory items, re-read failed: {}", e);
                self.items.clone()
            }),
            None => self.items.clone(),
        }
    }

    /// Write `next` to the backing file and only then adopt it in memory
    fn commit(&mut self, next: BTreeMap<String, String>) -> Result<()> {
        if let Some(path) = &self.path {
            write_items(path, &next)?;
        }
        self.items = next;
        Ok(())
    }
}

fn read_items(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        debug!("Storage file {} does not exist yet", path.display());
        return Ok(BTreeMap::new());
    }

    let content = std::fs::read_to_string(path).map_err(|e| StorageError::ReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let items = serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
        path: path.to_path_buf(),
        reason: format!("not a JSON object of strings: {}", e),
    })?;
    Ok(items)
}

/// `local_storage.json` -> `local_storage.json.bak`
fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

fn write_items(path: &Path, items: &BTreeMap<String, String>) -> Result<()> {
    let write_failed = |reason: String| StorageError::WriteFailed {
        path: path.to_path_buf(),
        reason,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| write_failed(format!("Failed to create directory: {}", e)))?;
        }
    }

    let content = serde_json::to_string_pretty(items).map_err(|e| write_failed(e.to_string()))?;
    std::fs::write(path, content).map_err(|e| write_failed(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_memory_get_set_remove() {
        let mut storage = LocalStorage::in_memory();
        assert_eq!(storage.get_item("a"), None);

        storage.set_item("a", "1").unwrap();
        assert_eq!(storage.get_item("a"), Some("1"));
        assert_eq!(storage.len(), 1);

        assert_eq!(storage.remove_item("a").unwrap(), Some("1".to_string()));
        assert!(storage.is_empty());
        assert_eq!(storage.remove_item("a").unwrap(), None);
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("storage.json");

        let storage = LocalStorage::open(&path).unwrap();
        assert!(storage.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_set_item_persists_across_open() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("storage.json");

        let mut storage = LocalStorage::open(&path).unwrap();
        storage.set_item("topicsCompleted", r#"["loops"]"#).unwrap();

        let reopened = LocalStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("topicsCompleted"), Some(r#"["loops"]"#));
    }

    #[test]
    fn test_blank_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        std::fs::write(&path, "  \n").unwrap();

        let storage = LocalStorage::open(&path).unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = LocalStorage::open(&path).unwrap_err();
        assert!(matches!(err, Error::Storage(StorageError::Corrupt { .. })));
    }

    #[test]
    fn test_recover_moves_corrupt_file_aside() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        let corrupt = r#"{"topicsCompleted": ["loops"]}"#;
        std::fs::write(&path, corrupt).unwrap();

        let mut storage = LocalStorage::open_or_recover(&path).unwrap();
        assert!(storage.is_empty());
        assert!(!path.exists());

        let backup = temp_dir.path().join("storage.json.bak");
        assert_eq!(std::fs::read_to_string(&backup).unwrap(), corrupt);

        storage.set_item("topicsCompleted", r#"["loops"]"#).unwrap();
        let reopened = LocalStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("topicsCompleted"), Some(r#"["loops"]"#));
    }

    #[test]
    fn test_recover_leaves_good_file_alone() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        std::fs::write(&path, r#"{"a": "1"}"#).unwrap();

        let storage = LocalStorage::open_or_recover(&path).unwrap();
        assert_eq!(storage.get_item("a"), Some("1"));
        assert!(!temp_dir.path().join("storage.json.bak").exists());
    }

    #[test]
    fn test_writes_keep_keys_from_other_handles() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");

        let mut first = LocalStorage::open(&path).unwrap();
        let mut second = LocalStorage::open(&path).unwrap();
        first.set_item("a", "1").unwrap();
        second.set_item("b", "2").unwrap();
        first.remove_item("missing").unwrap();
        first.set_item("c", "3").unwrap();

        let reopened = LocalStorage::open(&path).unwrap();
        assert_eq!(reopened.get_item("a"), Some("1"));
        assert_eq!(reopened.get_item("b"), Some("2"));
        assert_eq!(reopened.get_item("c"), Some("3"));
    }

    #[test]
    fn test_failed_write_leaves_memory_untouched() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should be makes the write fail
        let path = temp_dir.path().join("storage.json");
        std::fs::create_dir_all(&path).unwrap();

        let mut storage = LocalStorage {
            items: BTreeMap::new(),
            path: Some(path),
        };
        assert!(storage.set_item("k", "v").is_err());
        assert_eq!(storage.get_item("k"), None);
    }
}
