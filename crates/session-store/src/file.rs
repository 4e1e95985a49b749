//! JSON-file storage backend.

use crate::{KeyValueStorage, StorageError, StorageResult};
use client_core::Paths;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// On-disk shape of the store file.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    /// When the file was last written (diagnostic only).
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// Durable key/value storage backed by a single JSON file.
///
/// A missing or unreadable file degrades to an empty store; the caller's
/// safe default is "logged out", never a crash. Writes rewrite the whole
/// file via a temp-file rename so a torn write cannot corrupt it.
pub struct FileStorage {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl FileStorage {
    /// Create a storage instance over `~/.uzhavan/store.json`.
    pub fn new(paths: &Paths) -> StorageResult<Self> {
        paths
            .ensure_dirs()
            .map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(Self {
            path: paths.store_file(),
            lock: Mutex::new(()),
        })
    }

    /// Take the write lock, recovering from poisoning.
    ///
    /// The store's contract is that storage trouble degrades, never
    /// panics; a thread that died mid-write left the file either old or
    /// new (writes go through a temp-file rename), so the guard is safe
    /// to reuse.
    fn guard(&self) -> std::sync::MutexGuard<'_, ()> {
        self.lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn read_file(&self) -> StoreFile {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "Store file not readable, starting empty");
                return StoreFile::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Store file corrupt, starting empty");
                StoreFile::default()
            }
        }
    }

    fn write_file(&self, mut file: StoreFile) -> StorageResult<()> {
        file.updated_at = Some(chrono::Utc::now().to_rfc3339());

        let content =
            serde_json::to_string_pretty(&file).map_err(|e| StorageError::Encoding(e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

impl KeyValueStorage for FileStorage {
    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let _guard = self.guard();
        let mut file = self.read_file();
        file.entries.insert(key.to_string(), value.to_string());
        self.write_file(file)
    }

    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let _guard = self.guard();
        Ok(self.read_file().entries.get(key).cloned())
    }

    fn delete(&self, key: &str) -> StorageResult<bool> {
        let _guard = self.guard();
        let mut file = self.read_file();
        let removed = file.entries.remove(key).is_some();
        if removed {
            self.write_file(file)?;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn create_storage(dir: &tempfile::TempDir) -> FileStorage {
        let paths = Paths::with_base_dir(dir.path().to_path_buf());
        FileStorage::new(&paths).unwrap()
    }

    #[test]
    fn test_set_get_delete() {
        let dir = tempdir().unwrap();
        let storage = create_storage(&dir);

        storage.set("authToken", "tok-123").unwrap();
        assert_eq!(storage.get("authToken").unwrap(), Some("tok-123".to_string()));
        assert!(storage.has("authToken").unwrap());

        assert!(storage.delete("authToken").unwrap());
        assert!(!storage.delete("authToken").unwrap());
        assert_eq!(storage.get("authToken").unwrap(), None);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();

        {
            let storage = create_storage(&dir);
            storage.set("userId", "42").unwrap();
        }

        let storage = create_storage(&dir);
        assert_eq!(storage.get("userId").unwrap(), Some("42".to_string()));
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let storage = create_storage(&dir);

        assert_eq!(storage.get("anything").unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());
        paths.ensure_dirs().unwrap();
        std::fs::write(paths.store_file(), "{ not json").unwrap();

        let storage = FileStorage::new(&paths).unwrap();
        assert_eq!(storage.get("authToken").unwrap(), None);

        // A write replaces the corrupt file with a valid one.
        storage.set("authToken", "tok").unwrap();
        assert_eq!(storage.get("authToken").unwrap(), Some("tok".to_string()));
    }

    #[test]
    fn test_poisoned_lock_recovers_instead_of_panicking() {
        use std::sync::Arc;

        let dir = tempdir().unwrap();
        let storage = Arc::new(create_storage(&dir));
        storage.set("authToken", "tok").unwrap();

        // Poison the lock from a thread that dies while holding it.
        let poisoner = storage.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock.lock().unwrap();
            panic!("simulated writer crash");
        })
        .join();

        // Reads and writes still work afterwards.
        assert_eq!(storage.get("authToken").unwrap(), Some("tok".to_string()));
        storage.set("userId", "42").unwrap();
        assert_eq!(storage.get("userId").unwrap(), Some("42".to_string()));
    }

    #[test]
    fn test_updated_at_stamped() {
        let dir = tempdir().unwrap();
        let storage = create_storage(&dir);
        storage.set("k", "v").unwrap();

        let content = std::fs::read_to_string(storage.path.clone()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(parsed["updated_at"].is_string());
    }
}
