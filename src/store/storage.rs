use super::StoreError;
use async_trait::async_trait;
use log::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable key-value storage for serialized state.
///
#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns the value stored under the key, or None if nothing was ever
    /// written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the value stored under the key.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Stores each key as a JSON file inside a directory.
///
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the file backing the key. Characters outside
    /// `[A-Za-z0-9_-]` are replaced so any key maps to a plain file name.
    ///
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No stored data at {}", path.display());
                Ok(None)
            }
            Err(e) => Err(StoreError::ReadFailed { path, source: e }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::WriteFailed {
                path: self.dir.clone(),
                source: e,
            })?;

        // Write beside the target and rename so a crash never leaves a
        // truncated list behind.
        let staging = path.with_extension("json.tmp");
        tokio::fs::write(&staging, value)
            .await
            .map_err(|e| StoreError::WriteFailed {
                path: staging.clone(),
                source: e,
            })?;
        tokio::fs::rename(&staging, &path)
            .await
            .map_err(|e| StoreError::WriteFailed {
                path: path.clone(),
                source: e,
            })?;
        debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

/// In-memory storage, used in tests.
///
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Storage whose writes always fail.
    ///
    pub fn read_only() -> Self {
        MemoryStorage {
            read_only: true,
            ..MemoryStorage::default()
        }
    }

    /// Seed a raw value, bypassing any encoding.
    ///
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        self
    }

    /// Returns the raw value under the key.
    ///
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.read_only {
            return Err(StoreError::Unavailable("storage is read-only".to_string()));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("frc-scout-test-{}", Uuid::new_v4()))
    }

    #[test]
    fn path_for_sanitizes_keys() {
        let storage = FileStorage::new("/data");
        assert_eq!(
            storage.path_for("@frcScoutingApp:submittedForms"),
            PathBuf::from("/data/_frcScoutingApp_submittedForms.json")
        );
        assert_eq!(
            storage.path_for("submitted_forms"),
            PathBuf::from("/data/submitted_forms.json")
        );
    }

    #[tokio::test]
    async fn file_storage_missing_key_is_none() {
        let storage = FileStorage::new(temp_dir());
        assert!(storage.get("submitted_forms").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_storage_round_trip_creates_directory() {
        let dir = temp_dir();
        let storage = FileStorage::new(&dir);
        storage.set("submitted_forms", "[]").await.unwrap();
        assert_eq!(
            storage.get("submitted_forms").await.unwrap().as_deref(),
            Some("[]")
        );
        storage.set("submitted_forms", "[{}]").await.unwrap();
        assert_eq!(
            storage.get("submitted_forms").await.unwrap().as_deref(),
            Some("[{}]")
        );
        assert!(!storage.path_for("submitted_forms").with_extension("json.tmp").exists());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn memory_storage_read_only_rejects_writes() {
        let storage = MemoryStorage::read_only().with_entry("k", "v");
        assert!(storage.set("k", "w").await.is_err());
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
