//! Key-value storage for the cost tracker record
//!
//! Values are opaque strings (JSON in practice). `JsonFileStore` keeps one
//! file per key; `MemoryStore` is for tests and embedding.

use crate::error::{CoreError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Durable string store addressed by key
pub trait CostStore: Send + Sync {
    /// Raw value for `key`, `None` if absent
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for `key` in a single step
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

impl<S: CostStore + ?Sized> CostStore for Arc<S> {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }
}

/// Stores each key as `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if dir.exists() && !dir.is_dir() {
            return Err(CoreError::InvalidDataDir {
                path: dir,
                reason: "exists but is not a directory".to_string(),
            });
        }
        Ok(Self { dir })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl CostStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(CoreError::StoreRead {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let write_err = |source| CoreError::StoreWrite {
            key: key.to_string(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(write_err)?;

        // Write a sibling then rename over the target so readers never see a partial record
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{}.json.tmp", key));
        std::fs::write(&tmp, value).map_err(write_err)?;
        std::fs::rename(&tmp, &path).map_err(write_err)?;

        tracing::debug!("Wrote {} ({} bytes)", path.display(), value.len());
        Ok(())
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value for `key`, bypassing the trait's `Result`
    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }
}

impl CostStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("nested")).unwrap();

        assert_eq!(store.read("k").unwrap(), None);
        store.write("k", "{\"a\":1}").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(store.path_for("k").exists());
        assert!(!tmp.path().join("nested/.k.json.tmp").exists());

        store.write("k", "{}").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("{}"));
        assert_eq!(store.read("other").unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_file_as_dir() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();

        let err = JsonFileStore::new(&file).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDataDir { .. }));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::new();
        store.write("a", "1").unwrap();
        assert_eq!(store.read("a").unwrap().as_deref(), Some("1"));
        store.write("a", "2").unwrap();
        assert_eq!(store.get("a").as_deref(), Some("2"));
        assert_eq!(store.get("b"), None);
    }
}
