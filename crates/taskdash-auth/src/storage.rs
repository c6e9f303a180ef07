use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Key under which the bearer token is persisted
pub const TOKEN_KEY: &str = "token";

/// File-backed string key/value store.
///
/// Every read goes to disk so callers always observe the latest persisted
/// state. Writes are serialized through a lock.
#[derive(Debug)]
pub struct LocalStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a value; a missing file behaves like an empty store
    pub fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    pub fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items)?;
        tracing::debug!("Stored key {} in {}", key, self.path.display());
        Ok(())
    }

    pub fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock();
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
            tracing::debug!("Removed key {} from {}", key, self.path.display());
        }
        Ok(())
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let json = fs::read_to_string(&self.path)?;
        if json.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&json)?)
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
