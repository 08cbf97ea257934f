//! Persistent string key/value storage.
//!
//! The hub's caches sit on top of a [`Storage`] backend with the semantics of
//! browser local storage: string keys, string values, a size quota, and no
//! expiry of its own. Two backends are provided:
//!
//! - [`FileStorage`]: one JSON record per key under the cache directory. File
//!   names are the md5 of the key so arbitrary search text is safe to store.
//! - [`MemoryStorage`]: an in-process map used by tests.
//!
//! All access happens from a single thread; backends take `&self` so that the
//! response cache and the body cache can share one instance through `Rc`.

use crate::core::error::StorageError;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Browser local storage holds roughly this much per origin.
pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
    fn keys(&self) -> Result<Vec<String>, StorageError>;
}

impl<T: Storage + ?Sized> Storage for Rc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        (**self).keys()
    }
}

#[derive(Serialize, Deserialize)]
struct StoredRecord {
    key: String,
    value: String,
}

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
    quota: u64,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_quota(dir, DEFAULT_QUOTA_BYTES)
    }

    pub fn with_quota(dir: impl Into<PathBuf>, quota: u64) -> Self {
        Self {
            dir: dir.into(),
            quota,
        }
    }

    fn record_path(&self, key: &str) -> PathBuf {
        let hash = format!("{:x}", md5::compute(key.as_bytes()));
        self.dir.join(format!("{hash}.json"))
    }

    fn record_files(&self) -> Result<Vec<PathBuf>, StorageError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| StorageError::io(&self.dir, e))?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                files.push(path);
            }
        }
        Ok(files)
    }

    fn used_bytes_excluding(&self, skip: &Path) -> Result<u64, StorageError> {
        let mut used = 0;
        for path in self.record_files()? {
            if path == skip {
                continue;
            }
            used += fs::metadata(&path)
                .map_err(|e| StorageError::io(&path, e))?
                .len();
        }
        Ok(used)
    }

    fn read_record(path: &Path) -> Result<StoredRecord, StorageError> {
        let content = fs::read_to_string(path).map_err(|e| StorageError::io(path, e))?;
        serde_json::from_str(&content).map_err(|e| StorageError::malformed(path, e))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let record = Self::read_record(&path)?;
        if record.key != key {
            log::warn!("Storage record {} belongs to another key", path.display());
            return Ok(None);
        }
        Ok(Some(record.value))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.record_path(key);
        let record = serde_json::to_string(&StoredRecord {
            key: key.to_string(),
            value: value.to_string(),
        })
        .map_err(|e| StorageError::malformed(&path, e))?;

        let used = self.used_bytes_excluding(&path)? + record.len() as u64;
        if used > self.quota {
            return Err(StorageError::QuotaExceeded {
                used,
                quota: self.quota,
            });
        }

        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        // Readers only ever see complete records.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, record).map_err(|e| StorageError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::io(&path, e))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.record_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(&path, e)),
        }
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        for path in self.record_files()? {
            match Self::read_record(&path) {
                Ok(record) => keys.push(record.key),
                Err(e) => log::warn!("Skipping unreadable storage record: {e}"),
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// In-memory backend. Quota and availability can be tuned to exercise the
/// caches' failure handling.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<BTreeMap<String, String>>,
    quota: Option<u64>,
    unavailable: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: u64) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    fn check_available(&self) -> Result<(), StorageError> {
        if self.unavailable.get() {
            Err(StorageError::unavailable("storage disabled"))
        } else {
            Ok(())
        }
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check_available()?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_available()?;

        if let Some(quota) = self.quota {
            let used: u64 = self
                .items
                .borrow()
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| (k.len() + v.len()) as u64)
                .sum::<u64>()
                + (key.len() + value.len()) as u64;
            if used > quota {
                return Err(StorageError::QuotaExceeded { used, quota });
            }
        }

        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.check_available()?;
        self.items.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.check_available()?;
        Ok(self.items.borrow().keys().cloned().collect())
    }
}
