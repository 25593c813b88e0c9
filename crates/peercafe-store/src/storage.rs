//! # Storage Medium
//!
//! Client-side key-value storage the cart survives reloads in.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     KeyValueStorage (trait)                             │
//! │          get_item(key) • set_item(key, value) • remove_item(key)        │
//! │                                                                         │
//! │   ┌────────────────────────┐          ┌────────────────────────────┐   │
//! │   │     MemoryStorage      │          │        FileStorage         │   │
//! │   │  HashMap + byte quota  │          │  <dir>/<key>.json per key  │   │
//! │   │  (tests, embedding)    │          │  (peercafe-cart binary)    │   │
//! │   └────────────────────────┘          └────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Values are opaque strings; encoding them is the store's job.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::error::{StorageError, StorageResult};

// =============================================================================
// Trait
// =============================================================================

/// A string key-value storage medium.
pub trait KeyValueStorage {
    /// Reads a value. `Ok(None)` if the key was never written or was removed.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes a value, replacing any previous one.
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes a key. Removing a missing key is not an error.
    fn remove_item(&mut self, key: &str) -> StorageResult<()>;
}

// =============================================================================
// Memory Storage
// =============================================================================

/// In-process storage with an optional size limit.
///
/// The limit counts key and value bytes across all entries, like a browser
/// storage quota.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    /// Storage that rejects writes once `quota_bytes` would be exceeded.
    pub fn with_quota(quota_bytes: usize) -> Self {
        MemoryStorage {
            entries: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Bytes currently used (keys + values).
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(limit) = self.quota_bytes {
            let replaced = self.entries.get(key).map_or(0, |old| key.len() + old.len());
            let needed = self.used_bytes() - replaced + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// File Storage
// =============================================================================

/// One file per key inside a directory.
///
/// ## Layout
/// ```text
/// <dir>/
/// ├── peerCafeCart.json
/// └── peerCafeCartRestaurant.json
/// ```
///
/// Writes go to a temporary file first and are renamed into place, so a
/// crash mid-write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Uses `dir` for storage. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(key, e))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| StorageError::io(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::io(key, e))?;

        trace!(?path, bytes = value.len(), "Wrote storage entry");
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(key, e)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
