use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use serde_json::{Map, Value};

use super::StorageError;

/// Minimal string key-value persistence.
///
/// Callers treat every error as "value absent" on reads and as "write skipped"
/// on writes; no storage failure is fatal.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

// ── MemoryStore ───────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    unavailable: bool,
    read_only: bool,
}

/// In-process store.
///
/// Clones share the same entries, so a host or test can inspect what an
/// engine wrote. Failures can be injected with
/// [`set_unavailable`](Self::set_unavailable) and [`set_read_only`](Self::set_read_only).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(Rc<RefCell<MemoryInner>>);

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style seed entry.
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.0.borrow_mut().entries.insert(key.to_string(), value.to_string());
        self
    }

    /// Reads and writes both fail while set.
    pub fn set_unavailable(&self, v: bool) {
        self.0.borrow_mut().unavailable = v;
    }

    /// Writes fail while set; reads still succeed.
    pub fn set_read_only(&self, v: bool) {
        self.0.borrow_mut().read_only = v;
    }

    /// Reads an entry bypassing failure injection.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.0.borrow().entries.get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let inner = self.0.borrow();
        if inner.unavailable {
            return Err(StorageError::Unavailable);
        }
        Ok(inner.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut inner = self.0.borrow_mut();
        if inner.unavailable || inner.read_only {
            return Err(StorageError::Unavailable);
        }
        inner.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ── JsonFileStore ─────────────────────────────────────────────────────────

/// Store backed by one JSON object file.
///
/// A missing file is an empty store. Writes replace the file atomically
/// through a sibling temp file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Opens (without reading) the store at `path`, creating parent
    /// directories if needed.
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create store directory {}", parent.display()))?;
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Map<String, Value>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&text)? {
            Value::Object(map) => Ok(map),
            _ => Err(StorageError::NotAnObject),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.load()?;
        Ok(match map.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
            None => None,
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        // A corrupt file is replaced rather than blocking every future write.
        let mut map = match self.load() {
            Ok(map) => map,
            Err(StorageError::Io(e)) => return Err(StorageError::Io(e)),
            Err(e) => {
                log::warn!("discarding unreadable store {}: {e}", self.path.display());
                Map::new()
            }
        };
        map.insert(key.to_string(), Value::String(value.to_string()));

        let text = serde_json::to_string_pretty(&Value::Object(map))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scratch_path(name: &str) -> PathBuf {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        let n = NEXT.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir()
            .join(format!("folio-store-{}-{n}", std::process::id()))
            .join(name)
    }

    // ── MemoryStore ───────────────────────────────────────────────────────

    #[test]
    fn memory_store_round_trips_through_clones() {
        let store = MemoryStore::new();
        let mut writer = store.clone();
        writer.set("theme", "spotify").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("spotify"));
    }

    #[test]
    fn memory_store_unavailable_fails_both_ways() {
        let mut store = MemoryStore::new().with_entry("theme", "apple");
        store.set_unavailable(true);
        assert!(matches!(store.get("theme"), Err(StorageError::Unavailable)));
        assert!(store.set("theme", "spotify").is_err());
        assert_eq!(store.peek("theme").as_deref(), Some("apple"));
    }

    #[test]
    fn memory_store_read_only_still_reads() {
        let mut store = MemoryStore::new().with_entry("theme", "apple");
        store.set_read_only(true);
        assert!(store.set("theme", "spotify").is_err());
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("apple"));
    }

    // ── JsonFileStore ─────────────────────────────────────────────────────

    #[test]
    fn missing_file_is_empty() {
        let store = JsonFileStore::open(scratch_path("prefs.json")).unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let path = scratch_path("prefs.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("theme", "spotify").unwrap();
        store.set("other", "kept").unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("spotify"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("kept"));
    }

    #[test]
    fn corrupt_file_errors_on_read_and_is_replaced_on_write() {
        let path = scratch_path("prefs.json");
        let mut store = JsonFileStore::open(&path).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(store.get("theme"), Err(StorageError::Json(_))));

        store.set("theme", "apple").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("apple"));
    }

    #[test]
    fn non_object_file_is_rejected() {
        let path = scratch_path("prefs.json");
        let store = JsonFileStore::open(&path).unwrap();
        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(store.get("theme"), Err(StorageError::NotAnObject)));
    }
}
