use crate::store::{Timer, TimerStore};
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

/// Key under which the timer collection is stored.
pub const TIMERS_KEY: &str = "timers";

/// A string-keyed JSON store kept in a single file.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }
        let content = fs::read_to_string(&self.path).context("Failed to read storage file")?;

        // Handle empty file case
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content).context("Failed to parse storage JSON")
    }

    fn write_all(&self, items: &Map<String, Value>) -> Result<()> {
        let content = serde_json::to_string_pretty(items).context("Failed to serialize storage")?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to a temp file then rename so a crash never leaves half a file
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, content)?;
        fs::rename(&temp_path, &self.path)?;

        Ok(())
    }

    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.read_all()?.remove(key) {
            Some(value) => {
                let item = serde_json::from_value(value)
                    .with_context(|| format!("Failed to decode storage key '{}'", key))?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    pub fn set_item<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let mut items = self.read_all()?;
        let value = serde_json::to_value(value)
            .with_context(|| format!("Failed to encode storage key '{}'", key))?;
        items.insert(key.to_string(), value);
        self.write_all(&items)
    }

    pub fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.read_all()?;
        if items.remove(key).is_some() {
            self.write_all(&items)?;
        }
        Ok(())
    }
}

pub fn load_timers(storage: &LocalStorage) -> Result<TimerStore> {
    let timers: Vec<Timer> = storage.get_item(TIMERS_KEY)?.unwrap_or_default();
    Ok(TimerStore::new(timers))
}

pub fn save_timers(storage: &LocalStorage, store: &TimerStore) -> Result<()> {
    storage.set_item(TIMERS_KEY, &store.timers())
}

/// Best-effort snapshot of the collection. Failures are logged and dropped.
pub fn mirror_timers(storage: &LocalStorage, store: &TimerStore) {
    if let Err(err) = save_timers(storage, store) {
        tracing::error!(
            path = %storage.path().display(),
            "Failed to save timers to local storage: {:#}",
            err
        );
    }
}

/// Exclusive hold on the storage lock file, released on drop.
pub struct StoreLock {
    file: File,
}

impl StoreLock {
    /// Block until no other process holds the lock.
    pub fn acquire(lock_path: &Path) -> Result<Self> {
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(lock_path)
            .with_context(|| format!("Failed to open lock file {}", lock_path.display()))?;
        file.lock_exclusive().context("Failed to lock timer storage")?;
        Ok(Self { file })
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Err(err) = self.file.unlock() {
            tracing::debug!("Failed to release storage lock: {}", err);
        }
    }
}

/// Load the timers, apply `f`, and save them back only if `f` succeeds, all
/// while holding the storage lock.
pub fn with_store_lock<F, R>(lock_path: &Path, storage: &LocalStorage, f: F) -> Result<R>
where
    F: FnOnce(&mut TimerStore) -> Result<R>,
{
    let _lock = StoreLock::acquire(lock_path)?;
    let mut store = load_timers(storage)?;
    let value = f(&mut store)?;
    save_timers(storage, &store)?;
    Ok(value)
}
