//! Persistence of the entry list and results log.
//!
//! State lives in a tiny key-value store holding JSON arrays under two keys,
//! `list` and `results`. The file-backed store keeps one `<key>.json` file per
//! key in the data directory; tests use the in-memory store.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::entries::{default_entries, Entry, EntryList};
use crate::results::{ResultLog, SpinResult};

/// Key holding the serialized entry list.
pub const LIST_KEY: &str = "list";
/// Key holding the serialized results log.
pub const RESULTS_KEY: &str = "results";

/// Errors raised while reading or writing stored state.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data directory could not be created.
    #[error("failed to create data directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A stored value could not be read.
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A value could not be written.
    #[error("failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// State could not be serialized.
    #[error("failed to serialize {key}")]
    Serialize {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Minimal string key-value storage.
pub trait KeyValueStore {
    /// Returns the raw value for `key`, or `None` if nothing was stored.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    /// Replaces the value for `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Stores each key as `<dir>/<key>.json`.
///
/// Values are written to a temporary file in the same directory and renamed
/// over the target, so an interrupted save leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StoreError::CreateDir {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Read { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match write_atomic(&self.dir, &path, value) {
            Ok(()) => Ok(()),
            Err(source) => Err(StoreError::Write { path, source }),
        }
    }
}

fn write_atomic(dir: &Path, path: &Path, value: &str) -> io::Result<()> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(value.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// In-memory store, used by tests and as a scratch backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Loads the entry list.
///
/// Anything other than a non-empty, well-formed array (missing key, `[]`,
/// malformed JSON) yields the default sample list.
pub fn load_entries(store: &dyn KeyValueStore) -> Result<EntryList, StoreError> {
    let Some(raw) = store.get(LIST_KEY)? else {
        tracing::debug!("no stored list, using defaults");
        return Ok(EntryList::new(default_entries()));
    };

    match serde_json::from_str::<Vec<Entry>>(&raw) {
        Ok(entries) if entries.is_empty() => {
            tracing::debug!("stored list is empty, using defaults");
            Ok(EntryList::new(default_entries()))
        }
        Ok(entries) => Ok(EntryList::new(entries)),
        Err(err) => {
            tracing::warn!(error = %err, "stored list is malformed, using defaults");
            Ok(EntryList::new(default_entries()))
        }
    }
}

/// Loads the results log; missing or malformed data yields an empty log.
pub fn load_results(store: &dyn KeyValueStore) -> Result<ResultLog, StoreError> {
    let Some(raw) = store.get(RESULTS_KEY)? else {
        return Ok(ResultLog::default());
    };

    match serde_json::from_str::<Vec<SpinResult>>(&raw) {
        Ok(results) => Ok(ResultLog::new(results)),
        Err(err) => {
            tracing::warn!(error = %err, "stored results are malformed, starting empty");
            Ok(ResultLog::default())
        }
    }
}

pub fn save_entries(store: &mut dyn KeyValueStore, entries: &EntryList) -> Result<(), StoreError> {
    let json = serde_json::to_string(entries.entries()).map_err(|source| StoreError::Serialize {
        key: LIST_KEY,
        source,
    })?;
    store.set(LIST_KEY, &json)
}

pub fn save_results(store: &mut dyn KeyValueStore, results: &ResultLog) -> Result<(), StoreError> {
    let json = serde_json::to_string(results.results()).map_err(|source| StoreError::Serialize {
        key: RESULTS_KEY,
        source,
    })?;
    store.set(RESULTS_KEY, &json)
}
