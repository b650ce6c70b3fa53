use std::{collections::HashMap, fs, path::PathBuf, sync::Mutex};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

use super::KeyValueStore;

const CURRENT_VERSION: u32 = 1;

/// [`KeyValueStore`] persisted as a pretty-printed JSON file.
///
/// The whole file is read and rewritten on every mutation; it only ever
/// holds a handful of refresh timestamps. Writes go to a sibling temp file
/// that is renamed over the target, so readers never see a partial file.
/// An unreadable file is replaced by the next successful mutation.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

#[derive(Serialize, Deserialize, Default)]
struct StoreFile {
    version: u32,
    entries: HashMap<String, String>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn with_store<F>(&self, mut op: F) -> Result<()>
    where
        F: FnMut(&mut HashMap<String, String>),
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Storage("File store lock poisoned".into()))?;
        let mut store = match self.load_store_locked() {
            Ok(store) => store,
            Err(Error::Serialization(err)) => {
                warn!(
                    "Discarding unreadable store {}: {}",
                    self.path.display(),
                    err
                );
                HashMap::new()
            }
            Err(err) => return Err(err),
        };
        op(&mut store);
        self.persist_store_locked(&store)
    }

    fn read_store(&self) -> Result<HashMap<String, String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Storage("File store lock poisoned".into()))?;
        self.load_store_locked()
    }

    fn load_store_locked(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let raw = fs::read(&self.path)?;
        if raw.is_empty() {
            return Ok(HashMap::new());
        }

        let file: StoreFile = serde_json::from_slice(&raw)?;
        if file.version > CURRENT_VERSION {
            return Err(Error::Storage(format!(
                "Unsupported store version {} in {}",
                file.version,
                self.path.display()
            )));
        }
        Ok(file.entries)
    }

    fn persist_store_locked(&self, store: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = StoreFile {
            version: CURRENT_VERSION,
            entries: store.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        let tmp_path = self.temp_path();
        fs::write(&tmp_path, json)?;
        if let Err(err) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(err.into());
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "store".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let store = self.read_store()?;
        Ok(store.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.with_store(|store| {
            store.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.with_store(|store| {
            store.remove(key);
        })
    }
}
