use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::warn;

use super::lock::{LockError, StoreLock};

pub const STORE_FILE: &str = "store.json";

/// Error type for key-value store operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed store file {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize value: {0}")]
    SerializeError(#[from] serde_json::Error),
    #[error(transparent)]
    LockError(#[from] LockError),
}

/// String-keyed, string-valued store kept as one JSON object in
/// `store.json` under a directory.
#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    /// Open (creating the directory if needed)
    pub fn open(dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(dir).map_err(|e| StorageError::WriteError {
            path: dir.to_path_buf(),
            source: e,
        })?;
        Ok(KvStore {
            dir: dir.to_path_buf(),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STORE_FILE)
    }

    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut map = self.read_map()?;
        Ok(map.remove(key))
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _lock = StoreLock::acquire_default(&self.dir)?;
        let mut map = self.read_map_or_empty();
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let path = self.path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::ReadError { path, source: e }),
        };
        serde_json::from_str(&text).map_err(|e| StorageError::Malformed { path, source: e })
    }

    /// A corrupt file is overwritten rather than blocking every later write
    fn read_map_or_empty(&self) -> BTreeMap<String, String> {
        self.read_map().unwrap_or_else(|e| {
            warn!(error = %e, "discarding unreadable store contents");
            BTreeMap::new()
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let path = self.path();
        let content = serde_json::to_string_pretty(map)?;
        let write_err = |e: std::io::Error| StorageError::WriteError {
            path: path.clone(),
            source: e,
        };
        let mut tmp = NamedTempFile::new_in(&self.dir).map_err(write_err)?;
        tmp.write_all(content.as_bytes()).map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}
