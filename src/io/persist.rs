use std::cell::RefCell;
use std::rc::Rc;

use tracing::{error, warn};

use crate::model::Hierarchy;
use crate::ops::ChangeSink;

use super::kv::{KvStore, StorageError};

/// Why a stored hierarchy was rejected
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("id {0} appears more than once")]
    DuplicateId(String),
}

/// Load the hierarchy stored under `key`. Absent, unreadable or
/// inconsistent data gives an empty hierarchy; it is never fatal.
pub fn load_hierarchy(kv: &KvStore, key: &str) -> Hierarchy {
    let raw = match kv.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Hierarchy::default(),
        Err(e) => {
            warn!(error = %e, "store unreadable; starting empty");
            return Hierarchy::default();
        }
    };
    parse_hierarchy(&raw).unwrap_or_else(|e| {
        warn!(key, error = %e, "stored hierarchy malformed; starting empty");
        Hierarchy::default()
    })
}

/// The stored form is the JSON array of items. Every id must be unique
/// within its tier, sub ids across all items.
pub fn parse_hierarchy(raw: &str) -> Result<Hierarchy, LoadError> {
    let hierarchy: Hierarchy = serde_json::from_str(raw)?;
    if let Some(id) = hierarchy.duplicate_id() {
        return Err(LoadError::DuplicateId(id.to_string()));
    }
    Ok(hierarchy)
}

pub fn save_hierarchy(kv: &KvStore, key: &str, hierarchy: &Hierarchy) -> Result<(), StorageError> {
    let raw = serde_json::to_string(hierarchy)?;
    kv.set(key, &raw)
}

/// Shared view of the most recent failed save, cleared by the next success
#[derive(Debug, Clone, Default)]
pub struct SaveStatus(Rc<RefCell<Option<String>>>);

impl SaveStatus {
    pub fn last_error(&self) -> Option<String> {
        self.0.borrow().clone()
    }

    fn set(&self, error: Option<String>) {
        *self.0.borrow_mut() = error;
    }
}

/// Writes the hierarchy to the key-value store on every change
pub struct PersistSink {
    kv: KvStore,
    key: String,
    status: SaveStatus,
}

impl PersistSink {
    pub fn new(kv: KvStore, key: impl Into<String>) -> Self {
        PersistSink {
            kv,
            key: key.into(),
            status: SaveStatus::default(),
        }
    }

    /// Handle that keeps reporting after the sink is boxed into a store
    pub fn status(&self) -> SaveStatus {
        self.status.clone()
    }
}

impl ChangeSink for PersistSink {
    fn state_changed(&mut self, hierarchy: &Hierarchy) {
        match save_hierarchy(&self.kv, &self.key, hierarchy) {
            Ok(()) => self.status.set(None),
            Err(e) => {
                error!(error = %e, "could not save hierarchy");
                self.status.set(Some(e.to_string()));
            }
        }
    }
}
