//! Snapshot persistence over a key-value storage
//!
//! Features:
//! - Flat JSON snapshot per game under a fixed key
//! - No versioning: a snapshot that no longer decodes is discarded
//! - `LocalStorage` on the web, `MemoryStorage` for native runs and tests

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Persistence / configuration failure
#[derive(Debug)]
pub enum PersistError {
    /// Document could not be encoded or decoded
    Json(serde_json::Error),
    /// Backend refused the operation
    Storage(String),
    /// Document decoded but carries unusable values
    Invalid(&'static str),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "json: {e}"),
            Self::Storage(msg) => write!(f, "storage: {msg}"),
            Self::Invalid(msg) => write!(f, "invalid document: {msg}"),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// String key-value storage (the LocalStorage contract)
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), PersistError>;
    fn remove_item(&self, key: &str) -> Result<(), PersistError>;
}

/// In-memory storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), PersistError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    inner: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// The window's LocalStorage, if the browser exposes one
    pub fn open() -> Option<Self> {
        let inner = web_sys::window()?.local_storage().ok()??;
        Some(Self { inner })
    }
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, PersistError> {
        self.inner
            .get_item(key)
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), PersistError> {
        self.inner
            .set_item(key, value)
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }

    fn remove_item(&self, key: &str) -> Result<(), PersistError> {
        self.inner
            .remove_item(key)
            .map_err(|e| PersistError::Storage(format!("{e:?}")))
    }
}

/// Read and decode a snapshot. `Ok(None)` when nothing is stored.
pub fn load_json<T: DeserializeOwned>(
    storage: &dyn Storage,
    key: &str,
) -> Result<Option<T>, PersistError> {
    match storage.get_item(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Encode and write a snapshot
pub fn save_json<T: Serialize>(storage: &dyn Storage, key: &str, value: &T) -> Result<(), PersistError> {
    let json = serde_json::to_string(value)?;
    storage.set_item(key, &json)
}

/// Load a snapshot, discarding (and removing) one that no longer decodes
pub fn load_or_discard<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Option<T> {
    match load_json(storage, key) {
        Ok(Some(value)) => {
            log::info!("Loaded snapshot '{}'", key);
            Some(value)
        }
        Ok(None) => None,
        Err(e) => {
            log::warn!("Discarding snapshot '{}': {}", key, e);
            if let Err(e) = storage.remove_item(key) {
                log::warn!("Failed to remove snapshot '{}': {}", key, e);
            }
            None
        }
    }
}
