//! Key-value persistence
//!
//! Backends:
//! - `MemoryStorage`: in-process, shared between clones
//! - `JsonFileStorage`: a JSON object on disk (native only)
//! - `LocalStorage`: browser LocalStorage (WASM only)

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStorage;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

/// Failed storage operation
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write '{key}': {reason}")]
    Write { key: String, reason: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// String slots addressed by name
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory storage. Clones share the same slots, so a clone handed to a
/// new session sees what an earlier session wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_clones_share_slots() {
        let mut a = MemoryStorage::new();
        let b = a.clone();
        assert!(b.is_empty());

        a.set("k", "v").unwrap();
        assert_eq!(b.get("k").as_deref(), Some("v"));

        a.set("k", "w").unwrap();
        assert_eq!(b.get("k").as_deref(), Some("w"));
        assert_eq!(b.get("missing"), None);
    }

    #[test]
    fn test_boxed_storage_delegates() {
        let shared = MemoryStorage::new();
        let mut boxed: Box<dyn Storage> = Box::new(shared.clone());
        boxed.set("k", "1").unwrap();
        assert_eq!(shared.get("k").as_deref(), Some("1"));
        assert_eq!(boxed.get("k").as_deref(), Some("1"));
    }
}
