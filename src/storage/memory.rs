//! In-memory storage backend
//!
//! Volatile; contents are lost when the handle is dropped. Used by tests and by
//! callers that want an isolated, throwaway storage partition.

use std::collections::HashMap;
use std::sync::RwLock;

use super::backend::KeyValueStorage;
use super::validation::validate_key;
use crate::error::StorageError;

/// Key-value storage held in a process-local map
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned(key: &str) -> StorageError {
    StorageError::Poisoned(key.to_string())
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let entries = self.entries.read().map_err(|_| poisoned(key))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut entries = self.entries.write().map_err(|_| poisoned(key))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut entries = self.entries.write().map_err(|_| poisoned(key))?;
        entries.remove(key);
        Ok(())
    }

    fn compare_and_swap(
        &self,
        key: &str,
        expected: Option<&str>,
        new: &str,
    ) -> Result<bool, StorageError> {
        validate_key(key)?;
        let mut entries = self.entries.write().map_err(|_| poisoned(key))?;
        if entries.get(key).map(String::as_str) != expected {
            return Ok(false);
        }
        entries.insert(key.to_string(), new.to_string());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("users").unwrap(), None);

        storage.set("users", "[]").unwrap();
        assert_eq!(storage.get("users").unwrap().as_deref(), Some("[]"));

        storage.remove("users").unwrap();
        assert_eq!(storage.get("users").unwrap(), None);
        // second remove is a no-op
        storage.remove("users").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_compare_and_swap() {
        let storage = MemoryStorage::new();

        assert!(storage.compare_and_swap("users", None, "[1]").unwrap());
        assert!(!storage.compare_and_swap("users", None, "[2]").unwrap());
        assert!(!storage.compare_and_swap("users", Some("[0]"), "[2]").unwrap());
        assert_eq!(storage.get("users").unwrap().as_deref(), Some("[1]"));

        assert!(storage.compare_and_swap("users", Some("[1]"), "[2]").unwrap());
        assert_eq!(storage.get("users").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn test_rejects_invalid_key() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            storage.set("../users", "[]"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
