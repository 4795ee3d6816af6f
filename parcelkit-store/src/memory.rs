//! In-memory key-value store.
//!
//! Backs the UI prototype and the test suites. State lives for the process
//! lifetime only; a "restart" in tests is simulated by sharing the store
//! between two consumers.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::{KeyValueStore, StoreError, StoreResult};

/// In-memory [`KeyValueStore`] backed by a `HashMap`.
///
/// Thread-safe; writes are trivially atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of stored keys.
    ///
    /// # Panics
    ///
    /// Panics if the inner lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Returns `true` if nothing is stored.
    ///
    /// # Panics
    ///
    /// Panics if the inner lock is poisoned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }

    /// Clears all stored keys (useful for test isolation).
    ///
    /// # Panics
    ///
    /// Panics if the inner lock is poisoned.
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::unavailable(format!("lock poisoned: {e}")))?;
        Ok(entries.get(key).cloned())
    }

    fn write_atomic(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::unavailable(format!("lock poisoned: {e}")))?;
        entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::unavailable(format!("lock poisoned: {e}")))?;
        entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_as_none() {
        let store = MemoryStore::new();
        assert!(store.read("userCredentials").unwrap().is_none());
        assert!(!store.exists("userCredentials").unwrap());
    }

    #[test]
    fn test_write_overwrites() {
        let store = MemoryStore::new();
        store.write_atomic("k", b"first").unwrap();
        store.write_atomic("k", b"second").unwrap();
        assert_eq!(store.read("k").unwrap(), Some(b"second".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let store = MemoryStore::new();
        store.write_atomic("k", b"v").unwrap();
        store.delete("k").unwrap();
        store.delete("k").unwrap();
        assert!(store.read("k").unwrap().is_none());
    }

    #[test]
    fn test_thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemoryStore::new());
        let mut handles = vec![];
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                let key = format!("key-{i}");
                store.write_atomic(&key, format!("value-{i}").as_bytes()).unwrap();
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.len(), 8);
    }
}
