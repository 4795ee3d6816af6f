//! Atomic key-value store trait for small persisted records.
//!
//! The store holds a handful of small blobs (`userCredentials`,
//! `biometricEnabled`), each replaced wholesale on every write. There is no
//! schema versioning; a missing key is "unset", never an error.

use crate::StoreResult;

/// Atomic storage for small named blobs.
///
/// Writes MUST be atomic with respect to crashes: after a failed write the
/// key holds either the complete old value or the complete new value, never
/// a partial one. Durable implementations use the write-to-temp-then-rename
/// pattern; in-memory implementations are trivially atomic.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error only for backend failures, never for a missing key.
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Atomically writes `bytes` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the previous value (if any)
    /// remains intact in that case.
    fn write_atomic(&self, key: &str, bytes: &[u8]) -> StoreResult<()>;

    /// Deletes the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `Ok(())` even if the key does not exist; only actual backend
    /// failures are reported.
    fn delete(&self, key: &str) -> StoreResult<()>;

    /// Checks whether `key` holds a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying read fails.
    fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.read(key)?.is_some())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).read(key)
    }

    fn write_atomic(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        (**self).write_atomic(key, bytes)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).read(key)
    }

    fn write_atomic(&self, key: &str, bytes: &[u8]) -> StoreResult<()> {
        (**self).write_atomic(key, bytes)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }
}
