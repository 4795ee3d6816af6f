//! The credential vault: persisted login replay data and the biometric flag.

use serde::{Deserialize, Serialize};

use parcelkit_store::{KeyValueStore, StoreError, StoreResult};

use crate::Role;

/// Storage key for the last successful login's credentials.
pub const CREDENTIALS_KEY: &str = "userCredentials";

/// Storage key for the biometric-enabled flag.
pub const BIOMETRIC_FLAG_KEY: &str = "biometricEnabled";

/// The tuple persisted after every successful login, used solely to replay
/// that login after a biometric match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCredentials {
    /// The identifier the user logged in with.
    pub identifier: String,
    /// Plaintext password (empty for walk-up enrolled identities).
    pub password: String,
    /// Role the login was made under.
    pub role: Role,
    /// Display name at the time of login.
    pub name: String,
}

/// Persists the most recent login and the biometric preference through an
/// opaque [`KeyValueStore`].
///
/// Every method reports backend failures as `Result`, but callers in the
/// core treat them as non-fatal: a vault error degrades to "behaves as if
/// nothing were saved" and never aborts a login.
#[derive(Debug)]
pub struct CredentialVault<S> {
    store: S,
}

impl<S: KeyValueStore> CredentialVault<S> {
    /// Wraps a storage backend.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Persists `credentials`, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the backend write fails.
    pub fn save(&self, credentials: &SavedCredentials) -> StoreResult<()> {
        let bytes = serde_json::to_vec(credentials)
            .map_err(|e| StoreError::serialization(e.to_string()))?;
        self.store.write_atomic(CREDENTIALS_KEY, &bytes)
    }

    /// Loads the most recently saved credentials.
    ///
    /// Returns `Ok(None)` when nothing was ever saved. A record that no
    /// longer decodes is treated the same way (logged, not surfaced).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend read fails.
    pub fn load(&self) -> StoreResult<Option<SavedCredentials>> {
        let Some(bytes) = self.store.read(CREDENTIALS_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_slice(&bytes) {
            Ok(credentials) => Ok(Some(credentials)),
            Err(e) => {
                log::warn!("discarding undecodable saved credentials: {e}");
                Ok(None)
            }
        }
    }

    /// Whether biometric login is enabled.
    ///
    /// Defaults to `true` on first run; thereafter returns the last
    /// persisted value. Backend failures degrade to the default.
    #[must_use]
    pub fn is_biometric_enabled(&self) -> bool {
        match self.store.read(BIOMETRIC_FLAG_KEY) {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or(true),
            Ok(None) => true,
            Err(e) => {
                log::warn!("failed to read {BIOMETRIC_FLAG_KEY}: {e}");
                true
            }
        }
    }

    /// Persists the biometric flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn set_biometric_enabled(&self, enabled: bool) -> StoreResult<()> {
        let bytes = serde_json::to_vec(&enabled)
            .map_err(|e| StoreError::serialization(e.to_string()))?;
        self.store.write_atomic(BIOMETRIC_FLAG_KEY, &bytes)
    }

    /// Flips and persists the biometric flag, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails; the flag is unchanged
    /// in that case.
    pub fn toggle_biometric(&self) -> StoreResult<bool> {
        let next = !self.is_biometric_enabled();
        self.set_biometric_enabled(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parcelkit_store::MemoryStore;

    fn saved() -> SavedCredentials {
        SavedCredentials {
            identifier: "S123".to_string(),
            password: "123".to_string(),
            role: Role::Student,
            name: "Isha Singh".to_string(),
        }
    }

    #[test]
    fn test_load_without_save_is_none() {
        let vault = CredentialVault::new(MemoryStore::new());
        assert!(vault.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let vault = CredentialVault::new(MemoryStore::new());
        vault.save(&saved()).unwrap();
        assert_eq!(vault.load().unwrap(), Some(saved()));
    }

    #[test]
    fn test_save_overwrites() {
        let vault = CredentialVault::new(MemoryStore::new());
        vault.save(&saved()).unwrap();

        let mut newer = saved();
        newer.identifier = "G789".to_string();
        newer.role = Role::Guard;
        vault.save(&newer).unwrap();

        assert_eq!(vault.load().unwrap(), Some(newer));
    }

    #[test]
    fn test_corrupt_record_reads_as_none() {
        let store = MemoryStore::new();
        store.write_atomic(CREDENTIALS_KEY, b"not json").unwrap();
        let vault = CredentialVault::new(store);
        assert!(vault.load().unwrap().is_none());
    }

    #[test]
    fn test_biometric_flag_defaults_true() {
        let vault = CredentialVault::new(MemoryStore::new());
        assert!(vault.is_biometric_enabled());
    }

    #[test]
    fn test_toggle_persists() {
        let vault = CredentialVault::new(MemoryStore::new());
        assert!(!vault.toggle_biometric().unwrap());
        assert!(!vault.is_biometric_enabled());
        assert!(vault.toggle_biometric().unwrap());
        assert!(vault.is_biometric_enabled());
    }

    #[test]
    fn test_persisted_format_is_json() {
        let store = MemoryStore::new();
        {
            let vault = CredentialVault::new(&store);
            vault.save(&saved()).unwrap();
            vault.set_biometric_enabled(false).unwrap();
        }
        let raw = store.read(CREDENTIALS_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(json["role"], "student");
        assert_eq!(json["identifier"], "S123");

        let raw = store.read(BIOMETRIC_FLAG_KEY).unwrap().unwrap();
        assert_eq!(raw, b"false");
    }
}
