//! The session: who is logged in, and under which role.

use parcelkit_store::KeyValueStore;

use crate::{
    AuthError, BiometricSensor, CredentialVault, Identity, Role, SavedCredentials,
    UserDirectory, UserKey,
};

/// Prompt shown for the biometric re-login path.
const RELOGIN_PROMPT: &str = "Unlock SecureParcel";

/// Tracks the currently authenticated identity.
///
/// Holds a `(id, role)` lookup key rather than a copy of the record, so
/// directory edits stay visible through the session. The role of the key
/// is the only signal the navigation layer consumes: it decides which of
/// the role dashboards is reachable.
#[derive(Debug)]
pub struct Session {
    current: Option<UserKey>,
    biometric_enabled: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a logged-out session with biometrics enabled (the
    /// first-run default).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: None,
            biometric_enabled: true,
        }
    }

    /// Creates a logged-out session, loading the biometric preference
    /// from the vault (process startup path).
    #[must_use]
    pub fn start<S: KeyValueStore>(vault: &CredentialVault<S>) -> Self {
        Self {
            current: None,
            biometric_enabled: vault.is_biometric_enabled(),
        }
    }

    /// Logs in through the directory and, on success, persists the
    /// credentials for later biometric replay.
    ///
    /// A vault failure is logged and swallowed; persistence is never a
    /// reason to fail an otherwise valid login.
    ///
    /// # Errors
    ///
    /// Propagates [`UserDirectory::login`] failures; the session is left
    /// untouched in that case.
    pub fn login<S: KeyValueStore>(
        &mut self,
        directory: &mut UserDirectory,
        vault: &CredentialVault<S>,
        identifier: &str,
        password: &str,
        role: Role,
        display_name: Option<&str>,
    ) -> Result<Identity, AuthError> {
        let identity = directory.login(identifier, password, role, display_name)?;
        self.current = Some(identity.key());
        if let Err(e) = vault.save(&SavedCredentials {
            identifier: identifier.to_string(),
            password: password.to_string(),
            role,
            name: identity.name.clone(),
        }) {
            log::warn!("could not persist credentials after login: {e}");
        }
        Ok(identity)
    }

    /// Signs up through the directory and auto-logs-in as the new
    /// identity, persisting credentials the same way as [`Self::login`].
    ///
    /// # Errors
    ///
    /// Propagates [`UserDirectory::signup`] failures; the session is left
    /// untouched in that case.
    #[allow(clippy::too_many_arguments)]
    pub fn signup<S: KeyValueStore>(
        &mut self,
        directory: &mut UserDirectory,
        vault: &CredentialVault<S>,
        name: &str,
        id: &str,
        email: &str,
        password: &str,
        role: Role,
        department: Option<String>,
    ) -> Result<Identity, AuthError> {
        let identity = directory.signup(name, id, email, password, role, department)?;
        self.current = Some(identity.key());
        if let Err(e) = vault.save(&SavedCredentials {
            identifier: id.to_string(),
            password: password.to_string(),
            role,
            name: identity.name.clone(),
        }) {
            log::warn!("could not persist credentials after signup: {e}");
        }
        Ok(identity)
    }

    /// Replays the last saved login after a positive biometric match.
    ///
    /// Requires the biometric preference to be on, usable hardware with an
    /// enrolled biometric, and a saved credential record. The saved name is
    /// passed back as the display name so walk-up identities resolve again.
    ///
    /// # Errors
    ///
    /// - [`AuthError::BiometricFailed`] when the preference is off, the
    ///   sensor is unusable, or the scan does not match.
    /// - [`AuthError::NotFound`] when no credentials were ever saved.
    /// - Any [`UserDirectory::login`] failure from the replayed login.
    pub fn login_with_biometric<S: KeyValueStore>(
        &mut self,
        directory: &mut UserDirectory,
        vault: &CredentialVault<S>,
        sensor: &dyn BiometricSensor,
    ) -> Result<Identity, AuthError> {
        if !self.biometric_enabled || !sensor.has_hardware() || !sensor.is_enrolled() {
            return Err(AuthError::BiometricFailed);
        }
        let saved = match vault.load() {
            Ok(Some(saved)) => saved,
            Ok(None) => return Err(AuthError::NotFound),
            Err(e) => {
                log::warn!("could not load saved credentials: {e}");
                return Err(AuthError::NotFound);
            }
        };
        if !sensor.authenticate(RELOGIN_PROMPT).success {
            return Err(AuthError::BiometricFailed);
        }
        self.login(
            directory,
            vault,
            &saved.identifier,
            &saved.password,
            saved.role,
            Some(&saved.name),
        )
    }

    /// Clears the authenticated identity.
    ///
    /// The vault is deliberately left intact: biometric re-login remains
    /// possible after logout, even under a different role than the one
    /// active at logout.
    pub fn logout(&mut self) {
        self.current = None;
    }

    /// The `(id, role)` key of the authenticated identity, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&UserKey> {
        self.current.as_ref()
    }

    /// Role of the authenticated identity, the signal navigation keys off.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(|key| key.role)
    }

    /// Resolves the authenticated identity against the directory.
    #[must_use]
    pub fn current_identity<'a>(&self, directory: &'a UserDirectory) -> Option<&'a Identity> {
        self.current.as_ref().and_then(|key| directory.find(key))
    }

    /// Whether biometric login is currently enabled.
    #[must_use]
    pub const fn is_biometric_enabled(&self) -> bool {
        self.biometric_enabled
    }

    /// Flips the biometric preference and persists it best-effort.
    ///
    /// Returns the new value. A persistence failure is logged; the
    /// in-memory preference flips regardless so the UI stays coherent.
    pub fn toggle_biometric<S: KeyValueStore>(&mut self, vault: &CredentialVault<S>) -> bool {
        self.biometric_enabled = !self.biometric_enabled;
        if let Err(e) = vault.set_biometric_enabled(self.biometric_enabled) {
            log::warn!("could not persist biometric preference: {e}");
        }
        self.biometric_enabled
    }
}
