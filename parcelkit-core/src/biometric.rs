//! Biometric sensor capability trait.
//!
//! The sensor is a platform capability (Face ID, fingerprint reader)
//! injected by the mobile shell. The core consumes it purely as a yes/no
//! oracle: a positive [`BiometricOutcome`] gates the guard handover and the
//! session's biometric re-login, nothing more.

use std::sync::Mutex;

/// Biometric modalities a sensor may support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BiometricKind {
    /// Fingerprint reader.
    Fingerprint,
    /// Face recognition.
    Face,
    /// Iris scanner.
    Iris,
}

/// Result of a biometric authentication attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiometricOutcome {
    /// Whether the scan matched.
    pub success: bool,
}

impl BiometricOutcome {
    /// A matching scan.
    #[must_use]
    pub const fn success() -> Self {
        Self { success: true }
    }

    /// A failed or dismissed scan.
    #[must_use]
    pub const fn failure() -> Self {
        Self { success: false }
    }
}

/// Platform biometric sensor.
///
/// Implemented by the shell over the OS biometric APIs. `authenticate` may
/// take arbitrary time (the simulated scan in the prototype runs ~2s); a
/// user dismissing the prompt surfaces as a failed outcome with no side
/// effects.
pub trait BiometricSensor: Send + Sync {
    /// Whether the device has biometric hardware at all.
    fn has_hardware(&self) -> bool;

    /// Whether the user has enrolled at least one biometric.
    fn is_enrolled(&self) -> bool;

    /// The modalities this sensor supports.
    fn supported_types(&self) -> Vec<BiometricKind>;

    /// Runs one authentication attempt, showing `prompt` to the user.
    fn authenticate(&self, prompt: &str) -> BiometricOutcome;
}

/// Configurable in-memory sensor for tests and the UI prototype.
#[derive(Debug)]
pub struct MemorySensor {
    enrolled: bool,
    matches: bool,
    prompts: Mutex<Vec<String>>,
}

impl MemorySensor {
    /// A sensor that is enrolled and always matches.
    #[must_use]
    pub const fn matching() -> Self {
        Self {
            enrolled: true,
            matches: true,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A sensor that is enrolled but never matches.
    #[must_use]
    pub const fn rejecting() -> Self {
        Self {
            enrolled: true,
            matches: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A sensor with no enrolled biometrics.
    #[must_use]
    pub const fn unenrolled() -> Self {
        Self {
            enrolled: false,
            matches: false,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts shown so far, for assertions.
    ///
    /// # Panics
    ///
    /// Panics if the inner lock is poisoned.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl BiometricSensor for MemorySensor {
    fn has_hardware(&self) -> bool {
        true
    }

    fn is_enrolled(&self) -> bool {
        self.enrolled
    }

    fn supported_types(&self) -> Vec<BiometricKind> {
        vec![BiometricKind::Fingerprint]
    }

    fn authenticate(&self, prompt: &str) -> BiometricOutcome {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        if self.enrolled && self.matches {
            BiometricOutcome::success()
        } else {
            BiometricOutcome::failure()
        }
    }
}
