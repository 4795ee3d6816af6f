use thiserror::Error;

/// Authentication failures surfaced to the login/signup screens.
///
/// None of these are fatal: the application stays interactive and the user
/// may re-submit the form. Persistence failures are deliberately absent:
/// they are caught at the [`crate::Session`] boundary and only logged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Student credentials did not match exactly (id + password + role).
    #[error("invalid_credentials")]
    InvalidCredentials,
    /// No matching identity, and walk-up enrollment was not possible.
    #[error("user_not_found")]
    NotFound,
    /// Signup collided with an existing identity's email or id.
    #[error("already_exists")]
    AlreadyExists,
    /// The biometric sensor rejected or could not perform the match.
    #[error("biometric_failed")]
    BiometricFailed,
}

/// Failures mutating the package ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Deposit target does not resolve to a known student identity.
    #[error("unknown_student: {name} ({id})")]
    UnknownStudent {
        /// The student name the delivery partner entered.
        name: String,
        /// The student id the delivery partner entered.
        id: String,
    },
    /// No `stored` package with the requested id exists.
    ///
    /// Also raised on a second collect of the same package, which is the
    /// double-collection protection.
    #[error("package_not_found")]
    PackageNotFound,
}

/// Failures in the guard verification flow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardFlowError {
    /// No stored package matches the entered OTP (and preselection, if any).
    #[error("invalid_otp")]
    InvalidOtp,
    /// The biometric confirmation failed or was dismissed.
    #[error("biometric_failed")]
    BiometricFailed,
    /// The flow is not holding a verified package.
    #[error("no_pending_verification")]
    NoPendingVerification,
    /// The underlying ledger mutation failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
