//! The guard verification flow: OTP match, then biometric-gated handover.

use crate::{
    BiometricOutcome, GuardFlowError, Otp, Package, PackageId, PackageLedger, PackageStatus,
};

/// State of the guard verification flow.
///
/// `Idle → AwaitingBiometric` on an OTP match, then `Completed` on a
/// successful biometric confirmation or back to `Idle` on failure/cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardFlowState {
    /// No verification in progress.
    Idle,
    /// OTP matched; holding the package until the biometric check resolves.
    AwaitingBiometric(PackageId),
    /// Handover completed for this package.
    Completed(PackageId),
}

/// Drives one guard-side handover at a time.
///
/// The ledger is only mutated inside [`GuardFlow::confirm_biometric`] and
/// only after a positive outcome; every other path leaves it untouched.
#[derive(Debug, Default)]
pub struct GuardFlow {
    state: GuardFlowState,
}

impl Default for GuardFlowState {
    fn default() -> Self {
        Self::Idle
    }
}

impl GuardFlow {
    /// Creates an idle flow.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: GuardFlowState::Idle,
        }
    }

    /// Current flow state.
    #[must_use]
    pub const fn state(&self) -> GuardFlowState {
        self.state
    }

    /// Matches an entered OTP against the stored packages.
    ///
    /// With a preselected package the match requires that exact package to
    /// be stored and carry this OTP. Without one, the first stored package
    /// in ledger order wins; ambiguous OTPs resolve to the oldest match.
    ///
    /// On a match the flow transitions to `AwaitingBiometric`; the ledger
    /// is never mutated here.
    ///
    /// # Errors
    ///
    /// Returns [`GuardFlowError::InvalidOtp`] when nothing matches.
    pub fn verify(
        &mut self,
        ledger: &PackageLedger,
        otp: &Otp,
        preselected: Option<PackageId>,
    ) -> Result<Package, GuardFlowError> {
        let package = match preselected {
            Some(id) => ledger
                .get(id)
                .filter(|p| p.status == PackageStatus::Stored && &p.otp == otp),
            None => ledger.find_stored_by_otp(otp),
        }
        .ok_or(GuardFlowError::InvalidOtp)?;

        self.state = GuardFlowState::AwaitingBiometric(package.id);
        Ok(package.clone())
    }

    /// Resolves the biometric gate for the package held by `verify`.
    ///
    /// A positive outcome collects the package under the given guard
    /// identity and completes the flow. A negative outcome (failed scan or
    /// dismissed prompt) returns the flow to idle without touching the
    /// ledger.
    ///
    /// # Errors
    ///
    /// - [`GuardFlowError::NoPendingVerification`] if no OTP was verified.
    /// - [`GuardFlowError::BiometricFailed`] on a negative outcome.
    /// - [`GuardFlowError::Ledger`] if the held package is no longer
    ///   stored (the flow resets to idle).
    pub fn confirm_biometric(
        &mut self,
        ledger: &mut PackageLedger,
        guard_name: &str,
        guard_id: &str,
        outcome: &BiometricOutcome,
    ) -> Result<Package, GuardFlowError> {
        let GuardFlowState::AwaitingBiometric(package_id) = self.state else {
            return Err(GuardFlowError::NoPendingVerification);
        };
        if !outcome.success {
            log::warn!("biometric check failed for {package_id}");
            self.state = GuardFlowState::Idle;
            return Err(GuardFlowError::BiometricFailed);
        }
        match ledger.collect(package_id, guard_name, guard_id) {
            Ok(package) => {
                self.state = GuardFlowState::Completed(package_id);
                Ok(package)
            }
            Err(e) => {
                self.state = GuardFlowState::Idle;
                Err(e.into())
            }
        }
    }

    /// Abandons a pending verification without side effects.
    ///
    /// No-op outside `AwaitingBiometric`.
    pub fn cancel(&mut self) {
        if matches!(self.state, GuardFlowState::AwaitingBiometric(_)) {
            self.state = GuardFlowState::Idle;
        }
    }
}
