//! The package ledger: deposit, collection, and history.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::util::now_unix;
use crate::{LedgerError, Otp, UserDirectory};

/// Opaque package identifier, ordered by creation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PackageId(u64);

impl PackageId {
    /// The raw creation-ordered value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PKG-{:06}", self.0)
    }
}

/// Lifecycle state of a package.
///
/// The only legal transition is `Stored → Collected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageStatus {
    /// Deposited and waiting in a locker compartment.
    Stored,
    /// Handed over to the student; retained as history.
    Collected,
}

/// A physical parcel deposited into a locker compartment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Creation-ordered identifier.
    pub id: PackageId,
    /// Name of the student the parcel is addressed to.
    pub student_name: String,
    /// Id of the student the parcel is addressed to.
    pub student_id: String,
    /// Courier service that delivered the parcel (free text).
    pub courier: String,
    /// Locker compartment label (free text).
    pub slot: String,
    /// Collection passcode, assigned at deposit and immutable.
    pub otp: Otp,
    /// Unix timestamp of the deposit.
    pub deposited_at: u64,
    /// Current lifecycle state.
    pub status: PackageStatus,
    /// Unix timestamp of the handover, once collected.
    pub collected_at: Option<u64>,
    /// Name of the guard who completed the handover.
    pub guard_name: Option<String>,
    /// Id of the guard who completed the handover.
    pub guard_id: Option<String>,
}

impl Package {
    /// Returns `true` once the package has been handed over.
    #[must_use]
    pub fn is_collected(&self) -> bool {
        self.status == PackageStatus::Collected
    }
}

/// Owns all package records and their lifecycle.
///
/// Records are append-only: a package is created by a delivery partner,
/// mutated exactly once by a guard at handover, and never deleted.
#[derive(Debug)]
pub struct PackageLedger {
    packages: Vec<Package>,
    next_id: u64,
}

impl Default for PackageLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl PackageLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            packages: Vec::new(),
            next_id: 1,
        }
    }

    /// Deposits a new package for a student.
    ///
    /// Generates a fresh 4-digit OTP and stamps the current time. The
    /// `(student_name, student_id)` pair must resolve to a known student in
    /// `directory`; the ledger is untouched otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownStudent`] when the deposit target
    /// fails [`UserDirectory::verify_student`].
    pub fn deposit(
        &mut self,
        directory: &UserDirectory,
        student_name: &str,
        student_id: &str,
        courier: &str,
        slot: &str,
    ) -> Result<Package, LedgerError> {
        self.deposit_at(
            directory,
            student_name,
            student_id,
            courier,
            slot,
            Otp::generate(),
            now_unix(),
        )
    }

    /// Deposit with caller-supplied OTP and timestamp, for deterministic
    /// callers and tests.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::UnknownStudent`] when the deposit target
    /// fails [`UserDirectory::verify_student`].
    #[allow(clippy::too_many_arguments)]
    pub fn deposit_at(
        &mut self,
        directory: &UserDirectory,
        student_name: &str,
        student_id: &str,
        courier: &str,
        slot: &str,
        otp: Otp,
        now: u64,
    ) -> Result<Package, LedgerError> {
        if !directory.verify_student(student_name, student_id) {
            return Err(LedgerError::UnknownStudent {
                name: student_name.to_string(),
                id: student_id.to_string(),
            });
        }
        let package = Package {
            id: PackageId(self.next_id),
            student_name: student_name.to_string(),
            student_id: student_id.to_string(),
            courier: courier.to_string(),
            slot: slot.to_string(),
            otp,
            deposited_at: now,
            status: PackageStatus::Stored,
            collected_at: None,
            guard_name: None,
            guard_id: None,
        };
        self.next_id += 1;
        log::debug!("deposited {} in slot {slot}", package.id);
        self.packages.push(package.clone());
        Ok(package)
    }

    /// Marks a stored package as collected, recording the guard identity
    /// and the handover time.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::PackageNotFound`] when no **stored** package
    /// has this id. A second collect of an already-collected package fails
    /// the same way, which is the double-collection protection.
    pub fn collect(
        &mut self,
        package_id: PackageId,
        guard_name: &str,
        guard_id: &str,
    ) -> Result<Package, LedgerError> {
        self.collect_at(package_id, guard_name, guard_id, now_unix())
    }

    /// Collect with a caller-supplied timestamp.
    ///
    /// # Errors
    ///
    /// Same as [`Self::collect`].
    pub fn collect_at(
        &mut self,
        package_id: PackageId,
        guard_name: &str,
        guard_id: &str,
        now: u64,
    ) -> Result<Package, LedgerError> {
        let package = self
            .packages
            .iter_mut()
            .find(|p| p.id == package_id && p.status == PackageStatus::Stored)
            .ok_or(LedgerError::PackageNotFound)?;
        package.status = PackageStatus::Collected;
        package.collected_at = Some(now);
        package.guard_name = Some(guard_name.to_string());
        package.guard_id = Some(guard_id.to_string());
        log::debug!("collected {} by guard {guard_id}", package.id);
        Ok(package.clone())
    }

    /// Looks up a package by id, regardless of status.
    #[must_use]
    pub fn get(&self, package_id: PackageId) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == package_id)
    }

    /// All packages in the given state, in insertion order.
    #[must_use]
    pub fn list_by_status(&self, status: PackageStatus) -> Vec<&Package> {
        self.packages.iter().filter(|p| p.status == status).collect()
    }

    /// Every package ever deposited for a student, in insertion order.
    #[must_use]
    pub fn list_by_student(&self, student_id: &str) -> Vec<&Package> {
        self.packages
            .iter()
            .filter(|p| p.student_id == student_id)
            .collect()
    }

    /// First stored package matching `otp`, in insertion order.
    ///
    /// Ambiguous OTPs resolve to the oldest match; callers that already
    /// know the target package should match by id instead.
    #[must_use]
    pub fn find_stored_by_otp(&self, otp: &Otp) -> Option<&Package> {
        self.packages
            .iter()
            .find(|p| p.status == PackageStatus::Stored && &p.otp == otp)
    }

    /// Total number of records, collected history included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Returns `true` when nothing has ever been deposited.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (UserDirectory, PackageLedger) {
        (UserDirectory::seeded(), PackageLedger::new())
    }

    #[test]
    fn test_deposit_for_known_student() {
        let (directory, mut ledger) = fixture();
        let package = ledger
            .deposit(&directory, "Isha Singh", "S123", "Amazon", "A-12")
            .unwrap();

        assert_eq!(package.status, PackageStatus::Stored);
        assert_eq!(package.otp.as_str().len(), 4);
        assert_eq!(package.slot, "A-12");
        assert!(package.collected_at.is_none());
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_deposit_for_unknown_student_rejected() {
        let (directory, mut ledger) = fixture();
        let result = ledger.deposit(&directory, "Nobody", "S999", "Amazon", "A-12");
        assert!(matches!(result, Err(LedgerError::UnknownStudent { .. })));
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_package_ids_are_creation_ordered() {
        let (directory, mut ledger) = fixture();
        let first = ledger
            .deposit(&directory, "Isha Singh", "S123", "Amazon", "A-1")
            .unwrap();
        let second = ledger
            .deposit(&directory, "Isha Singh", "S123", "Flipkart", "A-2")
            .unwrap();
        assert!(first.id < second.id);
    }

    #[test]
    fn test_collect_transitions_and_records_guard() {
        let (directory, mut ledger) = fixture();
        let package = ledger
            .deposit_at(
                &directory,
                "Isha Singh",
                "S123",
                "Amazon",
                "A-12",
                Otp::parse("4242").unwrap(),
                1_000,
            )
            .unwrap();

        let collected = ledger
            .collect_at(package.id, "Security Chief", "G789", 2_000)
            .unwrap();
        assert_eq!(collected.status, PackageStatus::Collected);
        assert_eq!(collected.collected_at, Some(2_000));
        assert_eq!(collected.guard_name.as_deref(), Some("Security Chief"));
        assert_eq!(collected.guard_id.as_deref(), Some("G789"));
        // OTP survives collection unchanged.
        assert_eq!(collected.otp.as_str(), "4242");
    }

    #[test]
    fn test_double_collect_rejected() {
        let (directory, mut ledger) = fixture();
        let package = ledger
            .deposit(&directory, "Isha Singh", "S123", "Amazon", "A-12")
            .unwrap();

        ledger.collect(package.id, "Security Chief", "G789").unwrap();
        let again = ledger.collect(package.id, "Security Chief", "G789");
        assert_eq!(again.unwrap_err(), LedgerError::PackageNotFound);
    }

    #[test]
    fn test_listing_filters() {
        let (directory, mut ledger) = fixture();
        let a = ledger
            .deposit(&directory, "Isha Singh", "S123", "Amazon", "A-1")
            .unwrap();
        let b = ledger
            .deposit(&directory, "Isha Singh", "S123", "Flipkart", "A-2")
            .unwrap();
        ledger.collect(a.id, "Security Chief", "G789").unwrap();

        let stored = ledger.list_by_status(PackageStatus::Stored);
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, b.id);

        let collected = ledger.list_by_status(PackageStatus::Collected);
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].id, a.id);

        // Per-student history keeps collected packages.
        assert_eq!(ledger.list_by_student("S123").len(), 2);
        assert!(ledger.list_by_student("S999").is_empty());
    }

    #[test]
    fn test_ambiguous_otp_resolves_to_oldest() {
        let (directory, mut ledger) = fixture();
        let otp = Otp::parse("7777").unwrap();
        let first = ledger
            .deposit_at(&directory, "Isha Singh", "S123", "Amazon", "A-1", otp.clone(), 1)
            .unwrap();
        ledger
            .deposit_at(&directory, "Isha Singh", "S123", "Flipkart", "A-2", otp.clone(), 2)
            .unwrap();

        assert_eq!(ledger.find_stored_by_otp(&otp).unwrap().id, first.id);
    }
}
