//! Identities known to the locker system.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role of an identity within the locker system.
///
/// Roles form a closed set and are matched exhaustively everywhere; the
/// same id may exist under different roles (id namespaces are role-scoped).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    /// Authenticates with real credentials (id + password).
    Student,
    /// Provisioned informally: id-only login with walk-up enrollment.
    Delivery,
    /// Provisioned informally: id-only login with walk-up enrollment.
    Guard,
}

/// A user record held by the [`crate::UserDirectory`].
///
/// Passwords are plaintext by design: SecureParcel is a prototype and
/// hardening the credential story is explicitly out of scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique within the directory for this role.
    pub id: String,
    /// Display name; mutable for delivery/guard identities.
    pub name: String,
    /// Role of this identity.
    pub role: Role,
    /// Contact email; unique across student identities.
    pub email: String,
    /// Plaintext password; only checked for students.
    pub password: String,
    /// Optional department, collected at student signup.
    pub department: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
}

impl Identity {
    /// Returns the `(id, role)` lookup key for this identity.
    #[must_use]
    pub fn key(&self) -> UserKey {
        UserKey {
            id: self.id.clone(),
            role: self.role,
        }
    }
}

/// Non-owning reference to a directory record.
///
/// The session holds one of these instead of a copy of the record, so
/// directory edits (e.g. a delivery partner renaming themselves at login)
/// stay visible through the session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserKey {
    /// Identity id, unique within the role.
    pub id: String,
    /// Role scoping the id.
    pub role: Role,
}
