//! The user directory: login, signup, and walk-up enrollment.

use crate::{AuthError, Identity, Role, UserKey};

/// Domain used when synthesizing placeholder emails for walk-up enrollment.
const WALK_UP_EMAIL_DOMAIN: &str = "campus.local";

/// Owns the set of known identities and resolves login/signup requests.
///
/// Students authenticate with real credentials; delivery partners and
/// guards are provisioned informally, with an id-only login that auto-enrolls
/// on first contact when a display name is supplied. That asymmetry is a
/// deliberate part of the deployment model and must be preserved.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: Vec<Identity>,
}

impl UserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub const fn new() -> Self {
        Self { users: Vec::new() }
    }

    /// Creates a directory pre-populated with the demo identities the
    /// prototype ships with.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            users: vec![
                Identity {
                    id: "S123".to_string(),
                    name: "Isha Singh".to_string(),
                    role: Role::Student,
                    email: "isha@test.com".to_string(),
                    password: "123".to_string(),
                    department: None,
                    phone: None,
                },
                Identity {
                    id: "D456".to_string(),
                    name: "Ramesh Kumar".to_string(),
                    role: Role::Delivery,
                    email: "ramesh@test.com".to_string(),
                    password: "123".to_string(),
                    department: None,
                    phone: None,
                },
                Identity {
                    id: "G789".to_string(),
                    name: "Security Chief".to_string(),
                    role: Role::Guard,
                    email: "guard@test.com".to_string(),
                    password: "123".to_string(),
                    department: None,
                    phone: None,
                },
            ],
        }
    }

    /// Resolves a login request.
    ///
    /// - `Student`: requires an exact `id + password + role` match.
    /// - `Delivery`/`Guard`: matches on `id + role` only; `password` is
    ///   ignored. A differing `display_name` overwrites the stored name.
    ///   When no record exists and a `display_name` is supplied, a new
    ///   identity is enrolled on the fly ("walk-up enrollment") with a
    ///   synthesized placeholder email and an empty password.
    ///
    /// Returns a snapshot of the matched (or enrolled) identity.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidCredentials`] for a failed student match.
    /// - [`AuthError::NotFound`] for an unknown delivery/guard id with no
    ///   display name to enroll with.
    pub fn login(
        &mut self,
        identifier: &str,
        password: &str,
        role: Role,
        display_name: Option<&str>,
    ) -> Result<Identity, AuthError> {
        match role {
            Role::Student => self
                .users
                .iter()
                .find(|u| u.role == Role::Student && u.id == identifier && u.password == password)
                .cloned()
                .ok_or(AuthError::InvalidCredentials),
            Role::Delivery | Role::Guard => {
                let key = UserKey {
                    id: identifier.to_string(),
                    role,
                };
                if self.find(&key).is_some() {
                    if let Some(name) = display_name {
                        if let Some(updated) = self.update_name(&key, name) {
                            return Ok(updated);
                        }
                    }
                    return self.find(&key).cloned().ok_or(AuthError::NotFound);
                }
                let Some(name) = display_name else {
                    return Err(AuthError::NotFound);
                };
                let enrolled = Identity {
                    id: identifier.to_string(),
                    name: name.to_string(),
                    role,
                    email: format!(
                        "{}@{WALK_UP_EMAIL_DOMAIN}",
                        identifier.to_lowercase()
                    ),
                    password: String::new(),
                    department: None,
                    phone: None,
                };
                log::debug!("walk-up enrollment: {role} id={identifier}");
                self.users.push(enrolled.clone());
                Ok(enrolled)
            }
        }
    }

    /// Inserts a new identity.
    ///
    /// The collision check spans **all** roles: an existing identity with
    /// the same email or the same id rejects the signup, and the directory
    /// is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::AlreadyExists`] on an email or id collision.
    pub fn signup(
        &mut self,
        name: &str,
        id: &str,
        email: &str,
        password: &str,
        role: Role,
        department: Option<String>,
    ) -> Result<Identity, AuthError> {
        if self.users.iter().any(|u| u.email == email || u.id == id) {
            return Err(AuthError::AlreadyExists);
        }
        let identity = Identity {
            id: id.to_string(),
            name: name.to_string(),
            role,
            email: email.to_string(),
            password: password.to_string(),
            department,
            phone: None,
        };
        self.users.push(identity.clone());
        Ok(identity)
    }

    /// Validates a deposit target: case-insensitive name match, exact id
    /// match, and the record must be a student.
    #[must_use]
    pub fn verify_student(&self, name: &str, id: &str) -> bool {
        self.users.iter().any(|u| {
            u.role == Role::Student && u.id == id && u.name.eq_ignore_ascii_case(name)
        })
    }

    /// Looks up an identity by `(id, role)` key.
    #[must_use]
    pub fn find(&self, key: &UserKey) -> Option<&Identity> {
        self.users
            .iter()
            .find(|u| u.role == key.role && u.id == key.id)
    }

    /// Replaces the display name of the identity under `key`, returning a
    /// snapshot of the updated record.
    ///
    /// Explicit update-then-replace: callers never hold a mutable alias
    /// into the directory.
    pub fn update_name(&mut self, key: &UserKey, name: &str) -> Option<Identity> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.role == key.role && u.id == key.id)?;
        if user.name != name {
            name.clone_into(&mut user.name);
        }
        Some(user.clone())
    }

    /// Number of known identities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` when no identities are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn signup_isha(directory: &mut UserDirectory) -> Identity {
        directory
            .signup(
                "Isha Singh",
                "S123",
                "isha@test.com",
                "123",
                Role::Student,
                None,
            )
            .unwrap()
    }

    #[test]
    fn test_signup_then_login() {
        let mut directory = UserDirectory::new();
        let identity = signup_isha(&mut directory);
        assert_eq!(identity.role, Role::Student);

        let logged_in = directory.login("S123", "123", Role::Student, None).unwrap();
        assert_eq!(logged_in.name, "Isha Singh");
    }

    #[test_case("isha@test.com", "S999"; "email collision")]
    #[test_case("other@test.com", "S123"; "id collision")]
    fn test_signup_collision_rejected(email: &str, id: &str) {
        let mut directory = UserDirectory::new();
        signup_isha(&mut directory);

        let result = directory.signup("Other", id, email, "pw", Role::Student, None);
        assert_eq!(result.unwrap_err(), AuthError::AlreadyExists);
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_signup_collision_spans_roles() {
        let mut directory = UserDirectory::seeded();
        // D456 exists as a delivery partner; a student signup reusing the id fails.
        let result = directory.signup("New", "D456", "new@test.com", "pw", Role::Student, None);
        assert_eq!(result.unwrap_err(), AuthError::AlreadyExists);
    }

    #[test]
    fn test_student_login_requires_exact_password() {
        let mut directory = UserDirectory::new();
        signup_isha(&mut directory);

        let result = directory.login("S123", "wrong", Role::Student, None);
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[test]
    fn test_student_login_is_role_scoped() {
        let mut directory = UserDirectory::seeded();
        // The guard id does not work as a student login.
        let result = directory.login("G789", "123", Role::Student, None);
        assert_eq!(result.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[test]
    fn test_walk_up_enrollment() {
        let mut directory = UserDirectory::new();
        let enrolled = directory
            .login("D777", "ignored", Role::Delivery, Some("New Rider"))
            .unwrap();
        assert_eq!(enrolled.name, "New Rider");
        assert_eq!(enrolled.email, "d777@campus.local");
        assert_eq!(directory.len(), 1);

        // Password is never checked for delivery logins.
        let again = directory
            .login("D777", "whatever", Role::Delivery, None)
            .unwrap();
        assert_eq!(again.name, "New Rider");
    }

    #[test]
    fn test_walk_up_without_name_fails() {
        let mut directory = UserDirectory::new();
        let result = directory.login("G000", "", Role::Guard, None);
        assert_eq!(result.unwrap_err(), AuthError::NotFound);
        assert!(directory.is_empty());
    }

    #[test]
    fn test_returning_login_overwrites_name() {
        let mut directory = UserDirectory::new();
        directory
            .login("G001", "", Role::Guard, Some("Night Shift"))
            .unwrap();
        let renamed = directory
            .login("G001", "", Role::Guard, Some("Day Shift"))
            .unwrap();
        assert_eq!(renamed.name, "Day Shift");
        assert_eq!(directory.len(), 1);

        let key = UserKey {
            id: "G001".to_string(),
            role: Role::Guard,
        };
        assert_eq!(directory.find(&key).unwrap().name, "Day Shift");
    }

    #[test]
    fn test_verify_student_case_insensitive_name() {
        let mut directory = UserDirectory::new();
        signup_isha(&mut directory);

        assert!(directory.verify_student("isha singh", "S123"));
        assert!(directory.verify_student("ISHA SINGH", "S123"));
        assert!(!directory.verify_student("Isha Singh", "S124"));
        assert!(!directory.verify_student("Someone Else", "S123"));
    }

    #[test]
    fn test_verify_student_ignores_other_roles() {
        let directory = UserDirectory::seeded();
        assert!(!directory.verify_student("Ramesh Kumar", "D456"));
    }
}
