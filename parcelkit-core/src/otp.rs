//! One-time passcodes authorising package collection.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive bounds of the OTP space (always four digits).
const OTP_MIN: u16 = 1000;
const OTP_MAX: u16 = 9999;

/// A 4-digit numeric one-time passcode.
///
/// Assigned to a package at deposit time and immutable thereafter. The
/// passcode space is deliberately small and collisions between
/// concurrently-active packages are **not** prevented; an ambiguous OTP
/// resolves to the oldest matching stored package at verification time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Otp(String);

impl Otp {
    /// Generates a fresh passcode from the thread-local RNG.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generates a fresh passcode from the supplied RNG.
    ///
    /// Uniform over `1000..=9999`.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(OTP_MIN..=OTP_MAX).to_string())
    }

    /// Parses user input into a passcode.
    ///
    /// Accepts exactly four ASCII digits with a leading digit of 1-9.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let digits = input.trim();
        if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        if digits.starts_with('0') {
            return None;
        }
        Some(Self(digits.to_string()))
    }

    /// The passcode as the string the user types.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Otp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
