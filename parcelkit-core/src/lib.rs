#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
//! Core functionality for SecureParcel, a campus package-locker application.
//!
//! Three roles interact with the locker: delivery partners deposit parcels
//! and receive a 4-digit OTP, students own the deposited parcels, and
//! security guards verify OTPs and complete biometric-gated handovers.
//!
//! The crate holds only domain state machines. Platform capabilities
//! (persistent storage, the biometric sensor) are injected behind traits;
//! navigation, theming and screens live in the consuming mobile shell,
//! which observes [`Session::role`] to decide which dashboard to show.

mod biometric;
pub use biometric::*;

mod directory;
pub use directory::*;

mod error;
pub use error::*;

mod guard;
pub use guard::*;

mod identity;
pub use identity::*;

mod ledger;
pub use ledger::*;

mod otp;
pub use otp::*;

mod session;
pub use session::*;

mod vault;
pub use vault::*;

// private modules
mod util;
