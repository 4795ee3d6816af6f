//! Storage primitives for ParcelKit.
//!
//! The mobile shells persist small records (saved credentials, feature
//! flags) through an opaque key-value seam. This crate defines that seam
//! ([`KeyValueStore`]) together with two implementations:
//!
//! - [`MemoryStore`]: in-memory, used in tests and the UI prototype.
//! - [`FileStore`]: file-backed with atomic-rename writes, the on-device
//!   counterpart a shell would wire in.
//!
//! Readers must tolerate a missing key: a key that was never written reads
//! back as `None`, not as an error.

mod error;
mod file;
mod kv;
mod memory;

pub use error::{StoreError, StoreResult};
pub use file::FileStore;
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
