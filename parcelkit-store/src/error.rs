use thiserror::Error;

/// Convenience alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from the key-value storage seam.
///
/// Persistence failures are never fatal to the application: callers in the
/// domain core log them and degrade to "behaves as if nothing were saved".
#[derive(Debug, Error)]
pub enum StoreError {
    /// An underlying I/O operation failed.
    #[error("io_error during {context}: {source}")]
    Io {
        /// Context describing the operation.
        context: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The key is not usable with this backend.
    #[error("invalid_key '{key}': {reason}")]
    InvalidKey {
        /// The offending key.
        key: String,
        /// Why it was rejected.
        reason: String,
    },
    /// A stored record could not be encoded or decoded.
    #[error("serialization_error: {message}")]
    Serialization {
        /// Error message from the codec.
        message: String,
    },
    /// The backend is unusable (poisoned lock, missing directory, ...).
    #[error("backend_unavailable: {reason}")]
    Unavailable {
        /// Why the backend is unusable.
        reason: String,
    },
}

impl StoreError {
    /// Creates an I/O error with context.
    pub fn io<S: Into<String>>(context: S, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates an invalid-key error.
    pub fn invalid_key<K: Into<String>, R: Into<String>>(key: K, reason: R) -> Self {
        Self::InvalidKey {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates a serialization error.
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Creates a backend-unavailable error.
    pub fn unavailable<S: Into<String>>(reason: S) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}
