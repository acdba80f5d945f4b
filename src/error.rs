//! Error Types - Storage Faults and Store Failures
//!
//! Expected user-input outcomes (wrong password, duplicate email,
//! missing ids) are NOT errors: the stores report them as `false`
//! or silent no-ops. The types here cover the exceptional paths
//! only: the persistence substrate failing, a store used without
//! an active session, or form input rejected before a mutation.

use thiserror::Error;

/// Exceptional failure of the key-value persistence substrate.
#[derive(Debug, Error)]
pub enum StorageFault {
    /// The backing medium could not be read or written.
    #[error("storage unavailable for key `{key}`: {source}")]
    Unavailable {
        /// Key being accessed.
        key: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A value could not be encoded for writing.
    #[error("failed to serialize value for key `{key}`: {source}")]
    Serialize {
        /// Key being written.
        key: String,
        /// Underlying encoder failure.
        #[source]
        source: serde_json::Error,
    },

    /// The key cannot be mapped onto the backing medium.
    #[error("invalid storage key: `{0}`")]
    InvalidKey(String),

    /// Any other backend failure (e.g. a poisoned lock).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Failure of a journal store operation.
#[derive(Debug, Error)]
pub enum JournalError {
    /// The store is not bound to any user.
    #[error("no active user session")]
    NoActiveUser,

    /// The substrate failed while persisting.
    #[error(transparent)]
    Storage(#[from] StorageFault),

    /// Form input was rejected before reaching a store.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Form input rejected before it reaches a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty or blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The password is shorter than the configured minimum.
    #[error("password must be at least {min} characters")]
    PasswordTooShort {
        /// Configured minimum length.
        min: usize,
    },
}
