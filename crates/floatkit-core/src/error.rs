//! Error taxonomy shared by all floatkit containers.
//!
//! Every failure is local to the operation that produced it. An operation
//! that returns an error leaves its container exactly as it found it.

use std::fmt;

use thiserror::Error;

/// Result type for container operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while operating on a container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument was malformed (zero capacity, NaN, negative tolerance,
    /// growth requested on fixed storage, bad configuration).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// An index fell outside the logical bounds of a vector.
    #[error("index {index} out of range for length {len}")]
    Range {
        /// The offending index.
        index: usize,
        /// Length of the vector at the time of the call.
        len: usize,
    },

    /// The operation needs more elements than the container holds.
    #[error("operation requires a non-empty container")]
    EmptyContainer,

    /// A buffer or bucket directory could not be reserved.
    #[error("out of memory: failed to reserve {requested} elements")]
    OutOfMemory {
        /// Number of elements requested.
        requested: usize,
    },

    /// Insert-once dictionaries refuse an existing key.
    #[error("key already exists: {0:?}")]
    AlreadyExists(String),

    /// The key is not present in the dictionary.
    #[error("key not found: {0:?}")]
    NotFound(String),

    /// Fixed-capacity storage cannot be released or adopted.
    #[error("permission denied: {0}")]
    PermissionDenied(&'static str),
}

/// Fieldless classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::InvalidArgument`].
    InvalidArgument,
    /// See [`Error::Range`].
    Range,
    /// See [`Error::EmptyContainer`].
    EmptyContainer,
    /// See [`Error::OutOfMemory`].
    OutOfMemory,
    /// See [`Error::AlreadyExists`].
    AlreadyExists,
    /// See [`Error::NotFound`].
    NotFound,
    /// See [`Error::PermissionDenied`].
    PermissionDenied,
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::Range { .. } => ErrorKind::Range,
            Self::EmptyContainer => ErrorKind::EmptyContainer,
            Self::OutOfMemory { .. } => ErrorKind::OutOfMemory,
            Self::AlreadyExists(_) => ErrorKind::AlreadyExists,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
        }
    }
}

/// An error that returns ownership of a rejected value.
///
/// Operations that consume their argument (adopting a vector into a
/// dictionary, inserting into a table) give the value back on failure so
/// the caller can keep using it.
pub struct Rejected<T> {
    error: Error,
    value: T,
}

impl<T> Rejected<T> {
    /// Pair an error with the value it refused.
    pub fn new(error: Error, value: T) -> Self {
        Self { error, value }
    }

    /// The reason the value was refused.
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Recover the refused value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Discard the value and keep the error.
    pub fn into_error(self) -> Error {
        self.error
    }

    /// Split into error and value.
    pub fn into_parts(self) -> (Error, T) {
        (self.error, self.value)
    }

    /// Transform the carried value, keeping the error.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Rejected<U> {
        Rejected {
            error: self.error,
            value: f(self.value),
        }
    }
}

impl<T> fmt::Debug for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rejected")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for Rejected<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<T> std::error::Error for Rejected<T> {}

impl<T> From<Rejected<T>> for Error {
    fn from(rejected: Rejected<T>) -> Self {
        rejected.error
    }
}
