#![forbid(unsafe_code)]

//! Error type shared by every listkit crate.

use core::fmt;

/// Errors reported by collections and the behaviors layered on them.
///
/// Every error is returned before the target structure is mutated, so a
/// failed call never leaves a collection half-updated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The operation's positional semantics cannot keep the collection
    /// sorted (range replacement, repetition).
    UnsupportedOperation {
        /// Name of the rejected operation.
        operation: &'static str,
    },
    /// An argument was rejected at construction or configuration time.
    InvalidArgument(String),
    /// A positional access past the end of the collection.
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The collection length at the time of the call.
        len: usize,
    },
}

impl Error {
    /// Shorthand for [`Error::UnsupportedOperation`].
    #[must_use]
    pub const fn unsupported(operation: &'static str) -> Self {
        Self::UnsupportedOperation { operation }
    }

    /// Check whether this is an [`Error::UnsupportedOperation`].
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedOperation { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedOperation { operation } => {
                write!(f, "{operation} is not supported on a sorted collection")
            }
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Standard result type for listkit APIs.
pub type Result<T> = std::result::Result<T, Error>;
