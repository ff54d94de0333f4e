//! Error types for the parkpass library.
//!
//! Every fallible operation returns [`Result`]. Errors carry enough structure
//! for callers to tell a missing record from a lost race or a malformed
//! request; [`Error::kind`] collapses them into the four classes the
//! request/reply surface reports.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::slot::SlotStatus;

/// Result type alias for operations that may fail with a parkpass error.
///
/// # Examples
///
/// ```
/// use parkpass::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the parkpass library.
#[derive(Debug, Error)]
pub enum Error {
    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A path could not be used.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The offending path.
        path: PathBuf,
        /// Why the path could not be used.
        reason: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A slot could not be reserved because it is not available.
    #[error("slot {code} is not available (status {status})")]
    SlotUnavailable {
        /// The slot code.
        code: String,
        /// The status the slot was found in.
        status: SlotStatus,
    },

    /// The stored state does not allow the requested transition.
    #[error("conflict: {details}")]
    Conflict {
        /// Details about the conflict.
        details: String,
    },

    /// A database lock timeout occurred.
    #[error("database lock timeout after {seconds}s")]
    LockTimeout {
        /// The number of seconds waited before timing out.
        seconds: u64,
    },

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: u32,
        /// The schema version found in the database.
        found: u32,
    },
}

/// Coarse classification of an [`Error`].
///
/// # Examples
///
/// ```
/// use parkpass::{Error, ErrorKind};
///
/// let err = Error::NotFound { resource: "pass 7".into() };
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The addressed pass or slot does not exist (or is not in the required state).
    NotFound,
    /// The store state rules the request out, e.g. the slot is already taken.
    Conflict,
    /// The request itself is malformed.
    InvalidInput,
    /// Storage, configuration or I/O failure.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not-found"),
            Self::Conflict => write!(f, "conflict"),
            Self::InvalidInput => write!(f, "invalid-input"),
            Self::Internal => write!(f, "internal"),
        }
    }
}

impl Error {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::SlotUnavailable { .. } | Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Validation { .. } | Self::InvalidPath { .. } => ErrorKind::InvalidInput,
            Self::Database(_)
            | Self::Configuration(_)
            | Self::Io(_)
            | Self::LockTimeout { .. }
            | Self::DataDirectoryNotFound { .. }
            | Self::UnsupportedSchemaVersion { .. } => ErrorKind::Internal,
        }
    }

    /// Shorthand for a [`Error::NotFound`] error.
    pub(crate) fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Shorthand for a [`Error::Validation`] error.
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error is `SQLite` reporting a busy or locked database.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            Self::Database(rusqlite::Error::SqliteFailure(e, _))
                if matches!(
                    e.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                )
        )
    }
}

impl From<crate::label::ParseLabelError> for Error {
    fn from(err: crate::label::ParseLabelError) -> Self {
        Self::Validation {
            field: err.kind.into(),
            message: format!("unknown value '{}'", err.value),
        }
    }
}
