//! Error types for the bednight library.
//!
//! This module provides the error hierarchy for infrastructure and invariant
//! failures, using `thiserror` for ergonomic error handling. Ordinary business
//! outcomes (an unavailable bed night, an expired hold) are not errors; they
//! are returned as typed outcome variants from the operations module.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a bednight error.
///
/// # Examples
///
/// ```
/// use bednight::{Error, Result};
///
/// fn example_operation() -> Result<usize> {
///     Ok(2)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the bednight library.
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

    /// A night date could not be parsed.
    #[error("invalid night date '{value}': {reason}")]
    InvalidNightDate {
        /// The rejected input.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A guest already occupies a bed on this night.
    ///
    /// Raised by the ledger when the `(guest_member_id, night_date)` unique
    /// index rejects an update. The hold manager turns it into an
    /// `InvalidGuestAssignment` outcome.
    #[error("guest {guest_member_id} already occupies a bed on {night_date}")]
    GuestNightConflict {
        /// The guest that collided.
        guest_member_id: String,
        /// The contested night.
        night_date: String,
    },

    /// An internal invariant was violated while mutating the ledger.
    ///
    /// This is never an ordinary business failure. The transaction that
    /// observed it has been rolled back and the condition should be alerted on.
    #[error("internal invariant violated during {operation}: {details}")]
    ConsistencyFault {
        /// The operation that detected the fault.
        operation: String,
        /// What was observed.
        details: String,
    },

    /// An audit of the ledger found rows breaking the ownership rules.
    #[error("ledger invariant violated: {count} problem(s) found")]
    LedgerInvariantViolation {
        /// Number of problems found.
        count: usize,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
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

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl From<crate::model::ValidationError> for Error {
    fn from(err: crate::model::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Check if error is an internal consistency fault.
    ///
    /// # Examples
    ///
    /// ```
    /// use bednight::Error;
    ///
    /// let err = Error::ConsistencyFault {
    ///     operation: "confirm_hold".into(),
    ///     details: "moved 1 of 2 units".into(),
    /// };
    /// assert!(err.is_consistency_fault());
    /// ```
    #[must_use]
    pub fn is_consistency_fault(&self) -> bool {
        matches!(self, Self::ConsistencyFault { .. })
    }

    /// Check if error indicates lock contention on the store.
    #[must_use]
    pub fn is_lock_timeout(&self) -> bool {
        match self {
            Self::LockTimeout { .. } => true,
            Self::Database(rusqlite::Error::SqliteFailure(err, _)) => {
                err.code == rusqlite::ErrorCode::DatabaseBusy
                    || err.code == rusqlite::ErrorCode::DatabaseLocked
            }
            _ => false,
        }
    }

    pub(crate) fn consistency(operation: &str, details: impl Into<String>) -> Self {
        Self::ConsistencyFault {
            operation: operation.to_string(),
            details: details.into(),
        }
    }
}

/// Returns true when a rusqlite error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _) => {
            sqlite_err.code == rusqlite::ErrorCode::ConstraintViolation
                && (sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
        }
        _ => false,
    }
}
