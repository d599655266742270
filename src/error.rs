//! Unified error types for Daybook with fail-soft reads.
//!
//! Reads never crash the caller: a storage or decode failure while listing
//! entries is logged and degrades to an empty collection. Writes are the one
//! place errors surface, so the caller can keep its draft and retry.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Daybook operations.
#[derive(Error, Debug)]
pub enum DaybookError {
    /// I/O errors from the file-backed key-value store.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The storage medium cannot be reached at all.
    #[error("storage unavailable: {message}")]
    StorageUnavailable { message: String },

    /// A write would exceed the storage quota.
    #[error("storage quota exceeded writing '{key}': {requested} bytes requested, limit {limit}")]
    QuotaExceeded {
        key: String,
        requested: usize,
        limit: usize,
    },

    /// A stored value could not be decoded.
    #[error("malformed data under '{key}': {message}")]
    MalformedData { key: String, message: String },

    /// JSON or TOML serialization errors.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// An entry failed validation before being saved.
    #[error("invalid entry: {message}")]
    InvalidEntry { message: String },

    /// A requested entry does not exist.
    #[error("{what} not found")]
    NotFound { what: String },

    /// A date or month string could not be parsed.
    #[error("invalid date '{value}': expected {expected}")]
    InvalidDate { value: String, expected: String },

    /// A storage key that cannot be mapped onto the medium.
    #[error("invalid storage key '{key}'")]
    InvalidKey { key: String },
}

/// A specialized Result type for Daybook operations.
pub type Result<T> = std::result::Result<T, DaybookError>;

impl DaybookError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a storage unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
        }
    }

    /// Create a quota exceeded error.
    pub fn quota_exceeded(key: impl Into<String>, requested: usize, limit: usize) -> Self {
        Self::QuotaExceeded {
            key: key.into(),
            requested,
            limit,
        }
    }

    /// Create a malformed data error.
    pub fn malformed(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedData {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Create a serialization error.
    pub fn serde(message: impl Into<String>) -> Self {
        Self::Serde {
            message: message.into(),
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid entry error.
    pub fn invalid_entry(message: impl Into<String>) -> Self {
        Self::InvalidEntry {
            message: message.into(),
        }
    }

    /// Create a not-found error, e.g. `not_found("journal entry 'abc'")`.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create an invalid date error.
    pub fn invalid_date(value: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidDate {
            value: value.into(),
            expected: expected.into(),
        }
    }

    /// Create an invalid key error.
    pub fn invalid_key(key: impl Into<String>) -> Self {
        Self::InvalidKey { key: key.into() }
    }
}

impl From<io::Error> for DaybookError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for DaybookError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde {
            message: err.to_string(),
        }
    }
}

/// Trait for fail-soft error handling.
///
/// Log the error and return a safe default instead of propagating it.
pub trait FailOpen<T> {
    /// Handle an error by logging a warning and returning the default value.
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default;

    /// Handle an error by logging a warning and returning the provided fallback.
    fn fail_open_with(self, context: &str, fallback: T) -> T;
}

impl<T> FailOpen<T> for Result<T> {
    fn fail_open_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using default)", context, err);
                T::default()
            }
        }
    }

    fn fail_open_with(self, context: &str, fallback: T) -> T {
        match self {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!("{}: {} (fail-open: using fallback)", context, err);
                fallback
            }
        }
    }
}

/// Exit codes for the Daybook CLI.
pub mod exit_codes {
    /// The command completed.
    pub const SUCCESS: i32 = 0;

    /// The command failed (bad input or a write that could not be persisted).
    pub const ERROR: i32 = 1;

    /// The process panicked.
    pub const CRASH: i32 = 3;
}
