//! Error types for the interval engine and its storage backends.

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

/// Comprehensive error type for all engine and repository operations.
#[derive(Error, Debug)]
pub enum PomodoroError {
    /// The repository holds no intervals yet
    #[error("no intervals")]
    NoIntervals,
    /// Pause requested for an interval that is not running
    #[error("interval not running")]
    IntervalNotRunning,
    /// Start requested for a done or cancelled interval
    #[error("interval is completed or cancelled: cannot start")]
    IntervalCompleted,
    /// A stored state code does not map to any known state
    #[error("invalid state: {code}")]
    InvalidState { code: i64 },
    /// Interval id is zero or unknown to the repository
    #[error("invalid ID: {id}")]
    InvalidId { id: u64 },
    /// A duration too long to be stored as milliseconds
    #[error("duration out of range: {duration:?}")]
    DurationOutOfRange { duration: Duration },
    /// SQLite query or connection errors
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// A backend lock was poisoned by a panicking holder
    #[error("Storage error: {resource} lock poisoned")]
    LockPoisoned { resource: &'static str },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration and runtime wiring errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating storage errors with context.
pub struct StorageErrorBuilder {
    message: String,
}

impl StorageErrorBuilder {
    /// Create a new storage error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> PomodoroError {
        PomodoroError::Storage {
            message: self.message,
            source,
        }
    }
}

impl PomodoroError {
    /// Creates a builder for storage errors.
    pub fn storage(message: impl Into<String>) -> StorageErrorBuilder {
        StorageErrorBuilder::new(message)
    }

    /// Returns true for backend I/O or integrity failures.
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            PomodoroError::Storage { .. } | PomodoroError::LockPoisoned { .. }
        )
    }
}

/// Extension trait mapping rusqlite results into storage errors.
pub trait StorageResultExt<T> {
    /// Map SQLite errors with a message.
    fn storage_context(self, message: &str) -> Result<T>;
}

impl<T> StorageResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn storage_context(self, message: &str) -> Result<T> {
        self.map_err(|e| PomodoroError::storage(message).with_source(e))
    }
}

/// Result type alias for engine and repository operations
pub type Result<T> = std::result::Result<T, PomodoroError>;
