//! Durable repository stored in a single SQLite file.
//!
//! The repository owns exactly one connection. Every call takes the
//! connection mutex for its whole duration, which serializes writers and
//! keeps reads from observing a half-applied write; writes additionally run
//! inside a transaction. Other processes opening the same file wait on
//! SQLite's busy timeout.

use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};

use rusqlite::Connection;

use crate::error::{PomodoroError, Result, StorageResultExt};

mod queries;
mod schema;

/// SQLite-backed interval store.
pub struct SqliteRepository {
    connection: Mutex<Connection>,
}

impl SqliteRepository {
    /// Opens (creating if needed) the database file and its schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            Connection::open(path).storage_context("Failed to open database connection")?;
        Self::with_connection(connection)
    }

    /// Opens a private in-memory SQLite database, mostly useful in tests.
    pub fn open_in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory()
            .storage_context("Failed to open in-memory database")?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        schema::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| PomodoroError::LockPoisoned { resource: "connection" })
    }
}
