//! Schema initialization for the interval table.

use std::time::Duration;

use rusqlite::Connection;

use crate::error::{Result, StorageResultExt};

/// How long a connection waits for another process holding the write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Creates the interval table if it does not exist yet.
///
/// Safe to run on every open.
pub(super) fn initialize_schema(connection: &Connection) -> Result<()> {
    connection
        .busy_timeout(BUSY_TIMEOUT)
        .storage_context("Failed to set busy timeout")?;

    let schema_sql = include_str!("../../../assets/schema.sql");
    connection
        .execute_batch(schema_sql)
        .storage_context("Failed to initialize database schema")?;

    Ok(())
}
