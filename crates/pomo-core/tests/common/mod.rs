use std::{path::PathBuf, time::Duration};

use pomo_core::{ConfigBuilder, IntervalConfig};
use tempfile::TempDir;

/// Helper function to create a temporary directory and database path
pub fn create_test_environment() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    (temp_dir, db_path)
}

/// Opens a SQLite-backed config with the given durations in seconds.
pub async fn open_config(db_path: &PathBuf, durations: [u64; 3]) -> IntervalConfig {
    let [pomodoro, short_break, long_break] = durations.map(Duration::from_secs);
    ConfigBuilder::new()
        .with_database_path(Some(db_path))
        .with_pomodoro_duration(pomodoro)
        .with_short_break_duration(short_break)
        .with_long_break_duration(long_break)
        .build()
        .await
        .expect("Failed to build config")
}
