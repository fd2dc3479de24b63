//! Builder for creating an [`IntervalConfig`] and its storage backend.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use log::debug;
use tokio::task;

use crate::{
    config::IntervalConfig,
    error::{PomodoroError, Result},
    repository::{MemoryRepository, Repository, SqliteRepository},
};

/// Where intervals are stored.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Backend {
    Sqlite(Option<PathBuf>),
    Memory,
}

/// Builder for creating and configuring [`IntervalConfig`] instances.
///
/// The storage backend is chosen here, once; the engine never switches
/// backends afterwards.
#[derive(Debug, Clone)]
pub struct ConfigBuilder {
    backend: Backend,
    pomodoro: Duration,
    short_break: Duration,
    long_break: Duration,
}

impl ConfigBuilder {
    /// Creates a new builder with default settings: SQLite at the XDG data
    /// path and the default durations.
    pub fn new() -> Self {
        Self {
            backend: Backend::Sqlite(None),
            pomodoro: Duration::ZERO,
            short_break: Duration::ZERO,
            long_break: Duration::ZERO,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/pomo/pomo.db` or `~/.local/share/pomo/pomo.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.backend = Backend::Sqlite(Some(path.as_ref().to_path_buf()));
        }
        self
    }

    /// Keeps the history in memory only.
    pub fn in_memory(mut self) -> Self {
        self.backend = Backend::Memory;
        self
    }

    /// Length of work intervals. Zero keeps the default.
    pub fn with_pomodoro_duration(mut self, duration: Duration) -> Self {
        self.pomodoro = duration;
        self
    }

    /// Length of short breaks. Zero keeps the default.
    pub fn with_short_break_duration(mut self, duration: Duration) -> Self {
        self.short_break = duration;
        self
    }

    /// Length of long breaks. Zero keeps the default.
    pub fn with_long_break_duration(mut self, duration: Duration) -> Self {
        self.long_break = duration;
        self
    }

    /// Opens the storage backend and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::FileSystem` if the database directory cannot
    /// be created
    /// Returns `PomodoroError::Storage` if database initialization fails
    pub async fn build(self) -> Result<IntervalConfig> {
        let repo: Arc<dyn Repository> = match self.backend {
            Backend::Memory => {
                debug!("Using in-memory interval repository");
                Arc::new(MemoryRepository::new())
            }
            Backend::Sqlite(path) => {
                let db_path = match path {
                    Some(path) => path,
                    None => Self::default_database_path()?,
                };

                if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent).map_err(|e| PomodoroError::FileSystem {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
                }

                debug!("Opening interval database at {}", db_path.display());
                let repo = task::spawn_blocking(move || SqliteRepository::open(&db_path))
                    .await
                    .map_err(|e| PomodoroError::Configuration {
                        message: format!("Task join error: {e}"),
                    })??;
                Arc::new(repo)
            }
        };

        Ok(IntervalConfig::new(
            repo,
            self.pomodoro,
            self.short_break,
            self.long_break,
        ))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("pomo")
            .place_data_file("pomo.db")
            .map_err(|e| PomodoroError::XdgDirectory(e.to_string()))
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::models::{Category, Interval};

    #[tokio::test]
    async fn test_build_creates_database_and_parents() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("nested").join("pomo.db");

        let config = ConfigBuilder::new()
            .with_database_path(Some(&db_path))
            .build()
            .await
            .expect("Failed to build config");

        assert!(db_path.exists());
        let id = config
            .repository()
            .create(&Interval::new(Category::Pomodoro, Duration::from_secs(1)))
            .unwrap();
        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn test_reopening_keeps_history() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("pomo.db");

        let first = ConfigBuilder::new()
            .with_database_path(Some(&db_path))
            .build()
            .await
            .unwrap();
        first
            .repository()
            .create(&Interval::new(Category::Pomodoro, Duration::from_secs(1)))
            .unwrap();
        drop(first);

        let second = ConfigBuilder::new()
            .with_database_path(Some(&db_path))
            .build()
            .await
            .unwrap();
        assert_eq!(second.repository().last().unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_in_memory_with_durations() {
        let config = ConfigBuilder::new()
            .in_memory()
            .with_pomodoro_duration(Duration::from_secs(50 * 60))
            .with_short_break_duration(Duration::from_secs(10 * 60))
            .build()
            .await
            .unwrap();

        assert_eq!(config.pomodoro_duration, Duration::from_secs(3000));
        assert_eq!(config.short_break_duration, Duration::from_secs(600));
        assert_eq!(config.long_break_duration, Duration::from_secs(900));
        assert!(config.repository().last().is_err());
    }

    #[test]
    fn test_none_path_keeps_default_backend() {
        let builder = ConfigBuilder::new().with_database_path(None::<&Path>);
        assert_eq!(builder.backend, Backend::Sqlite(None));
    }
}
