//! Interval durations and the repository handle shared by the engine.

use std::{fmt, sync::Arc, time::Duration};

use crate::{models::Category, repository::Repository};

pub const DEFAULT_POMODORO_DURATION: Duration = Duration::from_secs(25 * 60);
pub const DEFAULT_SHORT_BREAK_DURATION: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_LONG_BREAK_DURATION: Duration = Duration::from_secs(15 * 60);

/// Process-wide engine configuration.
///
/// Built once at startup (usually through
/// [`ConfigBuilder`](crate::ConfigBuilder)) and passed by reference into
/// every engine operation. Cloning is cheap and shares the repository.
#[derive(Clone)]
pub struct IntervalConfig {
    repo: Arc<dyn Repository>,
    pub pomodoro_duration: Duration,
    pub short_break_duration: Duration,
    pub long_break_duration: Duration,
}

impl IntervalConfig {
    /// Creates a configuration. A zero duration falls back to its default
    /// (25, 5 and 15 minutes).
    pub fn new(
        repo: Arc<dyn Repository>,
        pomodoro: Duration,
        short_break: Duration,
        long_break: Duration,
    ) -> Self {
        Self {
            repo,
            pomodoro_duration: or_default(pomodoro, DEFAULT_POMODORO_DURATION),
            short_break_duration: or_default(short_break, DEFAULT_SHORT_BREAK_DURATION),
            long_break_duration: or_default(long_break, DEFAULT_LONG_BREAK_DURATION),
        }
    }

    /// The repository every engine operation reads and writes through.
    pub fn repository(&self) -> &Arc<dyn Repository> {
        &self.repo
    }

    /// Planned duration for new intervals of `category`.
    pub fn duration_for(&self, category: Category) -> Duration {
        match category {
            Category::Pomodoro => self.pomodoro_duration,
            Category::ShortBreak => self.short_break_duration,
            Category::LongBreak => self.long_break_duration,
        }
    }
}

fn or_default(value: Duration, default: Duration) -> Duration {
    if value.is_zero() {
        default
    } else {
        value
    }
}

impl fmt::Debug for IntervalConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalConfig")
            .field("pomodoro_duration", &self.pomodoro_duration)
            .field("short_break_duration", &self.short_break_duration)
            .field("long_break_duration", &self.long_break_duration)
            .finish_non_exhaustive()
    }
}
