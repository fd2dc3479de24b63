//! The interval engine: picks the current interval and drives it through its
//! lifecycle.
//!
//! ```text
//!              start                 tick / expiry
//! NotStarted ─────────▶ Running ─────────────────▶ Done
//!                        │   ▲
//!                  pause │   │ start
//!                        ▼   │
//!                        Paused
//!
//!   any non-terminal state ── cancel ──▶ Cancelled
//! ```
//!
//! All state lives in the repository. Every transition re-reads the stored
//! interval and writes back only if the record is still what it read, which
//! is how a `pause` issued elsewhere (another task, or another process
//! sharing the SQLite file) stops a running loop instead of being overwritten.
//!
//! Repository calls are blocking and run on tokio's blocking pool, one call
//! at a time; the engine never holds a lock across calls.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use pomo_core::{current_interval, Callbacks, ConfigBuilder};
//!
//! # async fn example() -> pomo_core::Result<()> {
//! let config = ConfigBuilder::new()
//!     .in_memory()
//!     .with_pomodoro_duration(Duration::from_secs(3))
//!     .build()
//!     .await?;
//!
//! let interval = current_interval(&config).await?;
//! let callbacks = Callbacks::new().on_end(|i| {
//!     println!("interval {} finished", i.id);
//!     Ok(())
//! });
//! interval
//!     .start(&config, std::future::pending(), callbacks)
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::future::Future;

use jiff::Timestamp;
use log::{debug, info};
use tokio::task;

use crate::{
    config::IntervalConfig,
    error::{PomodoroError, Result},
    models::{Interval, IntervalState},
};

pub mod callbacks;
pub mod rotation;
pub mod summary;
mod tick;


pub use callbacks::{CallbackError, CallbackPhase, Callbacks};
pub use rotation::next_category;
pub use summary::{daily_summary, range_summary, DaySummary, MAX_SUMMARY_DAYS};

/// Returns the interval to work on next.
///
/// The most recent interval is returned while it is still `NotStarted`,
/// `Running` or `Paused`. Otherwise a new `NotStarted` interval of the next
/// category in the rotation is created and returned with its id.
pub async fn current_interval(config: &IntervalConfig) -> Result<Interval> {
    blocking(config, |config| {
        let repo = config.repository();
        match repo.last() {
            Ok(last) if !last.state.is_terminal() => return Ok(last),
            Ok(_) | Err(PomodoroError::NoIntervals) => {}
            Err(e) => return Err(e),
        }

        let category = next_category(repo.as_ref())?;
        let mut interval = Interval::new(category, config.duration_for(category));
        interval.id = repo.create(&interval)?;
        info!(
            "Created {} interval {} ({:?})",
            category.as_str(),
            interval.id,
            interval.planned_duration
        );
        Ok(interval)
    })
    .await
}

/// The most recently created interval, if any. Never creates one.
pub async fn last_interval(config: &IntervalConfig) -> Result<Option<Interval>> {
    blocking(config, |config| match config.repository().last() {
        Ok(last) => Ok(Some(last)),
        Err(PomodoroError::NoIntervals) => Ok(None),
        Err(e) => Err(e),
    })
    .await
}

impl Interval {
    /// Starts or resumes this interval and runs its tick loop until it is
    /// done, paused or cancelled.
    ///
    /// The stored record decides what happens, not this copy. Completion of
    /// `cancel` marks the interval `Cancelled`. Calling `start` on an interval
    /// that is already `Running` returns immediately without writing or
    /// invoking callbacks, so a second loop is never started for one id.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::IntervalCompleted` for `Done` and `Cancelled`
    /// intervals, and any repository error raised while the loop runs.
    pub async fn start<C>(
        &self,
        config: &IntervalConfig,
        cancel: C,
        callbacks: Callbacks,
    ) -> Result<()>
    where
        C: Future<Output = ()>,
    {
        let id = self.id;
        let started = blocking(config, move |config| {
            let repo = config.repository();
            loop {
                let current = repo.by_id(id)?;
                let mut interval = current.clone();
                match current.state {
                    IntervalState::Running => return Ok(false),
                    IntervalState::Done | IntervalState::Cancelled => {
                        return Err(PomodoroError::IntervalCompleted);
                    }
                    IntervalState::NotStarted => {
                        interval.start_time = Some(Timestamp::now());
                    }
                    IntervalState::Paused => {}
                }
                interval.state = IntervalState::Running;
                if repo.update_if_unchanged(&current, &interval)? {
                    return Ok(true);
                }
            }
        })
        .await?;

        if !started {
            debug!("Interval {id} is already running");
            return Ok(());
        }
        debug!("Interval {id} running");

        tick::run(config, id, cancel, callbacks).await
    }

    /// Pauses this running interval.
    ///
    /// The stored record is re-read first so that time accumulated by a tick
    /// loop since this copy was taken is kept.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::IntervalNotRunning` unless both this copy and
    /// the stored record are `Running`.
    pub async fn pause(&self, config: &IntervalConfig) -> Result<()> {
        if self.state != IntervalState::Running {
            return Err(PomodoroError::IntervalNotRunning);
        }

        let id = self.id;
        blocking(config, move |config| {
            let repo = config.repository();
            loop {
                let current = repo.by_id(id)?;
                if current.state != IntervalState::Running {
                    return Err(PomodoroError::IntervalNotRunning);
                }
                let paused = Interval {
                    state: IntervalState::Paused,
                    ..current.clone()
                };
                if repo.update_if_unchanged(&current, &paused)? {
                    return Ok(());
                }
            }
        })
        .await?;

        debug!("Interval {id} paused");
        Ok(())
    }
}

/// Runs `f` on the blocking pool with a handle to the configuration.
pub(crate) async fn blocking<T, F>(config: &IntervalConfig, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&IntervalConfig) -> Result<T> + Send + 'static,
{
    let config = config.clone();
    task::spawn_blocking(move || f(&config))
        .await
        .map_err(|e| PomodoroError::Configuration {
            message: format!("Task join error: {e}"),
        })?
}

pub(crate) async fn load(config: &IntervalConfig, id: u64) -> Result<Interval> {
    blocking(config, move |config| config.repository().by_id(id)).await
}

/// Writes `interval` unless the stored record no longer equals `current`.
pub(crate) async fn save_if_unchanged(
    config: &IntervalConfig,
    current: Interval,
    interval: Interval,
) -> Result<bool> {
    blocking(config, move |config| {
        config.repository().update_if_unchanged(&current, &interval)
    })
    .await
}
