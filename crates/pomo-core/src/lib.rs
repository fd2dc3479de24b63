//! Core library for the pomo interval timer.
//!
//! This crate drives Pomodoro intervals: it decides which kind of interval
//! comes next, runs a one-second tick loop that persists progress, and stores
//! every interval through a pluggable [`Repository`] (in memory or SQLite).
//!
//! - **Models** ([`models`]): intervals, their categories and states
//! - **Storage** ([`repository`]): the repository trait and its backends
//! - **Engine** ([`engine`]): category rotation, start/pause, the tick loop
//!   and daily summaries
//! - **Display** ([`display`]): markdown formatting for the CLI
//!
//! # Quick Start
//!
//! ```rust
//! use std::time::Duration;
//!
//! use pomo_core::{current_interval, Callbacks, ConfigBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigBuilder::new()
//!     .with_database_path(Some("pomo.db"))
//!     .with_pomodoro_duration(Duration::from_secs(25 * 60))
//!     .build()
//!     .await?;
//!
//! let interval = current_interval(&config).await?;
//! println!("{interval}");
//!
//! let callbacks = Callbacks::new().on_tick(|i| {
//!     println!("{:?} left", i.remaining());
//!     Ok(())
//! });
//! interval
//!     .start(&config, async { let _ = tokio::signal::ctrl_c().await; }, callbacks)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod repository;

// Re-export commonly used types
pub use builder::ConfigBuilder;
pub use config::IntervalConfig;
pub use display::{Clock, LocalDateTime, SummaryTable};
pub use engine::{
    current_interval, daily_summary, last_interval, next_category, range_summary, CallbackError,
    CallbackPhase, Callbacks, DaySummary, MAX_SUMMARY_DAYS,
};
pub use error::{PomodoroError, Result};
pub use models::{Category, Interval, IntervalState};
pub use repository::{MemoryRepository, Repository, SqliteRepository};
