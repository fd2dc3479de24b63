//! Markdown formatting for intervals and summaries.
//!
//! Domain models implement `Display` directly (see [`models`]); collections
//! and durations go through small wrapper types. Everything renders as
//! markdown so the CLI can hand it to its terminal skin unchanged.
//!
//! ```rust
//! use std::time::Duration;
//!
//! use pomo_core::{
//!     display::Clock,
//!     models::{Category, Interval},
//! };
//!
//! let interval = Interval::new(Category::ShortBreak, Duration::from_secs(300));
//! let output = interval.to_string();
//! assert!(output.contains("ShortBreak"));
//! assert_eq!(Clock(Duration::from_secs(65)).to_string(), "01:05");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;

pub use collections::SummaryTable;
pub use datetime::{Clock, LocalDateTime};
