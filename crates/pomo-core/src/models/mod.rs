//! Data model for intervals.
//!
//! An [`Interval`] is the only entity the engine persists. Its
//! [`Category`] and planned duration are fixed when it is created; its
//! [`IntervalState`], start time and accumulated duration change as the
//! engine drives it. Display implementations live in
//! [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//!
//! use pomo_core::models::{Category, Interval, IntervalState};
//!
//! let interval = Interval::new(Category::Pomodoro, Duration::from_secs(25 * 60));
//! assert_eq!(interval.id, 0);
//! assert_eq!(interval.state, IntervalState::NotStarted);
//! assert_eq!(interval.remaining(), Duration::from_secs(25 * 60));
//! ```

pub mod category;
pub mod interval;
pub mod state;

#[cfg(test)]
mod tests;

pub use category::Category;
pub use interval::Interval;
pub use state::IntervalState;
