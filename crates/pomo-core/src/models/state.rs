//! Interval lifecycle states.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PomodoroError;

/// Lifecycle state of an interval.
///
/// ```text
/// NotStarted ──▶ Running ◀──▶ Paused
///                   │            │
///                   ▼            ▼
///                 Done       Cancelled (from any non-terminal state)
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IntervalState {
    /// Created but never run
    #[default]
    NotStarted,

    /// The tick loop is advancing this interval
    Running,

    /// Stopped by a pause request; can be resumed
    Paused,

    /// Ran for its full planned duration
    Done,

    /// Interrupted by a cancellation
    Cancelled,
}

impl IntervalState {
    /// Integer code persisted by the durable backend.
    pub fn code(&self) -> i64 {
        match self {
            IntervalState::NotStarted => 0,
            IntervalState::Running => 1,
            IntervalState::Paused => 2,
            IntervalState::Done => 3,
            IntervalState::Cancelled => 4,
        }
    }

    /// Decode a persisted state code.
    pub fn from_code(code: i64) -> Result<Self, PomodoroError> {
        match code {
            0 => Ok(IntervalState::NotStarted),
            1 => Ok(IntervalState::Running),
            2 => Ok(IntervalState::Paused),
            3 => Ok(IntervalState::Done),
            4 => Ok(IntervalState::Cancelled),
            _ => Err(PomodoroError::InvalidState { code }),
        }
    }

    /// Done and Cancelled never transition again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, IntervalState::Done | IntervalState::Cancelled)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalState::NotStarted => "notstarted",
            IntervalState::Running => "running",
            IntervalState::Paused => "paused",
            IntervalState::Done => "done",
            IntervalState::Cancelled => "cancelled",
        }
    }

    /// State label with an icon, used by the terminal display.
    ///
    /// ```rust
    /// use pomo_core::models::IntervalState;
    ///
    /// assert_eq!(IntervalState::Running.with_icon(), "▶ Running");
    /// assert_eq!(IntervalState::Done.with_icon(), "✓ Done");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            IntervalState::NotStarted => "○ Not started",
            IntervalState::Running => "▶ Running",
            IntervalState::Paused => "⏸ Paused",
            IntervalState::Done => "✓ Done",
            IntervalState::Cancelled => "✗ Cancelled",
        }
    }
}

impl FromStr for IntervalState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "notstarted" | "not_started" => Ok(IntervalState::NotStarted),
            "running" => Ok(IntervalState::Running),
            "paused" => Ok(IntervalState::Paused),
            "done" => Ok(IntervalState::Done),
            "cancelled" | "canceled" => Ok(IntervalState::Cancelled),
            _ => Err(format!("Invalid interval state: {s}")),
        }
    }
}
