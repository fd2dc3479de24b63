//! Wrapper for displaying a series of daily summaries.

use std::fmt;

use super::datetime::Clock;
use crate::engine::DaySummary;

/// Markdown table of daily totals, one row per day.
///
/// ```rust
/// use std::time::Duration;
///
/// use jiff::civil::date;
/// use pomo_core::{display::SummaryTable, DaySummary};
///
/// let days = vec![DaySummary {
///     day: date(2025, 3, 1),
///     pomodoro: Duration::from_secs(25 * 60),
///     breaks: Duration::from_secs(5 * 60),
/// }];
/// let output = SummaryTable(&days).to_string();
/// assert!(output.contains("| 2025-03-01 | 25:00 | 05:00 |"));
/// ```
pub struct SummaryTable<'a>(pub &'a [DaySummary]);

impl fmt::Display for SummaryTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No days to summarize.");
        }

        writeln!(f, "| Day | Pomodoro | Break |")?;
        writeln!(f, "|:-|-:|-:|")?;
        for day in self.0 {
            writeln!(
                f,
                "| {} | {} | {} |",
                day.day,
                Clock(day.pomodoro),
                Clock(day.breaks)
            )?;
        }

        let pomodoro = self.0.iter().map(|d| d.pomodoro).sum();
        let breaks = self.0.iter().map(|d| d.breaks).sum();
        writeln!(
            f,
            "| **Total** | **{}** | **{}** |",
            Clock(pomodoro),
            Clock(breaks)
        )
    }
}
