//! Daily totals built on `category_summary`.

use std::time::Duration;

use jiff::civil::Date;
use serde::Serialize;

use super::blocking;
use crate::{
    config::IntervalConfig,
    error::{PomodoroError, Result},
};

const POMODORO_FILTER: &str = "%Pomodoro";
const BREAK_FILTER: &str = "%Break";

/// Longest span `range_summary` accepts, roughly ten years.
pub const MAX_SUMMARY_DAYS: usize = 3660;

/// Time spent working and resting on one local calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    pub day: Date,
    #[serde(with = "crate::models::interval::millis")]
    pub pomodoro: Duration,
    #[serde(with = "crate::models::interval::millis")]
    pub breaks: Duration,
}

/// Pomodoro and break totals for `day`.
pub async fn daily_summary(config: &IntervalConfig, day: Date) -> Result<DaySummary> {
    blocking(config, move |config| summarize(config, day)).await
}

/// Totals for the `days` days ending with `end`, oldest first.
///
/// # Errors
///
/// Returns `PomodoroError::Configuration` when `days` exceeds
/// [`MAX_SUMMARY_DAYS`] or the range runs past the supported calendar.
pub async fn range_summary(
    config: &IntervalConfig,
    end: Date,
    days: usize,
) -> Result<Vec<DaySummary>> {
    if days > MAX_SUMMARY_DAYS {
        return Err(PomodoroError::Configuration {
            message: format!("Summary range of {days} days exceeds {MAX_SUMMARY_DAYS}"),
        });
    }

    blocking(config, move |config| {
        let mut summaries = Vec::new();
        let mut day = end;
        for n in 0..days {
            if n > 0 {
                day = day.yesterday().map_err(|e| PomodoroError::Configuration {
                    message: format!("Summary range out of bounds: {e}"),
                })?;
            }
            summaries.push(summarize(config, day)?);
        }
        summaries.reverse();
        Ok(summaries)
    })
    .await
}

fn summarize(config: &IntervalConfig, day: Date) -> Result<DaySummary> {
    let repo = config.repository();
    Ok(DaySummary {
        day,
        pomodoro: repo.category_summary(day, POMODORO_FILTER)?,
        breaks: repo.category_summary(day, BREAK_FILTER)?,
    })
}
