//! Display implementations for domain models.

use std::fmt;

use super::datetime::{Clock, LocalDateTime};
use crate::{
    engine::DaySummary,
    models::{Category, Interval, IntervalState},
};

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for IntervalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "# {}. {} ({})",
            self.id,
            self.category,
            self.state.with_icon()
        )?;
        writeln!(f)?;

        writeln!(f, "- Planned: {}", Clock(self.planned_duration))?;
        writeln!(f, "- Elapsed: {}", Clock(self.actual_duration))?;
        if !self.state.is_terminal() {
            writeln!(f, "- Remaining: {}", Clock(self.remaining()))?;
        }
        match &self.start_time {
            Some(ts) => writeln!(f, "- Started: {}", LocalDateTime(ts))?,
            None => writeln!(f, "- Started: not yet")?,
        }

        Ok(())
    }
}

impl fmt::Display for DaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.day)?;
        writeln!(f)?;
        writeln!(f, "- **Pomodoro**: {}", Clock(self.pomodoro))?;
        writeln!(f, "- **Break**: {}", Clock(self.breaks))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_interval_display() {
        let interval = Interval {
            id: 4,
            actual_duration: Duration::from_secs(90),
            state: IntervalState::Paused,
            ..Interval::new(Category::Pomodoro, Duration::from_secs(25 * 60))
        };
        let output = interval.to_string();

        assert!(output.starts_with("# 4. Pomodoro (⏸ Paused)"), "{output}");
        assert!(output.contains("- Elapsed: 01:30"));
        assert!(output.contains("- Remaining: 23:30"));
        assert!(output.contains("- Started: not yet"));
    }

    #[test]
    fn test_finished_interval_hides_remaining() {
        let interval = Interval {
            id: 1,
            actual_duration: Duration::from_secs(300),
            state: IntervalState::Done,
            start_time: Some(jiff::Timestamp::now()),
            ..Interval::new(Category::ShortBreak, Duration::from_secs(300))
        };
        let output = interval.to_string();

        assert!(output.contains("✓ Done"));
        assert!(!output.contains("Remaining"));
        assert!(!output.contains("not yet"));
    }

    #[test]
    fn test_day_summary_display() {
        let summary = DaySummary {
            day: date(2025, 3, 1),
            pomodoro: Duration::from_secs(50 * 60),
            breaks: Duration::from_secs(10 * 60),
        };
        let output = summary.to_string();

        assert!(output.starts_with("## 2025-03-01"));
        assert!(output.contains("- **Pomodoro**: 50:00"));
        assert!(output.contains("- **Break**: 10:00"));
    }
}
