use std::{path::PathBuf, time::Duration};

use clap::{Parser, Subcommand};
use jiff::SignedDuration;
use pomo_core::MAX_SUMMARY_DAYS;

/// A Pomodoro timer for the terminal
///
/// Alternates focused work intervals with short breaks, and a long break
/// after every fourth pomodoro. History is kept in a SQLite database so that
/// intervals can be paused and resumed across runs.
#[derive(Parser)]
#[command(version, about, name = "pomo")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/pomo/pomo.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Keep the history in memory only; nothing is saved
    #[arg(long, global = true, conflicts_with = "database_file")]
    pub in_memory: bool,

    /// Pomodoro duration, e.g. `25m`, `1h 10m` or `PT25M`
    #[arg(long, global = true, default_value = "25m", value_parser = parse_duration)]
    pub pomo: Duration,

    /// Short break duration
    #[arg(long, global = true, default_value = "5m", value_parser = parse_duration)]
    pub short: Duration,

    /// Long break duration
    #[arg(long, global = true, default_value = "15m", value_parser = parse_duration)]
    pub long: Duration,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without one, `status` is shown.
#[derive(Subcommand)]
pub enum Commands {
    /// Start or resume the current interval; Ctrl-C cancels it
    #[command(alias = "s")]
    Start,
    /// Pause the running interval
    #[command(alias = "p")]
    Pause,
    /// Show the most recent interval
    Status {
        /// Print the interval as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show time spent today and over the last days
    Summary {
        /// Number of days in the series, ending today
        #[arg(
            long,
            default_value_t = 7,
            value_parser = clap::value_parser!(u16).range(1..=MAX_SUMMARY_DAYS as i64)
        )]
        days: u16,
    },
}

/// Parses friendly (`25m`, `1h 30m`) and ISO 8601 (`PT25M`) durations.
fn parse_duration(s: &str) -> Result<Duration, String> {
    let duration: SignedDuration = s
        .parse()
        .map_err(|e| format!("invalid duration '{s}': {e}"))?;
    Duration::try_from(duration).map_err(|_| format!("invalid duration '{s}': must not be negative"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_formats() {
        assert_eq!(parse_duration("25m"), Ok(Duration::from_secs(1500)));
        assert_eq!(parse_duration("1h 30m"), Ok(Duration::from_secs(5400)));
        assert_eq!(parse_duration("PT5M"), Ok(Duration::from_secs(300)));
        assert_eq!(parse_duration("90s"), Ok(Duration::from_secs(90)));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration("soon").unwrap_err().contains("invalid duration 'soon'"));
        assert!(parse_duration("-5m").unwrap_err().contains("must not be negative"));
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["pomo"]);
        assert_eq!(args.pomo, Duration::from_secs(25 * 60));
        assert_eq!(args.short, Duration::from_secs(5 * 60));
        assert_eq!(args.long, Duration::from_secs(15 * 60));
        assert!(args.command.is_none());
    }

    #[test]
    fn test_summary_days_are_bounded() {
        let parsed = Args::parse_from(["pomo", "summary"]);
        assert!(matches!(parsed.command, Some(Commands::Summary { days: 7 })));

        let parsed = Args::parse_from(["pomo", "summary", "--days", "3660"]);
        assert!(matches!(parsed.command, Some(Commands::Summary { days: 3660 })));

        for days in ["0", "3661", "18446744073709551615"] {
            assert!(
                Args::try_parse_from(["pomo", "summary", "--days", days]).is_err(),
                "{days}"
            );
        }
    }

    #[test]
    fn test_in_memory_conflicts_with_database_file() {
        let parsed = Args::try_parse_from(["pomo", "--in-memory", "--database-file", "x.db"]);
        assert!(parsed.is_err());
    }
}
