//! Repository operations for the SQLite backend.

use std::time::Duration;

use jiff::{civil::Date, tz::TimeZone, SignedDuration, Timestamp};
use rusqlite::{params, types::Type, OptionalExtension, Row};

use super::SqliteRepository;
use crate::{
    error::{PomodoroError, Result, StorageResultExt},
    models::{Category, Interval, IntervalState},
    repository::Repository,
};

const SELECT_INTERVAL: &str =
    "SELECT id, start_time, planned_duration, actual_duration, category, state FROM interval";

/// Raw column values of one interval row.
struct IntervalRow {
    id: i64,
    start_time: Option<String>,
    planned_duration: i64,
    actual_duration: i64,
    category: String,
    state: i64,
}

impl IntervalRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            start_time: row.get(1)?,
            planned_duration: row.get(2)?,
            actual_duration: row.get(3)?,
            category: row.get(4)?,
            state: row.get(5)?,
        })
    }

    fn into_interval(self) -> Result<Interval> {
        let start_time = self
            .start_time
            .map(|s| s.parse::<Timestamp>().map_err(|e| conversion_error(1, e)))
            .transpose()?;
        let category = self
            .category
            .parse::<Category>()
            .map_err(|e| conversion_error(4, e))?;

        Ok(Interval {
            id: self.id as u64,
            start_time,
            planned_duration: from_millis(self.planned_duration),
            actual_duration: from_millis(self.actual_duration),
            category,
            state: IntervalState::from_code(self.state)?,
        })
    }
}

fn conversion_error(column: usize, e: impl ToString) -> PomodoroError {
    PomodoroError::storage("Failed to decode interval row").with_source(
        rusqlite::Error::FromSqlConversionFailure(
            column,
            Type::Text,
            Box::new(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                e.to_string(),
            )),
        ),
    )
}

fn to_millis(d: Duration) -> Result<i64> {
    i64::try_from(d.as_millis()).map_err(|_| PomodoroError::DurationOutOfRange { duration: d })
}

fn from_millis(ms: i64) -> Duration {
    Duration::from_millis(ms.max(0) as u64)
}

/// UTC bounds of the local calendar `day`, widened by one second each way.
///
/// Stored timestamps have a variable number of fractional digits, so text
/// comparison is only exact to the second. Rows are checked against the
/// day again after decoding.
fn day_bounds(day: Date) -> Result<(String, String)> {
    let out_of_range = |e: jiff::Error| PomodoroError::Configuration {
        message: format!("Summary day out of range: {e}"),
    };
    let tz = TimeZone::system();
    let slack = SignedDuration::from_secs(1);

    let start = day
        .to_zoned(tz.clone())
        .and_then(|z| z.timestamp().checked_sub(slack))
        .map_err(out_of_range)?;
    let end = day
        .tomorrow()
        .and_then(|d| d.to_zoned(tz))
        .and_then(|z| z.timestamp().checked_add(slack))
        .map_err(out_of_range)?;

    Ok((start.to_string(), end.to_string()))
}

fn category_summary_query() -> String {
    format!(
        "{SELECT_INTERVAL} WHERE start_time >= ?2 AND start_time < ?3 AND instr(category, ?1) > 0"
    )
}

impl Repository for SqliteRepository {
    fn create(&self, interval: &Interval) -> Result<u64> {
        let mut connection = self.connection()?;
        let tx = connection
            .transaction()
            .storage_context("Failed to begin transaction")?;

        tx.execute(
            "INSERT INTO interval (start_time, planned_duration, actual_duration, category, state) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                interval.start_time.map(|ts| ts.to_string()),
                to_millis(interval.planned_duration)?,
                to_millis(interval.actual_duration)?,
                interval.category.as_str(),
                interval.state.code(),
            ],
        )
        .storage_context("Failed to insert interval")?;

        let id = tx.last_insert_rowid() as u64;

        tx.commit().storage_context("Failed to commit transaction")?;

        Ok(id)
    }

    fn update(&self, interval: &Interval) -> Result<()> {
        if interval.id == 0 {
            return Err(PomodoroError::InvalidId { id: 0 });
        }

        let mut connection = self.connection()?;
        let tx = connection
            .transaction()
            .storage_context("Failed to begin transaction")?;

        let changed = tx
            .execute(
                "UPDATE interval SET start_time = ?1, actual_duration = ?2, state = ?3 WHERE id = ?4",
                params![
                    interval.start_time.map(|ts| ts.to_string()),
                    to_millis(interval.actual_duration)?,
                    interval.state.code(),
                    interval.id as i64,
                ],
            )
            .storage_context("Failed to update interval")?;

        if changed == 0 {
            return Err(PomodoroError::InvalidId { id: interval.id });
        }

        tx.commit().storage_context("Failed to commit transaction")?;

        Ok(())
    }

    fn update_if_unchanged(&self, current: &Interval, interval: &Interval) -> Result<bool> {
        if interval.id == 0 {
            return Err(PomodoroError::InvalidId { id: 0 });
        }

        let mut connection = self.connection()?;
        let tx = connection
            .transaction()
            .storage_context("Failed to begin transaction")?;

        // `IS` so that a NULL start time compares equal to NULL.
        let changed = tx
            .execute(
                "UPDATE interval SET start_time = ?1, actual_duration = ?2, state = ?3 \
                 WHERE id = ?4 AND start_time IS ?5 AND actual_duration = ?6 AND state = ?7",
                params![
                    interval.start_time.map(|ts| ts.to_string()),
                    to_millis(interval.actual_duration)?,
                    interval.state.code(),
                    interval.id as i64,
                    current.start_time.map(|ts| ts.to_string()),
                    to_millis(current.actual_duration)?,
                    current.state.code(),
                ],
            )
            .storage_context("Failed to update interval")?;

        if changed == 0 {
            let exists: bool = tx
                .query_row(
                    "SELECT EXISTS(SELECT 1 FROM interval WHERE id = ?1)",
                    params![interval.id as i64],
                    |row| row.get(0),
                )
                .storage_context("Failed to look up interval")?;
            if !exists {
                return Err(PomodoroError::InvalidId { id: interval.id });
            }
            return Ok(false);
        }

        tx.commit().storage_context("Failed to commit transaction")?;

        Ok(true)
    }

    fn by_id(&self, id: u64) -> Result<Interval> {
        if id == 0 {
            return Err(PomodoroError::InvalidId { id });
        }

        let connection = self.connection()?;
        let row = connection
            .query_row(
                &format!("{SELECT_INTERVAL} WHERE id = ?1"),
                params![id as i64],
                IntervalRow::from_row,
            )
            .optional()
            .storage_context("Failed to load interval")?;

        match row {
            Some(row) => row.into_interval(),
            None => Err(PomodoroError::InvalidId { id }),
        }
    }

    fn last(&self) -> Result<Interval> {
        let connection = self.connection()?;
        let row = connection
            .query_row(
                &format!("{SELECT_INTERVAL} ORDER BY id DESC LIMIT 1"),
                [],
                IntervalRow::from_row,
            )
            .optional()
            .storage_context("Failed to load last interval")?;

        match row {
            Some(row) => row.into_interval(),
            None => Err(PomodoroError::NoIntervals),
        }
    }

    fn breaks(&self, n: usize) -> Result<Vec<Interval>> {
        let connection = self.connection()?;
        let mut stmt = connection
            .prepare(&format!(
                "{SELECT_INTERVAL} WHERE category IN (?1, ?2) ORDER BY id DESC LIMIT ?3"
            ))
            .storage_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(
                params![
                    Category::ShortBreak.as_str(),
                    Category::LongBreak.as_str(),
                    n as i64
                ],
                IntervalRow::from_row,
            )
            .storage_context("Failed to query breaks")?;

        let mut breaks = Vec::new();
        for row in rows {
            let row = row.storage_context("Failed to read break row")?;
            breaks.push(row.into_interval()?);
        }
        Ok(breaks)
    }

    fn category_summary(&self, day: Date, filter: &str) -> Result<Duration> {
        let filter = filter.trim_matches('%');
        let (from, until) = day_bounds(day)?;

        let connection = self.connection()?;
        // instr() keeps the match case-sensitive, unlike LIKE. The final day
        // check happens in Rust so it follows the same local calendar as the
        // memory backend.
        let mut stmt = connection
            .prepare(&category_summary_query())
            .storage_context("Failed to prepare query")?;

        let rows = stmt
            .query_map(params![filter, from, until], IntervalRow::from_row)
            .storage_context("Failed to query category summary")?;

        let mut total = Duration::ZERO;
        for row in rows {
            let interval = row
                .storage_context("Failed to read summary row")?
                .into_interval()?;
            if interval.started_on(day) {
                total += interval.actual_duration;
            }
        }
        Ok(total)
    }
}
