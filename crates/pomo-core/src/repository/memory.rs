//! Volatile repository backed by a vector behind a read/write lock.

use std::{
    sync::{RwLock, RwLockReadGuard, RwLockWriteGuard},
    time::Duration,
};

use jiff::civil::Date;

use super::Repository;
use crate::{
    error::{PomodoroError, Result},
    models::Interval,
};

/// In-process interval store. History is lost when the process exits.
///
/// Ids are positions in the backing vector plus one, so they are dense,
/// start at 1 and are never reused (nothing is ever removed).
#[derive(Debug, Default)]
pub struct MemoryRepository {
    intervals: RwLock<Vec<Interval>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Interval>>> {
        self.intervals
            .read()
            .map_err(|_| PomodoroError::LockPoisoned { resource: "intervals" })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Interval>>> {
        self.intervals
            .write()
            .map_err(|_| PomodoroError::LockPoisoned { resource: "intervals" })
    }

    fn index(id: u64, len: usize) -> Result<usize> {
        match id {
            0 => Err(PomodoroError::InvalidId { id }),
            _ if id as usize > len => Err(PomodoroError::InvalidId { id }),
            _ => Ok(id as usize - 1),
        }
    }
}

impl Repository for MemoryRepository {
    fn create(&self, interval: &Interval) -> Result<u64> {
        let mut intervals = self.write()?;

        let id = intervals.len() as u64 + 1;
        intervals.push(Interval {
            id,
            ..interval.clone()
        });

        Ok(id)
    }

    fn update(&self, interval: &Interval) -> Result<()> {
        let mut intervals = self.write()?;

        let index = Self::index(interval.id, intervals.len())?;
        let stored = &mut intervals[index];
        stored.start_time = interval.start_time;
        stored.actual_duration = interval.actual_duration;
        stored.state = interval.state;

        Ok(())
    }

    fn update_if_unchanged(&self, current: &Interval, interval: &Interval) -> Result<bool> {
        let mut intervals = self.write()?;

        let index = Self::index(interval.id, intervals.len())?;
        let stored = &mut intervals[index];
        if stored.start_time != current.start_time
            || stored.actual_duration != current.actual_duration
            || stored.state != current.state
        {
            return Ok(false);
        }
        stored.start_time = interval.start_time;
        stored.actual_duration = interval.actual_duration;
        stored.state = interval.state;

        Ok(true)
    }

    fn by_id(&self, id: u64) -> Result<Interval> {
        let intervals = self.read()?;

        let index = Self::index(id, intervals.len())?;
        Ok(intervals[index].clone())
    }

    fn last(&self) -> Result<Interval> {
        self.read()?
            .last()
            .cloned()
            .ok_or(PomodoroError::NoIntervals)
    }

    fn breaks(&self, n: usize) -> Result<Vec<Interval>> {
        Ok(self
            .read()?
            .iter()
            .rev()
            .filter(|i| i.category.is_break())
            .take(n)
            .cloned()
            .collect())
    }

    fn category_summary(&self, day: Date, filter: &str) -> Result<Duration> {
        Ok(self
            .read()?
            .iter()
            .filter(|i| i.started_on(day) && i.category.matches_filter(filter))
            .map(|i| i.actual_duration)
            .sum())
    }
}
