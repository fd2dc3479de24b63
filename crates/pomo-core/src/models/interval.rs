//! Interval model definition and related functionality.

use std::time::Duration;

use jiff::{civil::Date, tz::TimeZone, Timestamp};
use serde::{Deserialize, Serialize};

use super::{Category, IntervalState};

/// One timed unit of work or rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interval {
    /// Identifier assigned by the repository on creation (0 until then)
    pub id: u64,

    /// When the interval first started running (UTC)
    pub start_time: Option<Timestamp>,

    /// Target length, fixed at creation
    #[serde(with = "millis")]
    pub planned_duration: Duration,

    /// Time accumulated by the tick loop so far
    #[serde(with = "millis")]
    pub actual_duration: Duration,

    /// Kind of interval, fixed at creation
    pub category: Category,

    /// Current lifecycle state
    pub state: IntervalState,
}

impl Interval {
    /// Builds a fresh, not yet persisted interval.
    pub fn new(category: Category, planned_duration: Duration) -> Self {
        Self {
            id: 0,
            start_time: None,
            planned_duration,
            actual_duration: Duration::ZERO,
            category,
            state: IntervalState::NotStarted,
        }
    }

    /// Time left before the interval expires.
    pub fn remaining(&self) -> Duration {
        self.planned_duration.saturating_sub(self.actual_duration)
    }

    /// Whether the interval started on `day` in the system time zone.
    pub fn started_on(&self, day: Date) -> bool {
        self.started_on_in(day, &TimeZone::system())
    }

    /// Whether the interval started on `day` in the given time zone.
    pub fn started_on_in(&self, day: Date, tz: &TimeZone) -> bool {
        self.start_time
            .map(|ts| ts.to_zoned(tz.clone()).date() == day)
            .unwrap_or(false)
    }
}

/// Serializes durations as whole milliseconds.
pub(crate) mod millis {
    use std::time::Duration;

    use serde::{ser::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        let ms = u64::try_from(d.as_millis())
            .map_err(|_| S::Error::custom(format!("duration out of range: {d:?}")))?;
        s.serialize_u64(ms)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}
