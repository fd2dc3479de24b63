//! Storage contract for intervals and its two backends.
//!
//! The engine only ever talks to a [`Repository`] trait object, so the
//! volatile [`MemoryRepository`] and the durable [`SqliteRepository`] are
//! interchangeable. The backend is picked once, when the
//! [`IntervalConfig`](crate::IntervalConfig) is built.
//!
//! ```text
//! ┌──────────────┐     ┌──────────────────┐     ┌──────────────────────┐
//! │    Engine    │────▶│ dyn Repository   │────▶│ MemoryRepository     │
//! │ (tick loop)  │     │ (this module)    │     │ SqliteRepository     │
//! └──────────────┘     └──────────────────┘     └──────────────────────┘
//! ```
//!
//! Every method is its own atomic unit. Writes are serialized against each
//! other and against reads: the memory backend holds an `RwLock`, the SQLite
//! backend owns a single connection behind a `Mutex` and wraps writes in a
//! transaction.

use std::time::Duration;

use jiff::civil::Date;

use crate::{error::Result, models::Interval};

pub mod memory;
pub mod sqlite;


pub use memory::MemoryRepository;
pub use sqlite::SqliteRepository;

/// Persistence operations required by the interval engine.
///
/// Implementations must be `Send + Sync`; the engine shares one instance
/// across its background tasks.
pub trait Repository: Send + Sync {
    /// Persists a new interval and returns the id assigned to it.
    ///
    /// The `id` field of the argument is ignored. Ids start at 1, grow
    /// monotonically and are never reused.
    fn create(&self, interval: &Interval) -> Result<u64>;

    /// Overwrites the start time, actual duration and state of the stored
    /// interval with the same id.
    ///
    /// Category and planned duration are fixed at creation and are never
    /// rewritten. Fails with `InvalidId` when the id is 0 or unknown.
    fn update(&self, interval: &Interval) -> Result<()>;

    /// Like [`update`](Repository::update), but only while the stored start
    /// time, actual duration and state still equal those of `current`.
    ///
    /// Returns `false`, writing nothing, when the record has changed since
    /// `current` was read. The check and the write are one atomic step.
    /// Fails with `InvalidId` when the id of `interval` is 0 or unknown.
    fn update_if_unchanged(&self, current: &Interval, interval: &Interval) -> Result<bool>;

    /// Fetches an interval by id. Fails with `InvalidId` when the id is 0 or
    /// unknown.
    fn by_id(&self, id: u64) -> Result<Interval>;

    /// The most recently created interval, or `NoIntervals` when empty.
    fn last(&self) -> Result<Interval>;

    /// Up to `n` break intervals, most recent first.
    fn breaks(&self, n: usize) -> Result<Vec<Interval>>;

    /// Total actual duration of the intervals that started on `day` (local
    /// calendar) and whose category contains `filter`.
    ///
    /// `%` wildcards around the filter are stripped before matching.
    fn category_summary(&self, day: Date, filter: &str) -> Result<Duration>;
}
