//! Caller-supplied handlers invoked by the tick loop.

use std::fmt;

use log::error;
use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use crate::models::Interval;

/// A fallible handler receiving the freshly persisted interval.
pub type Callback = Box<dyn FnMut(&Interval) -> anyhow::Result<()> + Send>;

/// The loop event a callback was invoked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackPhase {
    Start,
    Tick,
    End,
}

impl fmt::Display for CallbackPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CallbackPhase::Start => "start",
            CallbackPhase::Tick => "tick",
            CallbackPhase::End => "end",
        })
    }
}

/// Failure raised by a callback.
///
/// Delivered on the channel given to [`Callbacks::report_errors`], never as
/// the tick loop's own result.
#[derive(Error, Debug)]
#[error("{phase} callback failed for interval {interval_id}: {cause:#}")]
pub struct CallbackError {
    pub phase: CallbackPhase,
    pub interval_id: u64,
    pub cause: anyhow::Error,
}

/// The `on_start`, `on_tick` and `on_end` handlers for one run of the tick
/// loop. Unset handlers do nothing.
///
/// ```rust
/// use pomo_core::Callbacks;
/// use tokio::sync::mpsc;
///
/// let (errors_tx, _errors_rx) = mpsc::unbounded_channel();
/// let callbacks = Callbacks::new()
///     .on_tick(|interval| {
///         println!("{:?} elapsed", interval.actual_duration);
///         Ok(())
///     })
///     .report_errors(errors_tx);
/// ```
pub struct Callbacks {
    on_start: Callback,
    on_tick: Callback,
    on_end: Callback,
    errors: Option<UnboundedSender<CallbackError>>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self {
            on_start: Box::new(|_| Ok(())),
            on_tick: Box::new(|_| Ok(())),
            on_end: Box::new(|_| Ok(())),
            errors: None,
        }
    }

    /// Invoked once, before the first tick.
    pub fn on_start<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Interval) -> anyhow::Result<()> + Send + 'static,
    {
        self.on_start = Box::new(f);
        self
    }

    /// Invoked after every persisted one-second tick.
    pub fn on_tick<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Interval) -> anyhow::Result<()> + Send + 'static,
    {
        self.on_tick = Box::new(f);
        self
    }

    /// Invoked once when the interval reaches `Done`. Not invoked on pause
    /// or cancellation.
    pub fn on_end<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Interval) -> anyhow::Result<()> + Send + 'static,
    {
        self.on_end = Box::new(f);
        self
    }

    /// Sends callback failures to `errors`. Without a channel they are
    /// logged at error level.
    pub fn report_errors(mut self, errors: UnboundedSender<CallbackError>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub(crate) fn started(&mut self, interval: &Interval) {
        let result = (self.on_start)(interval);
        self.report(CallbackPhase::Start, interval, result);
    }

    pub(crate) fn ticked(&mut self, interval: &Interval) {
        let result = (self.on_tick)(interval);
        self.report(CallbackPhase::Tick, interval, result);
    }

    pub(crate) fn ended(&mut self, interval: &Interval) {
        let result = (self.on_end)(interval);
        self.report(CallbackPhase::End, interval, result);
    }

    fn report(&self, phase: CallbackPhase, interval: &Interval, result: anyhow::Result<()>) {
        let Err(cause) = result else {
            return;
        };
        let err = CallbackError {
            phase,
            interval_id: interval.id,
            cause,
        };

        match &self.errors {
            Some(errors) => {
                // The receiver is gone; nobody else will see this failure.
                if let Err(unsent) = errors.send(err) {
                    error!("{}", unsent.0);
                }
            }
            None => error!("{err}"),
        }
    }
}

impl Default for Callbacks {
    fn default() -> Self {
        Self::new()
    }
}
