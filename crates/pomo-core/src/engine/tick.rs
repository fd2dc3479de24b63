//! The one-second tick loop driving a running interval.

use std::{future::Future, time::Duration};

use log::info;
use tokio::time::{self, Instant};

use super::{load, save_if_unchanged, Callbacks};
use crate::{
    config::IntervalConfig,
    error::Result,
    models::{Interval, IntervalState},
};

pub(crate) const TICK: Duration = Duration::from_secs(1);

/// Advances interval `id` once per second until it is done, paused or
/// cancelled.
///
/// Every event re-reads the interval from storage and writes back only if
/// the record has not changed in between. A refused write means someone
/// else moved the interval on (usually a pause), and the loop leaves
/// without invoking further callbacks. Events ready at the same time are
/// handled in the order cancel, tick, expiry.
pub(crate) async fn run<C>(
    config: &IntervalConfig,
    id: u64,
    cancel: C,
    mut callbacks: Callbacks,
) -> Result<()>
where
    C: Future<Output = ()>,
{
    let interval = load(config, id).await?;

    let expiry = time::sleep(interval.remaining());
    tokio::pin!(expiry, cancel);
    let mut ticker = time::interval_at(Instant::now() + TICK, TICK);

    callbacks.started(&interval);

    loop {
        tokio::select! {
            biased;

            () = &mut cancel => {
                // Cancellation wins over a concurrent tick or pause: retry
                // until the write lands or the interval is already over.
                loop {
                    let current = load(config, id).await?;
                    if current.state.is_terminal() {
                        return Ok(());
                    }
                    let cancelled = Interval {
                        state: IntervalState::Cancelled,
                        ..current.clone()
                    };
                    let actual = cancelled.actual_duration;
                    if save_if_unchanged(config, current, cancelled).await? {
                        info!("Interval {id} cancelled after {actual:?}");
                        return Ok(());
                    }
                }
            }

            _ = ticker.tick() => {
                let current = load(config, id).await?;
                if current.state != IntervalState::Running {
                    return leave(&current);
                }

                let mut interval = current.clone();
                interval.actual_duration =
                    (interval.actual_duration + TICK).min(interval.planned_duration);
                let finished = interval.actual_duration >= interval.planned_duration;
                if finished {
                    interval.state = IntervalState::Done;
                }
                if !save_if_unchanged(config, current, interval.clone()).await? {
                    return leave(&load(config, id).await?);
                }

                callbacks.ticked(&interval);
                if finished {
                    info!("Interval {id} done");
                    callbacks.ended(&interval);
                    return Ok(());
                }
            }

            () = &mut expiry => {
                let current = load(config, id).await?;
                if current.state != IntervalState::Running {
                    return leave(&current);
                }
                let done = Interval {
                    state: IntervalState::Done,
                    ..current.clone()
                };
                callbacks.ended(&done);
                if !save_if_unchanged(config, current, done).await? {
                    return leave(&load(config, id).await?);
                }
                info!("Interval {id} done");
                return Ok(());
            }
        }
    }
}

fn leave(interval: &Interval) -> Result<()> {
    info!(
        "Interval {} is {}, leaving tick loop",
        interval.id,
        interval.state.as_str()
    );
    Ok(())
}
