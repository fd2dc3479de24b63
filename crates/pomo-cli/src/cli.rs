//! Command handlers for the `pomo` binary.

use std::future;

use anyhow::{bail, Context, Result};
use jiff::Zoned;
use log::info;
use pomo_core::{
    current_interval, daily_summary, last_interval, range_summary, CallbackError, Callbacks, Clock,
    Interval, IntervalConfig, IntervalState, PomodoroError, SummaryTable,
};
use tokio::{signal, sync::mpsc};

use crate::renderer::TerminalRenderer;

pub struct Cli {
    config: IntervalConfig,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(config: IntervalConfig, renderer: TerminalRenderer) -> Self {
        Self { config, renderer }
    }

    /// Starts or resumes the current interval and shows its countdown until
    /// it ends.
    ///
    /// Ctrl-C cancels the interval. So does the first failing callback, whose
    /// error is then returned after the final state is shown.
    pub async fn start(&self) -> Result<()> {
        let interval = current_interval(&self.config)
            .await
            .context("Failed to get the current interval")?;

        if interval.state == IntervalState::Running {
            self.renderer.render(&format!(
                "Interval {} is already running. If no other `pomo start` owns it, \
                 run `pomo pause` and then `pomo start` to take it over.\n",
                interval.id
            ))?;
            return Ok(());
        }

        self.renderer.render(&interval.to_string())?;
        println!();

        let progress = self.renderer.progress();
        let callbacks = Callbacks::new()
            .on_tick(move |i| Ok(progress.print(i)?))
            .on_end(move |_| Ok(progress.finish()?));

        let failure = run_interval(&self.config, &interval, callbacks).await?;

        if let Some(last) = last_interval(&self.config).await? {
            if last.state != IntervalState::Done {
                progress.finish()?;
            }
            self.renderer
                .render(&format!("{} {}\n", last.category, last.state.with_icon()))?;
        }

        match failure {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    /// Pauses the most recent interval.
    pub async fn pause(&self) -> Result<()> {
        let Some(interval) = last_interval(&self.config).await? else {
            bail!("No interval to pause");
        };

        match interval.pause(&self.config).await {
            Ok(()) => {
                self.renderer.render(&format!(
                    "Paused interval {} at {}. Run `pomo start` to resume.\n",
                    interval.id,
                    Clock(interval.actual_duration)
                ))?;
                Ok(())
            }
            Err(PomodoroError::IntervalNotRunning) => {
                bail!("Interval {} is not running", interval.id)
            }
            Err(e) => Err(e).context("Failed to pause interval"),
        }
    }

    /// Shows the most recent interval without creating one.
    pub async fn status(&self, json: bool) -> Result<()> {
        let last = last_interval(&self.config)
            .await
            .context("Failed to load the last interval")?;

        if json {
            println!("{}", serde_json::to_string_pretty(&last)?);
            return Ok(());
        }

        match last {
            Some(interval) => self.renderer.render(&interval.to_string()),
            None => self
                .renderer
                .render("No intervals yet. Run `pomo start` to begin.\n"),
        }
    }

    /// Shows today's totals followed by a table for the last `days` days.
    pub async fn summary(&self, days: usize) -> Result<()> {
        let today = Zoned::now().date();
        let daily = daily_summary(&self.config, today)
            .await
            .context("Failed to summarize today")?;
        let range = range_summary(&self.config, today, days)
            .await
            .context("Failed to summarize the last days")?;

        let mut output = format!("# Today\n\n{daily}\n# Last {days} days\n\n");
        output.push_str(&SummaryTable(&range).to_string());
        self.renderer.render(&output)
    }
}

/// Runs `interval` until it ends and returns the first callback failure.
///
/// Ctrl-C cancels the interval, and so does a failure while it is running.
/// Failures raised by the last tick or by `on_end` arrive after the loop has
/// finished and are picked up from the channel afterwards.
async fn run_interval(
    config: &IntervalConfig,
    interval: &Interval,
    callbacks: Callbacks,
) -> Result<Option<CallbackError>> {
    let (errors_tx, mut errors_rx) = mpsc::unbounded_channel();
    let callbacks = callbacks.report_errors(errors_tx);

    let mut failure: Option<CallbackError> = None;
    let cancel = async {
        tokio::select! {
            Ok(()) = signal::ctrl_c() => info!("Interrupted"),
            Some(err) = errors_rx.recv() => failure = Some(err),
            else => future::pending().await,
        }
    };

    interval
        .start(config, cancel, callbacks)
        .await
        .with_context(|| format!("Failed to run interval {}", interval.id))?;

    Ok(failure.or_else(|| errors_rx.try_recv().ok()))
}
