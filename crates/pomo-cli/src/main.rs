//! pomo CLI Application
//!
//! Command-line Pomodoro timer built on `pomo-core`.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use pomo_core::ConfigBuilder;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        in_memory,
        pomo,
        short,
        long,
        no_color,
        command,
    } = Args::parse();

    let mut builder = ConfigBuilder::new()
        .with_database_path(database_file)
        .with_pomodoro_duration(pomo)
        .with_short_break_duration(short)
        .with_long_break_duration(long);
    if in_memory {
        builder = builder.in_memory();
    }
    let config = builder
        .build()
        .await
        .context("Failed to initialize interval storage")?;

    let cli = Cli::new(config, TerminalRenderer::new(!no_color));

    info!("pomo started");

    match command.unwrap_or(Status { json: false }) {
        Start => cli.start().await,
        Pause => cli.pause().await,
        Status { json } => cli.status(json).await,
        Summary { days } => cli.summary(usize::from(days)).await,
    }
}
