//! Terminal rendering for markdown output and the live progress line.

use std::io::{self, Write};

use anyhow::Result;
use pomo_core::{Clock, Interval};
use termimad::{crossterm::style::Color, MadSkin};

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Red);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render markdown text to the terminal
    pub fn render(&self, markdown: &str) -> Result<()> {
        if self.rich_enabled {
            for line in markdown.lines() {
                if line.starts_with('#') {
                    println!("\x1b[31m{line}\x1b[0m");
                } else {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        } else {
            print!("{markdown}");
        }
        Ok(())
    }

    /// A printer for the live countdown, detached from the skin so that
    /// tick callbacks can own it.
    pub fn progress(&self) -> Progress {
        Progress {
            rich_enabled: self.rich_enabled,
        }
    }
}

/// Rewrites the current terminal line with an interval's countdown.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    rich_enabled: bool,
}

impl Progress {
    pub fn print(&self, interval: &Interval) -> io::Result<()> {
        let line = progress_line(interval);
        let mut stdout = io::stdout().lock();
        if self.rich_enabled {
            write!(stdout, "\r\x1b[2K\x1b[1m{line}\x1b[0m")?;
        } else {
            write!(stdout, "\r{line}")?;
        }
        stdout.flush()
    }

    /// Ends the progress line.
    pub fn finish(&self) -> io::Result<()> {
        writeln!(io::stdout())
    }
}

fn progress_line(interval: &Interval) -> String {
    format!(
        "{} {} / {} ({} left)",
        interval.category,
        Clock(interval.actual_duration),
        Clock(interval.planned_duration),
        Clock(interval.remaining())
    )
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}
