//! Mainz Events command line front end
//!
//! Thin wrapper over `mainz-events-core`: parse flags, run one harvest,
//! write the calendar file.
//!
//! # Usage
//!
//! ```text
//! mainz-events --mode previews --strategy parallel --output mainz-events.ics
//! mainz-events --mode links --strategy sequential --json
//! ```

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use mainz_events_core::{FetchStrategy, DEFAULT_BATCH_SIZE, DEFAULT_CALENDAR_FILE};

/// Which listing records drive the harvest
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Use listing teasers directly, no detail page requests
    Previews,
    /// Collect detail links and scrape every event page
    Links,
}

/// How listing pages are fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// One page after another
    Sequential,
    /// Concurrent rounds of `--batch-size` pages
    Parallel,
}

#[derive(Debug, Parser)]
#[command(name = "mainz-events")]
#[command(about = "Harvest the mainz.de event calendar into an iCalendar file")]
pub struct Cli {
    /// Records to harvest
    #[arg(long, value_enum, default_value_t = Mode::Previews)]
    pub mode: Mode,

    /// Pagination strategy
    #[arg(long, value_enum, default_value_t = Strategy::Parallel)]
    pub strategy: Strategy,

    /// Pages per round for the parallel strategy
    #[arg(long, default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,

    /// Calendar file to write
    #[arg(short, long, default_value = DEFAULT_CALENDAR_FILE)]
    pub output: PathBuf,

    /// Site origin, for mirrors
    #[arg(long)]
    pub origin: Option<String>,

    /// Per-request timeout in seconds (no timeout by default)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Also print harvested events as JSON on stdout
    #[arg(long)]
    pub json: bool,

    /// Debug logging for the scraper crates
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Fetch strategy selected by the flags
    pub fn fetch_strategy(&self) -> FetchStrategy {
        match self.strategy {
            Strategy::Sequential => FetchStrategy::Sequential,
            Strategy::Parallel => FetchStrategy::Batched {
                batch_size: self.batch_size,
            },
        }
    }
}
