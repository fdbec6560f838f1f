//! Harvest command
//!
//! Runs one harvest and always writes the calendar afterwards, even when the
//! harvest came back empty.

use anyhow::{Context, Result};
use tracing::info;

use mainz_events_core::{ClientConfig, Event, EventCalendar, EventScraper, SiteConfig};

use crate::{Cli, Mode};

/// Build the scraper described by the flags.
pub fn build_scraper(cli: &Cli) -> Result<EventScraper> {
    let site = match &cli.origin {
        Some(origin) => SiteConfig::with_origin(origin).context("Invalid --origin")?,
        None => SiteConfig::default(),
    };
    let config = ClientConfig {
        timeout_secs: cli.timeout,
    };

    EventScraper::with_config(config, site).context("Failed to create HTTP client")
}

/// Collect events from the listing according to `--mode` and `--strategy`.
pub async fn harvest(scraper: &EventScraper, cli: &Cli) -> Vec<Event> {
    let strategy = cli.fetch_strategy();
    info!(mode = ?cli.mode, ?strategy, "starting harvest");

    match cli.mode {
        Mode::Previews => scraper.harvest_previews(strategy).await,
        Mode::Links => scraper.harvest_links(strategy).await,
    }
}

/// Add every event to a fresh calendar and write it to `--output`.
pub fn write_calendar(events: &[Event], cli: &Cli) -> Result<EventCalendar> {
    let mut calendar = EventCalendar::new();
    for event in events {
        calendar.add_event(event);
    }

    calendar
        .save(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    Ok(calendar)
}

/// Full run: harvest, optionally print JSON, write the calendar.
pub async fn run(cli: &Cli) -> Result<()> {
    let scraper = build_scraper(cli)?;
    let events = harvest(&scraper, cli).await;

    if cli.json {
        let json = serde_json::to_string_pretty(&events).context("Failed to serialize events")?;
        println!("{}", json);
    }

    let calendar = write_calendar(&events, cli)?;
    println!(
        "Calendar file created successfully: {} ({} events)",
        cli.output.display(),
        calendar.len()
    );
    Ok(())
}
