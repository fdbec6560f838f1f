//! Main Mainz events scraper API
//!
//! Combines the page fetcher with the listing and detail parsers: build
//! paginators over links or previews, scrape single event pages, or run a
//! whole harvest that ends in a list of [`Event`]s ready for the calendar.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use crate::client::{ClientConfig, HttpClient, PageFetcher};
use crate::error::{Result, ScrapeError};
use crate::paginator::{FetchStrategy, Paginator};
use crate::parser::{parse_event_detail, LinkParser, PreviewParser};
use crate::site::SiteConfig;
use crate::types::Event;

/// Main scraper API for the mainz.de event calendar
///
/// # Example
/// ```no_run
/// use mainz_events_core::{EventScraper, FetchStrategy};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = EventScraper::new()?;
///
///     let events = scraper.harvest_previews(FetchStrategy::batched()).await;
///     println!("Found {} events", events.len());
///
///     Ok(())
/// }
/// ```
pub struct EventScraper {
    fetcher: Arc<dyn PageFetcher>,
    site: SiteConfig,
}

impl EventScraper {
    /// Create a scraper for mainz.de with the default HTTP client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default(), SiteConfig::default())
    }

    /// Create a scraper with a custom client configuration and site.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(config: ClientConfig, site: SiteConfig) -> Result<Self> {
        let client = HttpClient::with_config(config)?;
        Ok(Self::with_fetcher(Arc::new(client), site))
    }

    /// Create a scraper on top of any page fetcher.
    pub fn with_fetcher(fetcher: Arc<dyn PageFetcher>, site: SiteConfig) -> Self {
        Self { fetcher, site }
    }

    /// Paginator over every event detail link in the listing.
    pub fn links(&self, strategy: FetchStrategy) -> Paginator<LinkParser> {
        Paginator::new(Arc::clone(&self.fetcher), LinkParser, self.site.clone(), strategy)
    }

    /// Paginator over every teaser preview in the listing.
    pub fn previews(&self, strategy: FetchStrategy) -> Paginator<PreviewParser> {
        Paginator::new(Arc::clone(&self.fetcher), PreviewParser, self.site.clone(), strategy)
    }

    /// Fetch and parse a single event page.
    ///
    /// # Returns
    /// * `Ok(Event)` with the parsed event
    /// * `Err(ScrapeError::InvalidUrl)` if `url` is not an absolute URL
    /// * `Err(ScrapeError::Transport)` / `Err(ScrapeError::Status)` if the fetch fails
    /// * `Err(ScrapeError::ContentNotFound)` if the page has no event content
    pub async fn scrape_event(&self, url: &str) -> Result<Event> {
        Url::parse(url).map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", url, e)))?;

        let html = self.fetcher.fetch(url).await?;
        parse_event_detail(&html)
    }

    /// Turn every titled listing preview into an event, without visiting
    /// detail pages. The preview link becomes the event description.
    pub async fn harvest_previews(&self, strategy: FetchStrategy) -> Vec<Event> {
        let previews = self.previews(strategy).collect_all().await;
        let total = previews.len();

        let events: Vec<Event> = previews
            .into_iter()
            .filter(|preview| !preview.title.is_empty())
            .map(Event::from)
            .collect();

        info!(previews = total, events = events.len(), "harvested previews");
        events
    }

    /// Collect every detail link and scrape each page once.
    ///
    /// Links are deduplicated in first-seen order. Pages that fail to
    /// scrape are logged and skipped.
    pub async fn harvest_links(&self, strategy: FetchStrategy) -> Vec<Event> {
        let links = self.links(strategy).collect_all().await;

        let mut seen = HashSet::new();
        let unique: Vec<String> = links
            .into_iter()
            .filter(|link| seen.insert(link.clone()))
            .collect();

        let mut events = Vec::with_capacity(unique.len());
        for link in &unique {
            match self.scrape_event(link).await {
                Ok(event) => events.push(event),
                Err(error) => warn!(url = %link, %error, "skipping event"),
            }
        }

        info!(links = unique.len(), events = events.len(), "harvested detail pages");
        events
    }
}
