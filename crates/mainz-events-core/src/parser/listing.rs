//! Listing page parsers for mainz.de
//!
//! A listing page is one page of the paginated event calendar. It can be read
//! two ways: as a bag of detail links, or as teaser previews carrying title,
//! location and start/end timestamps.

use chrono::{DateTime, FixedOffset};
use scraper::{ElementRef, Html};
use tracing::debug;

use crate::error::Result;
use crate::site::SiteConfig;
use crate::types::EventPreview;

use super::{select_attr, select_text, selector};

/// Timestamp format of the `startDate`/`endDate` meta tags (e.g. `2025-03-16T18:00:00+0100`)
const LISTING_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Extracts records from one listing page.
///
/// Parsing is best effort: a node with missing fields still yields a record
/// with empty values, and an empty `Vec` means the page had no events.
pub trait ListingParser: Send + Sync + 'static {
    /// Record produced per matching node
    type Record: Send + 'static;

    /// Parse the raw HTML of a listing page.
    ///
    /// # Errors
    /// Returns `ScrapeError::MarkupParse` if a selector cannot be compiled.
    fn parse(&self, html: &str, site: &SiteConfig) -> Result<Vec<Self::Record>>;
}

/// Collects every event detail link on a listing page.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkParser;

impl ListingParser for LinkParser {
    type Record = String;

    fn parse(&self, html: &str, site: &SiteConfig) -> Result<Vec<String>> {
        let document = Html::parse_document(html);
        let anchor = selector("a[href]")?;

        let links: Vec<String> = document
            .select(&anchor)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| href.contains(&site.link_identifier))
            .map(|href| site.absolutize(href))
            .collect();

        debug!(count = links.len(), "parsed event links");
        Ok(links)
    }
}

/// Reads the `li.SPmod-events-teaser` previews of a listing page.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreviewParser;

/// Compiled selectors for one teaser node
struct TeaserSelectors {
    link: scraper::Selector,
    title: scraper::Selector,
    location: scraper::Selector,
    start: scraper::Selector,
    end: scraper::Selector,
}

impl TeaserSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            link: selector("a[itemprop='url']")?,
            title: selector("h3[itemprop='name']")?,
            location: selector(".SPmod-events-location")?,
            start: selector("meta[itemprop='startDate']")?,
            end: selector("meta[itemprop='endDate']")?,
        })
    }
}

impl ListingParser for PreviewParser {
    type Record = EventPreview;

    fn parse(&self, html: &str, site: &SiteConfig) -> Result<Vec<EventPreview>> {
        let document = Html::parse_document(html);
        let teaser = selector("li.SPmod-events-teaser")?;
        let selectors = TeaserSelectors::new()?;

        let previews: Vec<EventPreview> = document
            .select(&teaser)
            .map(|node| parse_teaser(&node, &selectors, site))
            .collect();

        debug!(count = previews.len(), "parsed event previews");
        Ok(previews)
    }
}

/// Parse a single teaser node. Never fails; absent fields stay empty.
fn parse_teaser(
    node: &ElementRef,
    selectors: &TeaserSelectors,
    site: &SiteConfig,
) -> EventPreview {
    let link = select_attr(node, &selectors.link, "href")
        .map(|href| site.absolutize(href))
        .unwrap_or_default();

    // The teaser has one combined block for venue and organizer.
    let location = select_text(node, &selectors.location);

    EventPreview {
        link,
        title: select_text(node, &selectors.title),
        organizer: location.clone(),
        location,
        start_time: select_attr(node, &selectors.start, "content").and_then(parse_listing_time),
        end_time: select_attr(node, &selectors.end, "content").and_then(parse_listing_time),
    }
}

/// Parse a listing timestamp such as `2025-03-16T18:00:00+0100`.
///
/// # Examples
/// ```
/// use mainz_events_core::parser::listing::parse_listing_time;
///
/// let time = parse_listing_time("2025-03-16T18:00:00+0100").unwrap();
/// assert_eq!(time.to_rfc3339(), "2025-03-16T18:00:00+01:00");
/// assert!(parse_listing_time("16.03.2025").is_none());
/// ```
pub fn parse_listing_time(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value.trim(), LISTING_TIME_FORMAT).ok()
}
