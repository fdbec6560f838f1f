//! Mainz Events Core Library
//!
//! This crate harvests the event calendar of mainz.de and turns it into
//! iCalendar entries.
//!
//! # Features
//! - Walk the paginated listing one page at a time or in concurrent rounds
//! - Read teaser previews or bare detail links from listing pages
//! - Parse single event pages into normalized events
//! - Write collected events to an `.ics` file

pub mod calendar;
pub mod client;
pub mod error;
pub mod paginator;
pub mod parser;
pub mod scraper;
pub mod site;
pub mod types;

// Re-export main types for convenience
pub use calendar::{EventCalendar, DEFAULT_CALENDAR_FILE};
pub use client::{ClientConfig, HttpClient, PageFetcher};
pub use error::{Result, ScrapeError};
pub use paginator::{FetchStrategy, Paginator, DEFAULT_BATCH_SIZE};
pub use parser::{LinkParser, ListingParser, PreviewParser};
pub use scraper::EventScraper;
pub use site::SiteConfig;
pub use types::{Event, EventPreview};
