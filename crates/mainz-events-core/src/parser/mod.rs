//! HTML parsers for mainz.de pages
//!
//! - `listing`: event links and teaser previews from listing pages
//! - `detail`: full event data from a single event page

pub mod detail;
pub mod listing;

use scraper::{ElementRef, Selector};

use crate::error::{Result, ScrapeError};

// Re-export main parsing functions
pub use detail::{join_location, parse_event_detail, summarize};
pub use listing::{LinkParser, ListingParser, PreviewParser};

/// Compile a CSS selector, mapping failures into the crate error.
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ScrapeError::MarkupParse(format!("Invalid selector {}: {:?}", css, e)))
}

/// Trimmed text of every element under `scope` matching `selector`, concatenated.
pub(crate) fn select_text(scope: &ElementRef, selector: &Selector) -> String {
    scope
        .select(selector)
        .flat_map(|el| el.text())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Attribute value of the first element under `scope` matching `selector`.
pub(crate) fn select_attr<'a>(
    scope: &ElementRef<'a>,
    selector: &Selector,
    name: &str,
) -> Option<&'a str> {
    scope.select(selector).next()?.value().attr(name)
}
