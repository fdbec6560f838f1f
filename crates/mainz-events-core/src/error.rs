//! Error types for the Mainz events scraper
//!
//! Every failure in this crate is one of these variants. At the listing-page
//! level they all mean "this page contributed nothing"; only the detail-page
//! extractor hands them back to the caller.

use thiserror::Error;

/// Error type for scraping operations
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Network or connection failure, including body read errors
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with something other than 200 OK
    #[error("Unexpected status {status} for {url}")]
    Status { status: u16, url: String },

    /// Document or selector could not be parsed
    #[error("Failed to parse HTML: {0}")]
    MarkupParse(String),

    /// Expected container is missing from an otherwise valid page
    #[error("Content not found: {0}")]
    ContentNotFound(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Writing the calendar file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for scraping operations
pub type Result<T> = std::result::Result<T, ScrapeError>;
