//! Source site description
//!
//! Everything that ties the scraper to mainz.de lives here: the origin used to
//! absolutize links, the listing page path, the pagination query parameter and
//! the path fragment that marks event detail links.

use url::Url;

use crate::error::{Result, ScrapeError};

/// Origin of the Mainz city website
pub const MAINZ_ORIGIN: &str = "https://www.mainz.de";

/// Path of the paginated event calendar
pub const LISTING_PATH: &str =
    "/freizeit-und-sport/feste-und-veranstaltungen/veranstaltungskalender.php";

/// Query parameter carrying the 1-based listing page number
pub const PAGE_PARAM: &str = "sp-page";

/// Path fragment shared by all event detail links
pub const LINK_IDENTIFIER: &str = "/freizeit-und-sport/feste-und-veranstaltungen/";

/// Location of the listing pages and the link conventions of the source site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Scheme and host, without trailing slash (e.g. "https://www.mainz.de")
    pub origin: String,
    /// Path of the listing page relative to the origin
    pub listing_path: String,
    /// Name of the page query parameter
    pub page_param: String,
    /// Substring an `href` must contain to count as an event link
    pub link_identifier: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: MAINZ_ORIGIN.to_string(),
            listing_path: LISTING_PATH.to_string(),
            page_param: PAGE_PARAM.to_string(),
            link_identifier: LINK_IDENTIFIER.to_string(),
        }
    }
}

impl SiteConfig {
    /// Same site layout served from another origin (mirrors, test servers).
    ///
    /// # Errors
    /// Returns `ScrapeError::InvalidUrl` if `origin` is not an absolute URL.
    pub fn with_origin(origin: &str) -> Result<Self> {
        Url::parse(origin).map_err(|e| ScrapeError::InvalidUrl(format!("{}: {}", origin, e)))?;
        Ok(Self {
            origin: origin.trim_end_matches('/').to_string(),
            ..Self::default()
        })
    }

    /// URL of the listing page with the given 1-based index.
    ///
    /// # Examples
    /// ```
    /// use mainz_events_core::SiteConfig;
    ///
    /// let site = SiteConfig::default();
    /// assert!(site.listing_page_url(3).ends_with("veranstaltungskalender.php?sp-page=3"));
    /// ```
    pub fn listing_page_url(&self, page: u32) -> String {
        format!(
            "{}{}?{}={}",
            self.origin, self.listing_path, self.page_param, page
        )
    }

    /// Make an `href` absolute against the site origin.
    ///
    /// Hrefs that already start with "http" are returned unchanged.
    pub fn absolutize(&self, href: &str) -> String {
        if href.starts_with("http") {
            return href.to_string();
        }

        match Url::parse(&self.origin).and_then(|base| base.join(href)) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.origin, href),
        }
    }
}
