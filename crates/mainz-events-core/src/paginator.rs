//! Pagination over the event listing
//!
//! [`Paginator`] walks `?sp-page=1, 2, ...` and hands out the records a
//! [`ListingParser`] finds on each page. How pages are fetched is decided by
//! [`FetchStrategy`]:
//!
//! - `Sequential`: one page per refill. The first empty or failing page ends
//!   the sequence for good.
//! - `Batched`: one round of `batch_size` concurrent page fetches per refill.
//!   Failing pages contribute nothing but do not abort the round. Records are
//!   merged in completion order, so their order varies between runs. When
//!   fewer than `batch_size` pages of a round yield records, the round is the
//!   last one.
//!
//! Neither strategy tells a failed fetch apart from an empty page. In batched
//! mode a single transient error in an otherwise full round therefore ends
//! pagination early.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::client::PageFetcher;
use crate::error::Result;
use crate::parser::ListingParser;
use crate::site::SiteConfig;

/// Number of pages fetched per round when batching
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// How a [`Paginator`] refills its buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStrategy {
    /// One page at a time
    #[default]
    Sequential,
    /// Concurrent rounds of `batch_size` pages; 0 is treated as 1
    Batched { batch_size: usize },
}

impl FetchStrategy {
    /// Batched strategy with [`DEFAULT_BATCH_SIZE`]
    pub fn batched() -> Self {
        Self::Batched {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Cursor and buffer of one paginator. Only moves forward.
#[derive(Debug)]
struct PaginationState<T> {
    /// Next page to fetch (1-based)
    current_page: u32,
    /// Records fetched but not yet handed out
    buffer: VecDeque<T>,
    /// Cleared once the listing is exhausted or a fetch failed
    has_more: bool,
}

impl<T> PaginationState<T> {
    fn new() -> Self {
        Self {
            current_page: 1,
            buffer: VecDeque::new(),
            has_more: true,
        }
    }
}

/// Pull-based iterator over every record of the event listing.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use mainz_events_core::{FetchStrategy, HttpClient, LinkParser, Paginator, SiteConfig};
///
/// # async fn example() -> Result<(), mainz_events_core::ScrapeError> {
/// let fetcher = Arc::new(HttpClient::new()?);
/// let mut links = Paginator::new(
///     fetcher,
///     LinkParser,
///     SiteConfig::default(),
///     FetchStrategy::Sequential,
/// );
/// while let Some(link) = links.next().await {
///     println!("{}", link);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Paginator<P: ListingParser> {
    fetcher: Arc<dyn PageFetcher>,
    parser: Arc<P>,
    site: Arc<SiteConfig>,
    strategy: FetchStrategy,
    state: PaginationState<P::Record>,
}

impl<P: ListingParser> Paginator<P> {
    /// Create a paginator positioned before page 1.
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        parser: P,
        site: SiteConfig,
        strategy: FetchStrategy,
    ) -> Self {
        Self {
            fetcher,
            parser: Arc::new(parser),
            site: Arc::new(site),
            strategy,
            state: PaginationState::new(),
        }
    }

    /// Next page the paginator would fetch
    pub fn current_page(&self) -> u32 {
        self.state.current_page
    }

    /// Whether another refill will be attempted once the buffer is drained
    pub fn has_more(&self) -> bool {
        self.state.has_more
    }

    /// Return the next record, fetching more pages when the buffer is empty.
    ///
    /// Once this returns `None` it keeps returning `None` without touching
    /// the network again.
    pub async fn next(&mut self) -> Option<P::Record> {
        if let Some(record) = self.state.buffer.pop_front() {
            return Some(record);
        }

        if !self.state.has_more {
            return None;
        }

        match self.strategy {
            FetchStrategy::Sequential => self.fetch_next_page().await,
            FetchStrategy::Batched { batch_size } => {
                self.fetch_next_round(batch_size.max(1)).await
            }
        }

        self.state.buffer.pop_front()
    }

    /// Drain the paginator into a `Vec`.
    ///
    /// In batched mode the order follows round completion, not page order.
    pub async fn collect_all(mut self) -> Vec<P::Record> {
        let mut records = Vec::new();
        while let Some(record) = self.next().await {
            records.push(record);
        }
        info!(
            count = records.len(),
            last_page = self.state.current_page - 1,
            "listing exhausted"
        );
        records
    }

    async fn fetch_next_page(&mut self) {
        let page = self.state.current_page;

        match fetch_page(self.fetcher.as_ref(), self.parser.as_ref(), &self.site, page).await {
            Ok(records) if !records.is_empty() => {
                self.state.buffer.extend(records);
                self.state.current_page += 1;
            }
            Ok(_) => {
                info!(page, "no events on listing page, stopping");
                self.state.has_more = false;
            }
            Err(error) => {
                warn!(page, %error, "listing page failed, stopping");
                self.state.has_more = false;
            }
        }
    }

    async fn fetch_next_round(&mut self, batch_size: usize) {
        let first_page = self.state.current_page;
        let (tx, mut rx) = mpsc::channel::<Vec<P::Record>>(batch_size);

        for page in (first_page..).take(batch_size) {
            let tx = tx.clone();
            let fetcher = Arc::clone(&self.fetcher);
            let parser = Arc::clone(&self.parser);
            let site = Arc::clone(&self.site);

            tokio::spawn(async move {
                match fetch_page(fetcher.as_ref(), parser.as_ref(), &site, page).await {
                    Ok(records) if !records.is_empty() => {
                        if tx.send(records).await.is_err() {
                            warn!(page, "round collector gone, dropping page");
                        }
                    }
                    Ok(_) => debug!(page, "no events on listing page"),
                    Err(error) => warn!(page, %error, "listing page failed"),
                }
            });
        }

        // The channel closes once every task has dropped its sender.
        drop(tx);

        let mut contributing = 0;
        while let Some(records) = rx.recv().await {
            contributing += 1;
            self.state.buffer.extend(records);
        }

        debug!(
            first_page,
            batch_size,
            contributing,
            records = self.state.buffer.len(),
            "round complete"
        );

        if contributing < batch_size {
            info!(first_page, contributing, batch_size, "short round, stopping");
            self.state.has_more = false;
        }

        self.state.current_page = self
            .state
            .current_page
            .saturating_add(page_step(batch_size));
    }
}

/// Cursor advance for one round; batch sizes beyond `u32::MAX` saturate.
fn page_step(batch_size: usize) -> u32 {
    u32::try_from(batch_size).unwrap_or(u32::MAX)
}

/// Fetch and parse one listing page.
async fn fetch_page<P: ListingParser>(
    fetcher: &dyn PageFetcher,
    parser: &P,
    site: &SiteConfig,
    page: u32,
) -> Result<Vec<P::Record>> {
    let url = site.listing_page_url(page);
    info!(page, url = %url, "fetching listing page");
    let html = fetcher.fetch(&url).await?;
    parser.parse(&html, site)
}
