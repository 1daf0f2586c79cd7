use crate::crawlers::crawler::PageFetcher;
use crate::results::{PageOutcome, Record, RunSummary, StopReason};
use std::time::Duration;

/// Default pause between pages
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Walks the catalogue page by page until a page yields nothing.
///
/// Pages are requested strictly in order starting at 1, one attempt each.
/// After every page that produced records the driver sleeps for `delay`
/// before asking for the next one.
pub struct Catalogue<F> {
    fetcher: F,
    delay: Duration,
}

impl<F: PageFetcher> Catalogue<F> {
    /// Create a driver over the given fetcher with the default delay
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            delay: DEFAULT_DELAY,
        }
    }

    /// Set the pause between pages
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The page source this driver walks
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Scrape the whole catalogue and return the records in catalogue order
    pub async fn run(&self) -> Vec<Record> {
        self.run_with_summary().await.records
    }

    /// Scrape the whole catalogue, also reporting how many pages were tried and why it stopped
    pub async fn run_with_summary(&self) -> RunSummary {
        let mut records = Vec::new();
        let mut page: u32 = 1;

        loop {
            ::log::info!("Scraping page {}...", page);

            match PageOutcome::from_result(self.fetcher.fetch_page(page).await) {
                PageOutcome::Records(batch) => {
                    ::log::info!("Page {} yielded {} records", page, batch.len());
                    records.extend(batch);
                    page += 1;
                    tokio::time::sleep(self.delay).await;
                }
                PageOutcome::EndOfCatalogue => {
                    ::log::info!("Page {} has no products, end of catalogue", page);
                    return RunSummary {
                        records,
                        pages_fetched: page,
                        stop: StopReason::EndOfCatalogue { page },
                    };
                }
                PageOutcome::TransientError(reason) => {
                    ::log::error!("Error scraping page {}: {}", page, reason);
                    ::log::warn!(
                        "Stopping at page {}; later pages were not scraped",
                        page
                    );
                    return RunSummary {
                        records,
                        pages_fetched: page,
                        stop: StopReason::Failed { page, reason },
                    };
                }
            }
        }
    }
}
