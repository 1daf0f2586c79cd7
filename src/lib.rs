// Re-export modules
pub mod config;
pub mod crawlers;
pub mod error;
pub mod parsers;
pub mod results;
pub mod sink;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::{ScraperConfig, SheetConfig};
pub use crawlers::{Catalogue, HttpFetcher, PageFetcher};
pub use error::{ScrapeError, SinkError};
pub use results::{PageOutcome, Record, RunSummary, StopReason};

use sink::{HEADER, RowSink};

/// Process exit code for a completed run, including runs cut short by a failing page
pub const EXIT_OK: i32 = 0;
/// Process exit code when the run could not start
pub const EXIT_PREFLIGHT_FAILED: i32 = 1;

/// Builder for a catalogue scrape over HTTP
pub struct BookScraper {
    config: ScraperConfig,
}

impl BookScraper {
    /// Create a builder from a configuration
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    /// Load the configuration from a JSON file
    pub fn from_config_file(
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::new(ScraperConfig::from_file(path)?))
    }

    /// Load the configuration from a JSON string
    pub fn from_config_str(json: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self::new(ScraperConfig::from_json(json)?))
    }

    /// Set the catalogue base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    /// Set the pause between pages in milliseconds
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.delay_ms = delay_ms;
        self
    }

    /// Set the per-request timeout in seconds
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.config.timeout_secs = timeout_secs;
        self
    }

    /// The configuration the scraper will run with
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Build the pagination driver over an HTTP fetcher
    pub fn catalogue(&self) -> Result<Catalogue<HttpFetcher>, ScrapeError> {
        let fetcher = HttpFetcher::new(&self.config)?;
        Ok(Catalogue::new(fetcher).with_delay(self.config.delay()))
    }

    /// Write the header, scrape the catalogue and append the rows to `sink`.
    ///
    /// Returns the process exit code. Only a failure before the first page
    /// request is non-zero; page errors and a failed append are logged.
    pub async fn run_into(&self, sink: &mut dyn RowSink) -> i32 {
        if let Err(e) = sink.write_header(&HEADER).await {
            ::log::error!("Error setting headers in Google Sheet: {}", e);
            return EXIT_PREFLIGHT_FAILED;
        }

        let catalogue = match self.catalogue() {
            Ok(catalogue) => catalogue,
            Err(e) => {
                ::log::error!("Failed to build HTTP client: {}", e);
                return EXIT_PREFLIGHT_FAILED;
            }
        };

        let start_time = std::time::Instant::now();
        let summary = catalogue.run_with_summary().await;
        ::log::info!(
            "Scraped {} books from {} pages in {:.2} seconds",
            summary.records.len(),
            summary.pages_fetched,
            start_time.elapsed().as_secs_f64()
        );
        if let StopReason::Failed { page, reason } = &summary.stop {
            ::log::warn!("Run ended early at page {}: {}", page, reason);
        }

        if summary.records.is_empty() {
            ::log::info!("No books were scraped.");
            return EXIT_OK;
        }

        match sink.append_rows(&summary.records).await {
            Ok(written) => ::log::info!("Successfully wrote {} books to Google Sheet.", written),
            Err(e) => ::log::error!("Error writing to Google Sheet: {}", e),
        }
        EXIT_OK
    }
}

impl Default for BookScraper {
    fn default() -> Self {
        Self::new(ScraperConfig::default())
    }
}
