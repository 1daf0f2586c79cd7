use crate::config::ScraperConfig;
use crate::crawlers::crawler::PageFetcher;
use crate::error::ScrapeError;
use crate::parsers::{ListingSelectors, extract_records_with};
use crate::results::Record;
use crate::utils::page_url;
use async_trait::async_trait;
use reqwest::Client;

/// Fetches catalogue pages over HTTP and extracts their products
pub struct HttpFetcher {
    client: Client,
    base_url: String,
    selectors: ListingSelectors,
}

impl HttpFetcher {
    /// Build a fetcher with the configured timeout and User-Agent
    pub fn new(config: &ScraperConfig) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|source| ScrapeError::Request {
                url: config.base_url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            selectors: ListingSelectors::new()?,
        })
    }

    async fn get_body(&self, url: &str) -> Result<String, ScrapeError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| ScrapeError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|source| ScrapeError::Request {
            url: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, page_index: u32) -> Result<Vec<Record>, ScrapeError> {
        let url = page_url(&self.base_url, page_index);
        let start = std::time::Instant::now();
        ::log::debug!("GET {}", url);

        let body = self.get_body(&url).await?;
        let records = extract_records_with(&self.selectors, &body, &self.base_url)?;

        ::log::debug!(
            "Found {} products in {} ({:.2}s)",
            records.len(),
            url,
            start.elapsed().as_secs_f64()
        );
        Ok(records)
    }
}
