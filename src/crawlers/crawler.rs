use crate::error::ScrapeError;
use crate::results::Record;
use async_trait::async_trait;

/// Source of catalogue pages, addressed by 1-based page index
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch and extract one page
    async fn fetch_page(&self, page_index: u32) -> Result<Vec<Record>, ScrapeError>;

    /// Fetch and extract one page, logging any failure and returning no records instead
    async fn fetch_and_extract(&self, page_index: u32) -> Vec<Record> {
        match self.fetch_page(page_index).await {
            Ok(records) => records,
            Err(e) => {
                ::log::error!("Error scraping page {}: {}", page_index, e);
                Vec::new()
            }
        }
    }
}
