mod common;

use async_trait::async_trait;
use book_scraper::sink::{HEADER, RowSink};
use book_scraper::{BookScraper, EXIT_OK, EXIT_PREFLIGHT_FAILED, Record, ScraperConfig, SinkError};
use common::{USER_AGENT, listing_page, numbered_page};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// In-memory sink that can be told to reject the header or the append
#[derive(Default)]
struct MemorySink {
    fail_header: bool,
    fail_append: bool,
    header: Option<Vec<String>>,
    append_calls: usize,
    rows: Vec<Record>,
}

fn rejected(context: &'static str) -> SinkError {
    SinkError::Status {
        context,
        status: 403,
        body: "PERMISSION_DENIED".to_string(),
    }
}

#[async_trait]
impl RowSink for MemorySink {
    async fn write_header(&mut self, header: &[&str]) -> Result<(), SinkError> {
        if self.fail_header {
            return Err(rejected("header update"));
        }
        self.header = Some(header.iter().map(|h| h.to_string()).collect());
        Ok(())
    }

    async fn append_rows(&mut self, records: &[Record]) -> Result<usize, SinkError> {
        self.append_calls += 1;
        if self.fail_append {
            return Err(rejected("row append"));
        }
        self.rows.extend_from_slice(records);
        Ok(records.len())
    }
}

fn scraper_for(server: &MockServer) -> BookScraper {
    BookScraper::new(ScraperConfig {
        base_url: format!("{}/catalogue/", server.uri()),
        user_agent: USER_AGENT.to_string(),
        timeout_secs: 2,
        delay_ms: 0,
        ..ScraperConfig::default()
    })
}

async fn mount_two_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(numbered_page(1, 20)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/catalogue/page-2.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
        .mount(server)
        .await;
}

async fn page_requests(server: &MockServer) -> usize {
    server.received_requests().await.unwrap().len()
}

#[tokio::test]
async fn test_header_failure_aborts_before_scraping() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let mut sink = MemorySink {
        fail_header: true,
        ..MemorySink::default()
    };
    let code = scraper_for(&server).run_into(&mut sink).await;

    assert_eq!(code, EXIT_PREFLIGHT_FAILED);
    assert_ne!(code, 0);
    assert_eq!(page_requests(&server).await, 0);
    assert_eq!(sink.append_calls, 0);
}

#[tokio::test]
async fn test_successful_run_writes_header_and_rows() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let mut sink = MemorySink::default();
    let code = scraper_for(&server).run_into(&mut sink).await;

    assert_eq!(code, EXIT_OK);
    assert_eq!(sink.header, Some(HEADER.iter().map(|h| h.to_string()).collect()));
    assert_eq!(sink.append_calls, 1);
    assert_eq!(sink.rows.len(), 20);
    assert_eq!(sink.rows[0].name, "Book 1-0");
    assert_eq!(page_requests(&server).await, 2);
}

#[tokio::test]
async fn test_failed_append_still_exits_zero() {
    let server = MockServer::start().await;
    mount_two_pages(&server).await;

    let mut sink = MemorySink {
        fail_append: true,
        ..MemorySink::default()
    };
    let code = scraper_for(&server).run_into(&mut sink).await;

    assert_eq!(code, EXIT_OK);
    assert_eq!(sink.append_calls, 1);
    assert!(sink.rows.is_empty());
}

#[tokio::test]
async fn test_page_error_still_exits_zero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(numbered_page(1, 5)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/catalogue/page-2.html"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let mut sink = MemorySink::default();
    let code = scraper_for(&server).run_into(&mut sink).await;

    assert_eq!(code, EXIT_OK);
    assert_eq!(sink.rows.len(), 5);
    assert_eq!(page_requests(&server).await, 2);
}

#[tokio::test]
async fn test_nothing_scraped_skips_append() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalogue/page-1.html"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut sink = MemorySink::default();
    let code = scraper_for(&server).run_into(&mut sink).await;

    assert_eq!(code, EXIT_OK);
    assert!(sink.header.is_some());
    assert_eq!(sink.append_calls, 0);
}
