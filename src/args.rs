use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "book-scraper")]
#[command(about = "Scrapes the books.toscrape.com catalogue into a Google spreadsheet")]
#[command(version)]
pub struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Catalogue base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Pause between pages in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Name of the spreadsheet to write to
    #[arg(short, long)]
    pub sheet: Option<String>,

    /// Service-account key file
    #[arg(long)]
    pub credentials: Option<String>,

    /// Print rows as JSON lines instead of writing to the spreadsheet
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply(&self, mut config: book_scraper::ScraperConfig) -> book_scraper::ScraperConfig {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(delay_ms) = self.delay_ms {
            config.delay_ms = delay_ms;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if let Some(sheet) = &self.sheet {
            config.sink.spreadsheet_name = sheet.clone();
        }
        if let Some(credentials) = &self.credentials {
            config.sink.credentials_path = credentials.clone();
        }
        config
    }
}
