use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Configuration for the catalogue scraper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Catalogue base URL; page URLs and product links are built from it
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// User-Agent header sent with every page request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Pause between successful pages in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Spreadsheet destination
    #[serde(default)]
    pub sink: SheetConfig,
}

/// Configuration for the spreadsheet sink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetConfig {
    /// Name of the spreadsheet to open
    #[serde(default = "default_spreadsheet_name")]
    pub spreadsheet_name: String,

    /// Path to the service-account key file
    #[serde(default = "default_credentials_path")]
    pub credentials_path: String,

    /// Google Drive API root, used to look the spreadsheet up by name
    #[serde(default = "default_drive_api_base")]
    pub drive_api_base: String,

    /// Google Sheets API root
    #[serde(default = "default_sheets_api_base")]
    pub sheets_api_base: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            delay_ms: default_delay_ms(),
            sink: SheetConfig::default(),
        }
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            spreadsheet_name: default_spreadsheet_name(),
            credentials_path: default_credentials_path(),
            drive_api_base: default_drive_api_base(),
            sheets_api_base: default_sheets_api_base(),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Apply overrides from the environment
    pub fn apply_env(mut self) -> Self {
        if let Ok(path) = std::env::var("GOOGLE_APPLICATION_CREDENTIALS") {
            if !path.is_empty() {
                self.sink.credentials_path = path;
            }
        }
        self
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Pause between successful pages
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// Default catalogue root
fn default_base_url() -> String {
    "https://books.toscrape.com/catalogue/".to_string()
}

/// Default User-Agent, an ordinary desktop Chrome
fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/128.0.0.0 Safari/537.36".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_spreadsheet_name() -> String {
    "BookScraper".to_string()
}

fn default_credentials_path() -> String {
    "credentials.json".to_string()
}

fn default_drive_api_base() -> String {
    "https://www.googleapis.com/drive/v3".to_string()
}

fn default_sheets_api_base() -> String {
    "https://sheets.googleapis.com/v4".to_string()
}
