use serde::{Deserialize, Serialize};

/// One product extracted from a catalogue page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Display title of the book
    pub name: String,

    /// Price text exactly as shown on the page (e.g. "£51.77")
    pub price: String,

    /// Absolute URL of the product page
    pub link: String,
}

impl Record {
    /// Create a new record
    pub fn new(name: String, price: String, link: String) -> Self {
        Self { name, price, link }
    }

    /// The record as a spreadsheet row, in header column order
    pub fn to_row(&self) -> Vec<String> {
        vec![self.name.clone(), self.price.clone(), self.link.clone()]
    }
}

/// Classification of a single page attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// The page produced at least one record
    Records(Vec<Record>),
    /// The page loaded but listed no products
    EndOfCatalogue,
    /// Fetching or parsing the page failed
    TransientError(String),
}

impl PageOutcome {
    /// Build an outcome from the result of a page fetch
    pub fn from_result<E: std::fmt::Display>(result: Result<Vec<Record>, E>) -> Self {
        match result {
            Ok(records) if records.is_empty() => PageOutcome::EndOfCatalogue,
            Ok(records) => PageOutcome::Records(records),
            Err(e) => PageOutcome::TransientError(e.to_string()),
        }
    }

    /// Collapse the outcome into the plain page result, where empty covers both stop cases
    pub fn into_records(self) -> Vec<Record> {
        match self {
            PageOutcome::Records(records) => records,
            PageOutcome::EndOfCatalogue | PageOutcome::TransientError(_) => Vec::new(),
        }
    }
}

/// Why a pagination run stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// `page` listed no products
    EndOfCatalogue { page: u32 },
    /// `page` could not be fetched or parsed; later pages were never tried
    Failed { page: u32, reason: String },
}

/// Everything a pagination run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Accumulated records in catalogue order
    pub records: Vec<Record>,

    /// Number of page fetches attempted, including the one that stopped the run
    pub pages_fetched: u32,

    /// What ended the run
    pub stop: StopReason,
}
