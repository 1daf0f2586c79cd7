use thiserror::Error;

/// Failure while fetching or extracting a single catalogue page
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid selector `{0}`")]
    Selector(String),

    #[error("product {index} is missing {what}")]
    MissingElement { index: usize, what: &'static str },
}

/// Failure talking to the spreadsheet sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("could not read credentials {path}: {source}")]
    CredentialsIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not sign token request: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{context} returned HTTP {status}: {body}")]
    Status {
        context: &'static str,
        status: u16,
        body: String,
    },

    #[error("spreadsheet \"{0}\" not found or not shared with the service account")]
    SpreadsheetNotFound(String),

    #[error("invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("spreadsheet \"{0}\" has no worksheets")]
    NoWorksheet(String),

    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}
