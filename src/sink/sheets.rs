use crate::config::SheetConfig;
use crate::error::SinkError;
use crate::results::Record;
use crate::sink::RowSink;
use crate::sink::auth::Credentials;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/// First worksheet of a Google spreadsheet, opened by name
pub struct SheetsSink {
    client: Client,
    token: String,
    sheets_api_base: String,
    spreadsheet_id: String,
    worksheet: String,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Spreadsheet {
    #[serde(default)]
    sheets: Vec<Worksheet>,
}

#[derive(Debug, Deserialize)]
struct Worksheet {
    properties: WorksheetProperties,
}

#[derive(Debug, Deserialize)]
struct WorksheetProperties {
    title: String,
}

impl SheetsSink {
    /// Load credentials as configured and open the spreadsheet
    pub async fn connect(config: &SheetConfig) -> Result<Self, SinkError> {
        let credentials = Credentials::load(config)?;
        Self::connect_with(config, &credentials).await
    }

    /// Open the spreadsheet with explicit credentials
    pub async fn connect_with(
        config: &SheetConfig,
        credentials: &Credentials,
    ) -> Result<Self, SinkError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        let token = credentials.access_token(&client).await?;

        let spreadsheet_id = find_spreadsheet(
            &client,
            &config.drive_api_base,
            &token,
            &config.spreadsheet_name,
        )
        .await?;
        let worksheet =
            first_worksheet(&client, &config.sheets_api_base, &token, &spreadsheet_id)
                .await?
                .ok_or_else(|| SinkError::NoWorksheet(config.spreadsheet_name.clone()))?;

        ::log::info!(
            "Opened spreadsheet \"{}\" ({}), worksheet \"{}\"",
            config.spreadsheet_name,
            spreadsheet_id,
            worksheet
        );

        Ok(Self {
            client,
            token,
            sheets_api_base: config.sheets_api_base.clone(),
            spreadsheet_id,
            worksheet,
        })
    }

    /// Drive file id of the opened spreadsheet
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Title of the worksheet rows are written to
    pub fn worksheet(&self) -> &str {
        &self.worksheet
    }

    /// A1 range qualified with the worksheet title
    fn range(&self, cells: &str) -> String {
        format!("'{}'!{}", self.worksheet.replace('\'', "''"), cells)
    }

    /// `.../spreadsheets/{id}/values/{range}{suffix}` with the range encoded as one path segment
    fn values_url(&self, range: &str, suffix: &str) -> Result<Url, SinkError> {
        let mut url = Url::parse(&format!(
            "{}/spreadsheets/{}/values",
            self.sheets_api_base.trim_end_matches('/'),
            self.spreadsheet_id
        ))?;
        url.path_segments_mut()
            .map_err(|_| SinkError::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(&format!("{range}{suffix}"));
        Ok(url)
    }
}

#[async_trait]
impl RowSink for SheetsSink {
    async fn write_header(&mut self, header: &[&str]) -> Result<(), SinkError> {
        let range = self.range(&format!("A1:{}1", column_letter(header.len())));
        let url = self.values_url(&range, "")?;

        let response = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({
                "range": range,
                "majorDimension": "ROWS",
                "values": [header],
            }))
            .send()
            .await?;
        check_status(response, "header update").await?;

        ::log::debug!("Wrote header row to {}", range);
        Ok(())
    }

    async fn append_rows(&mut self, records: &[Record]) -> Result<usize, SinkError> {
        let range = self.range("A1");
        let url = self.values_url(&range, ":append")?;
        let rows: Vec<Vec<String>> = records.iter().map(Record::to_row).collect();

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({
                "range": range,
                "majorDimension": "ROWS",
                "values": rows,
            }))
            .send()
            .await?;
        check_status(response, "row append").await?;

        Ok(records.len())
    }
}

async fn find_spreadsheet(
    client: &Client,
    drive_api_base: &str,
    token: &str,
    name: &str,
) -> Result<String, SinkError> {
    let query = format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        name.replace('\\', "\\\\").replace('\'', "\\'"),
        SPREADSHEET_MIME
    );

    let response = client
        .get(format!("{}/files", drive_api_base.trim_end_matches('/')))
        .bearer_auth(token)
        .query(&[
            ("q", query.as_str()),
            ("fields", "files(id,name)"),
            ("supportsAllDrives", "true"),
            ("includeItemsFromAllDrives", "true"),
        ])
        .send()
        .await?;
    let list: FileList = check_status(response, "spreadsheet lookup").await?.json().await?;

    list.files
        .into_iter()
        .next()
        .map(|f| f.id)
        .ok_or_else(|| SinkError::SpreadsheetNotFound(name.to_string()))
}

async fn first_worksheet(
    client: &Client,
    sheets_api_base: &str,
    token: &str,
    spreadsheet_id: &str,
) -> Result<Option<String>, SinkError> {
    let response = client
        .get(format!(
            "{}/spreadsheets/{}",
            sheets_api_base.trim_end_matches('/'),
            spreadsheet_id
        ))
        .bearer_auth(token)
        .query(&[("fields", "sheets.properties.title")])
        .send()
        .await?;
    let spreadsheet: Spreadsheet = check_status(response, "spreadsheet metadata")
        .await?
        .json()
        .await?;

    Ok(spreadsheet
        .sheets
        .into_iter()
        .next()
        .map(|s| s.properties.title))
}

async fn check_status(response: Response, context: &'static str) -> Result<Response, SinkError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    Err(SinkError::Status {
        context,
        status: status.as_u16(),
        body: response.text().await.unwrap_or_default(),
    })
}

/// Spreadsheet column name for a 1-based column number (1 -> A, 27 -> AA)
fn column_letter(mut n: usize) -> String {
    let mut name = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        name.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}
