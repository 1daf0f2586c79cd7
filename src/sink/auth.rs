//! Credentials for the Google APIs.
//!
//! A service-account key is turned into a short-lived bearer token with the
//! OAuth 2.0 JWT-bearer grant. A token issued elsewhere can be supplied
//! directly through `GOOGLE_OAUTH_ACCESS_TOKEN`.

use crate::config::SheetConfig;
use crate::error::SinkError;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Scopes requested for the spreadsheet and for looking it up by name in Drive
pub const SCOPES: [&str; 2] = [
    "https://spreadsheets.google.com/feeds",
    "https://www.googleapis.com/auth/drive",
];

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: u64 = 3600;

/// The fields of a service-account key file that token exchange needs
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

impl ServiceAccountKey {
    /// Read a key from a JSON key file
    pub fn from_file(path: &str) -> Result<Self, SinkError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SinkError::CredentialsIo {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parse a key from the contents of a JSON key file
    pub fn from_json(json: &str) -> Result<Self, SinkError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Signed RS256 assertion for the token endpoint
    pub fn assertion(&self, issued_at: u64) -> Result<String, SinkError> {
        let claims = Claims {
            iss: &self.client_email,
            scope: SCOPES.join(" "),
            aud: &self.token_uri,
            iat: issued_at,
            exp: issued_at + TOKEN_LIFETIME_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())?;
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &key,
        )?)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// How the sink authenticates
#[derive(Debug, Clone)]
pub enum Credentials {
    ServiceAccount(ServiceAccountKey),
    AccessToken(String),
}

impl Credentials {
    /// Prefer a ready token from the environment, else read the configured key file
    pub fn load(config: &SheetConfig) -> Result<Self, SinkError> {
        if let Ok(token) = std::env::var("GOOGLE_OAUTH_ACCESS_TOKEN") {
            if !token.is_empty() {
                ::log::debug!("Using access token from GOOGLE_OAUTH_ACCESS_TOKEN");
                return Ok(Credentials::AccessToken(token));
            }
        }

        ::log::debug!("Loading service account key from {}", config.credentials_path);
        ServiceAccountKey::from_file(&config.credentials_path).map(Credentials::ServiceAccount)
    }

    /// Resolve to a bearer token, exchanging the key if needed
    pub async fn access_token(&self, client: &Client) -> Result<String, SinkError> {
        match self {
            Credentials::AccessToken(token) => Ok(token.clone()),
            Credentials::ServiceAccount(key) => exchange(client, key).await,
        }
    }
}

async fn exchange(client: &Client, key: &ServiceAccountKey) -> Result<String, SinkError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let assertion = key.assertion(now)?;

    ::log::debug!("Requesting access token for {}", key.client_email);
    let response = client
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(SinkError::Status {
            context: "token exchange",
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        });
    }

    let token: TokenResponse = response.json().await?;
    Ok(token.access_token)
}
