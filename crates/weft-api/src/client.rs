//! Theme store Asset API client
//!
//! Provides a typed HTTP client for the store's Asset API. Handles the
//! auth header, endpoint construction, JSON (de)serialization, and retry
//! on throttling and server errors.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use weft_api::client::StoreClient;
//! use weft_core::config::ConfigBuilder;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ConfigBuilder::new()
//!     .store("somethingfancy.example.com")
//!     .access_token("tok")
//!     .theme_id("12345")
//!     .build();
//! let client = StoreClient::from_config(&config)?;
//! for asset in client.list_assets().await? {
//!     println!("{}", asset.key);
//! }
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use base64::Engine;
use reqwest::{header::HeaderMap, Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};
use weft_core::{
    config::Config,
    domain::newtypes::ThemeId,
    ports::theme_store::{AssetContent, RemoteAsset},
};

use crate::error::ApiError;

/// Header carrying the store access token.
const ACCESS_TOKEN_HEADER: &str = "X-Store-Access-Token";

/// Maximum number of retries for throttled or 5xx responses.
const MAX_RETRIES: u32 = 5;

/// Fallback delay when a 429 response carries no Retry-After header.
const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(2);

// ============================================================================
// Wire types
// ============================================================================

/// Response from `GET /themes/{id}/assets.json`
#[derive(Debug, Deserialize)]
struct AssetListResponse {
    assets: Vec<RemoteAsset>,
}

/// Response from `GET /themes/{id}/assets.json?asset[key]=...`
#[derive(Debug, Deserialize)]
struct AssetResponse {
    asset: AssetPayload,
}

/// A single asset as the wire carries it: text in `value`, binary in a
/// base64 `attachment`, never both.
#[derive(Debug, Deserialize)]
struct AssetPayload {
    #[allow(dead_code)]
    key: String,
    value: Option<String>,
    attachment: Option<String>,
}

// ============================================================================
// StoreClient
// ============================================================================

/// HTTP client for the theme store Asset API.
///
/// Wraps `reqwest::Client` with the access-token header and the
/// per-theme endpoint layout.
pub struct StoreClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests, e.g. `https://{store}/admin`
    base_url: String,
    /// Opaque store credential
    access_token: String,
    /// Theme the asset endpoints address
    theme_id: ThemeId,
}

impl StoreClient {
    /// Creates a client from a loaded configuration.
    ///
    /// # Errors
    /// Returns [`ApiError::MissingStore`] or [`ApiError::MissingThemeId`]
    /// when the configuration lacks the respective field.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        if config.store.trim().is_empty() {
            return Err(ApiError::MissingStore);
        }
        let theme_id = match &config.theme_id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => return Err(ApiError::MissingThemeId),
        };
        Ok(Self::with_base_url(
            format!("https://{}/admin", config.store),
            &config.access_token,
            theme_id,
        ))
    }

    /// Creates a client with a custom base URL (useful for testing).
    pub fn with_base_url(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        theme_id: ThemeId,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
            theme_id,
        }
    }

    /// The theme the client addresses.
    pub fn theme_id(&self) -> &ThemeId {
        &self.theme_id
    }

    /// Creates an authenticated request builder for the theme's asset
    /// collection endpoint.
    fn assets_request(&self, method: Method) -> RequestBuilder {
        let url = format!("{}/themes/{}/assets.json", self.base_url, self.theme_id);
        self.client
            .request(method, &url)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
    }

    /// Sends a request, retrying on 429 (honoring Retry-After) and on
    /// server errors with exponential backoff. Terminal non-2xx responses
    /// become [`ApiError::Status`].
    async fn send_with_retry<F>(&self, operation: &str, mut make: F) -> Result<Response, ApiError>
    where
        F: FnMut() -> RequestBuilder,
    {
        let mut attempt = 0u32;
        loop {
            let response = make().send().await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS && attempt < MAX_RETRIES {
                let delay = parse_retry_after(response.headers()).unwrap_or(DEFAULT_RETRY_AFTER);
                warn!(operation, attempt, delay_ms = delay.as_millis() as u64, "Throttled, retrying");
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            if status.is_server_error() && attempt < MAX_RETRIES {
                let delay = Duration::from_secs(1 << attempt);
                warn!(
                    operation,
                    attempt,
                    status = status.as_u16(),
                    delay_secs = delay.as_secs(),
                    "Server error, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(ApiError::Status {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(response);
        }
    }

    /// Lists all assets of the theme.
    pub async fn list_assets(&self) -> Result<Vec<RemoteAsset>, ApiError> {
        debug!(theme_id = %self.theme_id, "Listing theme assets");

        let response = self
            .send_with_retry("list_assets", || self.assets_request(Method::GET))
            .await?;
        let list: AssetListResponse = response.json().await?;

        debug!(count = list.assets.len(), "Asset listing complete");
        Ok(list.assets)
    }

    /// Fetches a single asset's content.
    ///
    /// The wire shape decides the variant: a `value` field yields
    /// [`AssetContent::Text`], an `attachment` field is base64-decoded to
    /// [`AssetContent::Binary`].
    pub async fn get_asset(&self, key: &str) -> Result<AssetContent, ApiError> {
        debug!(key, "Fetching asset");

        let response = self
            .send_with_retry("get_asset", || {
                self.assets_request(Method::GET).query(&[("asset[key]", key)])
            })
            .await?;
        let payload: AssetResponse = response.json().await?;

        match (payload.asset.value, payload.asset.attachment) {
            (Some(value), _) => Ok(AssetContent::Text(value)),
            (None, Some(attachment)) => {
                let bytes = base64::engine::general_purpose::STANDARD.decode(attachment)?;
                Ok(AssetContent::Binary(bytes))
            }
            (None, None) => Err(ApiError::MalformedAsset(key.to_string())),
        }
    }

    /// Creates or updates an asset.
    ///
    /// Text content is sent as a plain `value`, binary content base64
    /// encoded as an `attachment`.
    pub async fn put_asset(&self, key: &str, content: &AssetContent) -> Result<(), ApiError> {
        debug!(key, binary = content.is_binary(), bytes = content.len(), "Uploading asset");

        let body = match content {
            AssetContent::Text(value) => serde_json::json!({
                "asset": { "key": key, "value": value }
            }),
            AssetContent::Binary(data) => serde_json::json!({
                "asset": {
                    "key": key,
                    "attachment": base64::engine::general_purpose::STANDARD.encode(data),
                }
            }),
        };

        self.send_with_retry("put_asset", || {
            self.assets_request(Method::PUT).json(&body)
        })
        .await?;

        debug!(key, "Upload complete");
        Ok(())
    }

    /// Removes an asset from the theme.
    pub async fn delete_asset(&self, key: &str) -> Result<(), ApiError> {
        debug!(key, "Deleting asset");

        self.send_with_retry("delete_asset", || {
            self.assets_request(Method::DELETE)
                .query(&[("asset[key]", key)])
        })
        .await?;

        debug!(key, "Delete complete");
        Ok(())
    }
}

/// Parses a Retry-After header given in seconds (possibly fractional).
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(reqwest::header::RETRY_AFTER)?.to_str().ok()?;
    let secs: f64 = value.trim().parse().ok()?;
    if secs >= 0.0 {
        Some(Duration::from_secs_f64(secs))
    } else {
        None
    }
}
