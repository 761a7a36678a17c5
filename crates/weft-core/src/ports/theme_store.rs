//! Theme store port (driven/secondary port)
//!
//! The interface for the remote theme store that assets are synchronized
//! against. The production implementation lives in `weft-api`; tests
//! inject fakes that record calls instead of talking to a network.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because errors at port boundaries are
//!   adapter-specific and don't need domain-level classification.
//! - `RemoteAsset` is a port-level DTO describing an asset listing entry,
//!   not a domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// AssetContent
// ============================================================================

/// Content of a single asset, tagged with its transfer encoding.
///
/// The variant is chosen by the classifier (`weft_core::classify`): text
/// assets travel as a UTF-8 value, binary assets as base64 attachments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetContent {
    /// UTF-8 text sent as a plain `value`.
    Text(String),
    /// Raw bytes sent as a base64 `attachment`.
    Binary(Vec<u8>),
}

impl AssetContent {
    /// Wrap raw bytes according to a classification decision.
    ///
    /// A text classification still falls back to `Binary` when the bytes
    /// are not valid UTF-8; the encoding must never corrupt content.
    #[must_use]
    pub fn from_bytes(data: Vec<u8>, binary: bool) -> Self {
        if binary {
            return Self::Binary(data);
        }
        match String::from_utf8(data) {
            Ok(text) => Self::Text(text),
            Err(err) => Self::Binary(err.into_bytes()),
        }
    }

    /// True for the `Binary` variant.
    #[must_use]
    pub fn is_binary(&self) -> bool {
        matches!(self, Self::Binary(_))
    }

    /// The content as raw bytes, consuming self.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.into_bytes(),
            Self::Binary(data) => data,
        }
    }

    /// Length of the content in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.len(),
            Self::Binary(data) => data.len(),
        }
    }

    /// True if the content is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// RemoteAsset
// ============================================================================

/// An entry from the store's asset listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteAsset {
    /// Relative path of the asset within the theme, e.g. `assets/logo.png`.
    pub key: String,
    /// Size in bytes, when the store reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Last modification timestamp, when the store reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

// ============================================================================
// IThemeStore trait
// ============================================================================

/// Port trait for remote theme store operations.
///
/// Implementations handle transport, authentication headers, and
/// transient-failure retries; callers see only resolved asset keys and
/// content.
#[async_trait::async_trait]
pub trait IThemeStore: Send + Sync {
    /// Lists all assets of the configured theme.
    async fn list_assets(&self) -> anyhow::Result<Vec<RemoteAsset>>;

    /// Fetches a single asset's content by key.
    async fn get_asset(&self, key: &str) -> anyhow::Result<AssetContent>;

    /// Creates or updates an asset with the given content.
    async fn put_asset(&self, key: &str, content: &AssetContent) -> anyhow::Result<()>;

    /// Removes an asset from the theme.
    async fn delete_asset(&self, key: &str) -> anyhow::Result<()>;
}
