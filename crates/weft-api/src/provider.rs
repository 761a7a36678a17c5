//! `IThemeStore` port implementation backed by [`StoreClient`]
//!
//! Thin mapping layer: typed `ApiError`s are contextualized into
//! `anyhow::Error` at the port boundary, where callers only need to
//! report, not classify.

use anyhow::Context;
use weft_core::ports::theme_store::{AssetContent, IThemeStore, RemoteAsset};

use crate::client::StoreClient;

/// The production theme store adapter.
pub struct ThemeStoreProvider {
    client: StoreClient,
}

impl ThemeStoreProvider {
    /// Wraps a configured [`StoreClient`].
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl IThemeStore for ThemeStoreProvider {
    async fn list_assets(&self) -> anyhow::Result<Vec<RemoteAsset>> {
        self.client
            .list_assets()
            .await
            .context("Failed to list theme assets")
    }

    async fn get_asset(&self, key: &str) -> anyhow::Result<AssetContent> {
        self.client
            .get_asset(key)
            .await
            .with_context(|| format!("Failed to fetch asset '{key}'"))
    }

    async fn put_asset(&self, key: &str, content: &AssetContent) -> anyhow::Result<()> {
        self.client
            .put_asset(key, content)
            .await
            .with_context(|| format!("Failed to upload asset '{key}'"))
    }

    async fn delete_asset(&self, key: &str) -> anyhow::Result<()> {
        self.client
            .delete_asset(key)
            .await
            .with_context(|| format!("Failed to delete asset '{key}'"))
    }
}
