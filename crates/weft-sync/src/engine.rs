//! Theme synchronization engine
//!
//! The [`SyncEngine`] drives batches of uploads, removals, and downloads
//! between an [`ILocalTheme`] and an [`IThemeStore`].
//!
//! ## Batch Flow
//!
//! 1. List local files (raw, unfiltered)
//! 2. Resolve eligibility against the configuration plus the optional
//!    CLI glob - the full eligible set is computed before the first
//!    transfer starts
//! 3. Classify each survivor and transfer with the matching encoding
//!
//! Per-file failures are collected into the result rather than aborting
//! the batch; a sync run reports what it could and could not do.

use std::sync::Arc;
use std::time::Instant;

use glob::Pattern;
use tracing::{debug, info, warn};

use weft_core::classify::is_binary;
use weft_core::config::Config;
use weft_core::filter::local_assets_list;
use weft_core::ports::local_theme::ILocalTheme;
use weft_core::ports::theme_store::{AssetContent, IThemeStore};

// ============================================================================
// SyncResult
// ============================================================================

/// Summary of a completed batch.
#[derive(Debug, Clone, Default)]
pub struct SyncResult {
    /// Number of assets uploaded to the store
    pub uploaded: u32,
    /// Number of assets removed (remotely, and locally for `remove`)
    pub removed: u32,
    /// Number of assets downloaded from the store
    pub downloaded: u32,
    /// Per-file errors encountered (non-fatal)
    pub errors: Vec<String>,
    /// Wall-clock duration of the batch in milliseconds
    pub duration_ms: u64,
}

impl SyncResult {
    /// Total number of assets acted on.
    pub fn total(&self) -> u32 {
        self.uploaded + self.removed + self.downloaded
    }
}

// ============================================================================
// SyncEngine
// ============================================================================

/// Orchestrates sync batches over the local-theme and store ports.
pub struct SyncEngine {
    local: Arc<dyn ILocalTheme>,
    store: Arc<dyn IThemeStore>,
    config: Config,
}

impl SyncEngine {
    /// Create an engine over the given adapters and configuration.
    ///
    /// The configuration is captured by value; build a fresh engine after
    /// reloading it so the most recently loaded value wins.
    pub fn new(local: Arc<dyn ILocalTheme>, store: Arc<dyn IThemeStore>, config: Config) -> Self {
        Self {
            local,
            store,
            config,
        }
    }

    /// Resolve the eligible set for the current local file list.
    ///
    /// Recomputed per batch: both the file list and the configuration may
    /// have changed since the last call.
    async fn eligible(&self, only: Option<&Pattern>) -> anyhow::Result<Vec<String>> {
        let local_files = self.local.list_files().await?;
        let eligible = local_assets_list(&local_files, &self.config, only);
        debug!(
            raw = local_files.len(),
            eligible = eligible.len(),
            "Resolved eligible set"
        );
        Ok(eligible)
    }

    /// True when a single key survives whitelist and ignore filtering.
    /// Used by watch mode on individual change events.
    pub fn is_eligible(&self, key: &str) -> bool {
        !local_assets_list(&[key.to_string()], &self.config, None).is_empty()
    }

    /// Upload every eligible asset, optionally restricted by a glob.
    pub async fn upload(&self, only: Option<&Pattern>) -> anyhow::Result<SyncResult> {
        let started = Instant::now();
        let mut result = SyncResult::default();

        for key in self.eligible(only).await? {
            match self.upload_one(&key).await {
                Ok(()) => result.uploaded += 1,
                Err(err) => {
                    warn!(key, error = %err, "Upload failed");
                    result.errors.push(format!("{key}: {err:#}"));
                }
            }
        }

        result.duration_ms = started.elapsed().as_millis() as u64;
        info!(
            uploaded = result.uploaded,
            errors = result.errors.len(),
            "Upload batch complete"
        );
        Ok(result)
    }

    /// Upload a single asset: read, classify, send with the matching
    /// encoding.
    pub async fn upload_one(&self, key: &str) -> anyhow::Result<()> {
        let data = self.local.read_file(key).await?;
        let content = AssetContent::from_bytes(data, is_binary(key));
        self.store.put_asset(key, &content).await
    }

    /// Remove every eligible asset from the store and from disk,
    /// optionally restricted by a glob.
    pub async fn remove(&self, only: Option<&Pattern>) -> anyhow::Result<SyncResult> {
        let started = Instant::now();
        let mut result = SyncResult::default();

        for key in self.eligible(only).await? {
            match self.remove_remote(&key).await {
                Ok(()) => {
                    result.removed += 1;
                    // Local deletion failing after the remote one succeeded
                    // is still a partial success worth reporting.
                    if let Err(err) = self.local.delete_file(&key).await {
                        warn!(key, error = %err, "Removed remotely but not locally");
                        result.errors.push(format!("{key}: {err:#}"));
                    }
                }
                Err(err) => {
                    warn!(key, error = %err, "Remove failed");
                    result.errors.push(format!("{key}: {err:#}"));
                }
            }
        }

        result.duration_ms = started.elapsed().as_millis() as u64;
        info!(
            removed = result.removed,
            errors = result.errors.len(),
            "Remove batch complete"
        );
        Ok(result)
    }

    /// Remove a single asset from the store only. Watch mode uses this
    /// when a local file disappears; there is nothing left to delete
    /// locally.
    pub async fn remove_remote(&self, key: &str) -> anyhow::Result<()> {
        self.store.delete_asset(key).await
    }

    /// Download the store's assets into the theme directory, optionally
    /// restricted by a glob.
    ///
    /// The remote listing is authoritative here; eligibility rules govern
    /// what leaves the machine, not what may land on it.
    pub async fn download(&self, only: Option<&Pattern>) -> anyhow::Result<SyncResult> {
        let started = Instant::now();
        let mut result = SyncResult::default();

        let assets = self.store.list_assets().await?;
        let keys: Vec<String> = assets
            .into_iter()
            .map(|a| a.key)
            .filter(|key| only.map_or(true, |glob| glob.matches(key)))
            .collect();

        for key in keys {
            match self.download_one(&key).await {
                Ok(()) => result.downloaded += 1,
                Err(err) => {
                    warn!(key, error = %err, "Download failed");
                    result.errors.push(format!("{key}: {err:#}"));
                }
            }
        }

        result.duration_ms = started.elapsed().as_millis() as u64;
        info!(
            downloaded = result.downloaded,
            errors = result.errors.len(),
            "Download batch complete"
        );
        Ok(result)
    }

    async fn download_one(&self, key: &str) -> anyhow::Result<()> {
        let content = self.store.get_asset(key).await?;
        self.local.write_file(key, &content.into_bytes()).await
    }
}

// ============================================================================
// Unit tests
// ============================================================================
