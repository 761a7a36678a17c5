//! CLI command implementations
//!
//! Each command loads the theme configuration from `config.yml` at the
//! theme root, wires the adapters it needs, and renders its result
//! through [`crate::output::OutputFormat`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use glob::Pattern;
use tracing::info;

use weft_api::client::StoreClient;
use weft_api::provider::ThemeStoreProvider;
use weft_core::config::Config;
use weft_sync::engine::SyncEngine;
use weft_sync::lister::LocalTheme;

use crate::output::OutputFormat;

pub mod configure;
pub mod download;
pub mod open;
pub mod remove;
pub mod upload;
pub mod watch;

/// Resolve the theme root from the global `--dir` flag.
pub fn theme_root(dir: Option<&Path>) -> PathBuf {
    dir.map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Load and validate the configuration at the theme root.
///
/// Validation errors are fatal here: a store operation cannot proceed
/// without a usable `config.yml`.
pub fn load_config(root: &Path) -> Result<Config> {
    let path = Config::default_path(root);
    let config = Config::load(&path)
        .with_context(|| format!("Failed to load {}. Run 'weft configure' first.", path.display()))?;

    let errors = config.validate();
    if !errors.is_empty() {
        let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        anyhow::bail!("Invalid configuration: {}", details.join("; "));
    }

    info!(path = %path.display(), store = %config.store, "Loaded configuration");
    Ok(config)
}

/// Build a sync engine over the theme root and its configured store.
pub fn build_engine(root: &Path, config: &Config) -> Result<SyncEngine> {
    let client = StoreClient::from_config(config)?;
    let store = Arc::new(ThemeStoreProvider::new(client));
    let local = Arc::new(LocalTheme::new(root));
    Ok(SyncEngine::new(local, store, config.clone()))
}

/// Compile the optional glob argument shared by upload/remove/download.
pub fn parse_glob(pattern: Option<&str>) -> Result<Option<Pattern>> {
    pattern
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid glob pattern '{p}'")))
        .transpose()
}

/// Render a batch result in the shared format used by upload, remove,
/// and download.
pub fn report_batch(
    format: OutputFormat,
    verb: &str,
    count: u32,
    result: &weft_sync::engine::SyncResult,
) {
    if format.is_json() {
        format.emit_json(&serde_json::json!({
            "uploaded": result.uploaded,
            "removed": result.removed,
            "downloaded": result.downloaded,
            "errors": result.errors,
            "duration_ms": result.duration_ms,
        }));
        return;
    }

    let duration = if result.duration_ms >= 1000 {
        format!("{:.1}s", result.duration_ms as f64 / 1000.0)
    } else {
        format!("{}ms", result.duration_ms)
    };

    if count == 0 && result.errors.is_empty() {
        format.success(&format!("Nothing to do ({verb} matched no files)"));
    } else {
        format.success(&format!(
            "{verb} {count} file{} in {duration}",
            if count == 1 { "" } else { "s" }
        ));
    }

    if !result.errors.is_empty() {
        format.failure(&format!(
            "{} file{} failed:",
            result.errors.len(),
            if result.errors.len() == 1 { "" } else { "s" }
        ));
        for error in &result.errors {
            format.detail(&format!("- {error}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_root_defaults_to_cwd() {
        assert_eq!(theme_root(None), PathBuf::from("."));
        assert_eq!(
            theme_root(Some(Path::new("/themes/site"))),
            PathBuf::from("/themes/site")
        );
    }

    #[test]
    fn test_parse_glob() {
        assert!(parse_glob(None).unwrap().is_none());
        assert!(parse_glob(Some("assets/*")).unwrap().is_some());
        assert!(parse_glob(Some("assets/[")).is_err());
    }

    #[test]
    fn test_load_config_requires_file() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn test_load_config_rejects_invalid() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("config.yml"), "access_token: tok\n").unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(err.to_string().contains("store"));
    }

    #[test]
    fn test_load_config_ok() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("config.yml"),
            "store: s.example.com\naccess_token: tok\ntheme_id: 12345\n",
        )
        .unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config.store, "s.example.com");
    }
}
