//! Local theme directory adapter (secondary/driven adapter)
//!
//! Implements [`ILocalTheme`] on top of a theme root directory using
//! `tokio::fs` for file I/O and a blocking walk for listing.
//!
//! ## Design Decisions
//!
//! - **Relative keys**: every path is exposed as a forward-slash relative
//!   key (`assets/logo.png`), the same shape the store API uses, so the
//!   eligibility resolver and the remote side agree on names.
//! - **Key validation**: keys are rejected if they would escape the theme
//!   root (absolute, or containing `..`).
//! - **Atomic writes**: write-to-temp + rename avoids partial files when
//!   a download is interrupted.
//! - **Hidden entries skipped**: dotfiles and dot-directories never enter
//!   the raw listing.

use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use tracing::{debug, instrument};
use weft_core::{domain::errors::DomainError, ports::local_theme::ILocalTheme};

/// Adapter rooted at a theme directory.
#[derive(Debug, Clone)]
pub struct LocalTheme {
    root: PathBuf,
}

impl LocalTheme {
    /// Create an adapter for the theme at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The theme root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a relative key to an absolute path inside the root.
    ///
    /// # Errors
    /// [`DomainError::InvalidAssetKey`] when the key is empty, absolute,
    /// or contains parent-directory components.
    fn resolve(&self, key: &str) -> Result<PathBuf, DomainError> {
        let path = Path::new(key);
        if key.is_empty()
            || path.is_absolute()
            || path
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::RootDir))
        {
            return Err(DomainError::InvalidAssetKey(key.to_string()));
        }
        Ok(self.root.join(path))
    }

    /// Map an absolute path back to a relative key, if it lies under the
    /// root. Used by watch mode to translate filesystem events.
    pub fn relative_key(&self, path: &Path) -> Option<String> {
        let rel = path.strip_prefix(&self.root).ok()?;
        let mut parts = Vec::new();
        for component in rel.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
                _ => return None,
            }
        }
        if parts.is_empty() {
            return None;
        }
        Some(parts.join("/"))
    }
}

/// Recursively collect relative keys under `root`, skipping hidden entries.
fn collect_keys(dir: &Path, root: &Path, out: &mut Vec<String>) -> anyhow::Result<()> {
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let entry = entry?;
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            collect_keys(&path, root, out)?;
        } else {
            let Ok(rel) = path.strip_prefix(root) else {
                continue;
            };
            let key = rel
                .components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("/");
            out.push(key);
        }
    }
    Ok(())
}

#[async_trait::async_trait]
impl ILocalTheme for LocalTheme {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    async fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let root = self.root.clone();
        let mut keys = tokio::task::spawn_blocking(move || {
            let mut out = Vec::new();
            collect_keys(&root, &root, &mut out)?;
            Ok::<_, anyhow::Error>(out)
        })
        .await??;

        // Deterministic order: directory walks vary across platforms.
        keys.sort();
        debug!(count = keys.len(), "Listed theme files");
        Ok(keys)
    }

    #[instrument(skip(self))]
    async fn read_file(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        let path = self.resolve(key)?;
        let data = tokio::fs::read(&path)
            .await
            .with_context(|| format!("Failed to read '{key}'"))?;
        debug!(key, bytes = data.len(), "Read theme file");
        Ok(data)
    }

    #[instrument(skip(self, data), fields(bytes = data.len()))]
    async fn write_file(&self, key: &str, data: &[u8]) -> anyhow::Result<()> {
        let target = self.resolve(key)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Temp file in the same directory so the rename is atomic.
        let tmp_path = {
            let mut p = target.as_os_str().to_owned();
            p.push(".tmp");
            PathBuf::from(p)
        };
        tokio::fs::write(&tmp_path, data).await?;
        tokio::fs::rename(&tmp_path, &target)
            .await
            .with_context(|| format!("Failed to write '{key}'"))?;

        debug!(key, "Wrote theme file");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_file(&self, key: &str) -> anyhow::Result<()> {
        let path = self.resolve(key)?;
        tokio::fs::remove_file(&path)
            .await
            .with_context(|| format!("Failed to delete '{key}'"))?;
        debug!(key, "Deleted theme file");
        Ok(())
    }
}
