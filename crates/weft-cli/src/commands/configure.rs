//! Configure command - write `config.yml` at the theme root

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use weft_core::config::{Config, ConfigBuilder};

use crate::output::OutputFormat;

#[derive(Debug, Args)]
pub struct ConfigureCommand {
    /// Store host, e.g. somethingfancy.example.com
    pub store: String,

    /// Access token for the store API
    pub access_token: String,

    /// Theme to operate on (omit to target the published theme)
    pub theme_id: Option<String>,

    /// Patterns to exclude, applied after the whitelist (repeatable)
    #[arg(long = "ignore", value_name = "PATTERN")]
    pub ignore_files: Vec<String>,

    /// Patterns to allow, replacing the default directory whitelist
    /// (repeatable)
    #[arg(long = "whitelist", value_name = "PATTERN")]
    pub whitelist_files: Vec<String>,
}

impl ConfigureCommand {
    pub async fn execute(&self, root: &Path, format: OutputFormat) -> Result<()> {
        let mut builder = ConfigBuilder::new()
            .store(&self.store)
            .access_token(&self.access_token)
            .whitelist_files(self.whitelist_files.iter().cloned())
            .ignore_files(self.ignore_files.iter().cloned());
        if let Some(id) = &self.theme_id {
            builder = builder.theme_id(id);
        }

        let config = match builder.build_validated() {
            Ok(config) => config,
            Err(errors) => {
                let details: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                anyhow::bail!("Invalid configuration: {}", details.join("; "));
            }
        };

        let path = Config::default_path(root);
        config
            .save(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        info!(path = %path.display(), "Wrote configuration");

        format.success(&format!("Configuration written to {}", path.display()));
        format.detail(&format!("store:    {}", config.store));
        if let Some(id) = &config.theme_id {
            format.detail(&format!("theme_id: {id}"));
        }
        format.emit_json(&serde_json::json!({
            "config_path": path.display().to_string(),
            "store": config.store,
            "theme_id": config.theme_id.as_ref().map(|id| id.as_str()),
        }));

        Ok(())
    }
}
