//! Open command - view the configured theme in a browser

use std::path::Path;

use anyhow::Result;
use clap::Args;
use tracing::warn;

use weft_core::preview::preview_url;

use crate::commands::load_config;
use crate::output::OutputFormat;

#[derive(Debug, Args)]
pub struct OpenCommand {
    /// Print the preview URL without launching a browser
    #[arg(long)]
    pub print: bool,
}

impl OpenCommand {
    pub async fn execute(&self, root: &Path, format: OutputFormat) -> Result<()> {
        let config = load_config(root)?;
        let url = preview_url(&config.store, config.theme_id.as_ref());

        format.emit_json(&serde_json::json!({ "url": url }));

        if self.print || format.is_json() {
            if !format.is_json() {
                println!("{url}");
            }
            return Ok(());
        }

        if let Err(e) = webbrowser::open(&url) {
            warn!(error = %e, "Could not launch a browser");
            format.failure(&format!("Could not open a browser: {e}"));
            format.detail(&url);
        } else {
            format.success(&format!("Opening {url}"));
        }

        Ok(())
    }
}
