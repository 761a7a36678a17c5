//! Download command - fetch the store's theme files into the local directory

use std::path::Path;

use anyhow::Result;
use clap::Args;

use crate::commands::{build_engine, load_config, parse_glob, report_batch};
use crate::output::OutputFormat;

#[derive(Debug, Args)]
pub struct DownloadCommand {
    /// Restrict the download to files matching this glob, e.g. 'assets/*'
    pub pattern: Option<String>,
}

impl DownloadCommand {
    pub async fn execute(&self, root: &Path, format: OutputFormat) -> Result<()> {
        let config = load_config(root)?;
        let engine = build_engine(root, &config)?;
        let glob = parse_glob(self.pattern.as_deref())?;

        let result = engine.download(glob.as_ref()).await?;
        report_batch(format, "Downloaded", result.downloaded, &result);
        Ok(())
    }
}
