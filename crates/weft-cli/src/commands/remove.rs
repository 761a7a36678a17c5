//! Remove command - delete eligible theme files from the store and disk

use std::path::Path;

use anyhow::Result;
use clap::Args;

use crate::commands::{build_engine, load_config, parse_glob, report_batch};
use crate::output::OutputFormat;

#[derive(Debug, Args)]
pub struct RemoveCommand {
    /// Restrict the removal to files matching this glob, e.g. 'assets/*'
    pub pattern: Option<String>,
}

impl RemoveCommand {
    pub async fn execute(&self, root: &Path, format: OutputFormat) -> Result<()> {
        let config = load_config(root)?;
        let engine = build_engine(root, &config)?;
        let glob = parse_glob(self.pattern.as_deref())?;

        let result = engine.remove(glob.as_ref()).await?;
        report_batch(format, "Removed", result.removed, &result);
        Ok(())
    }
}
