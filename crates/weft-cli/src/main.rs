//! Weft CLI - Sync a local theme directory with a remote theme store
//!
//! Provides commands for:
//! - Writing the theme configuration (`configure`)
//! - Pushing and deleting theme files (`upload`, `remove`)
//! - Pulling the store's copy (`download`)
//! - Mirroring edits live (`watch`)
//! - Viewing the theme in a browser (`open`)

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::{
    configure::ConfigureCommand, download::DownloadCommand, open::OpenCommand,
    remove::RemoveCommand, upload::UploadCommand, watch::WatchCommand,
};
use output::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "weft", version, about = "Sync a local theme with its store")]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Theme directory (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write config.yml with the store credentials and theme id
    Configure(ConfigureCommand),
    /// Upload eligible theme files to the store
    Upload(UploadCommand),
    /// Remove eligible theme files from the store and from disk
    Remove(RemoveCommand),
    /// Download the store's theme files into the local directory
    Download(DownloadCommand),
    /// Watch the theme directory and mirror changes to the store
    Watch(WatchCommand),
    /// Open the theme preview in a browser
    Open(OpenCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let format = OutputFormat::from_flag(cli.json);
    let root = commands::theme_root(cli.dir.as_deref());

    match cli.command {
        Commands::Configure(cmd) => cmd.execute(&root, format).await,
        Commands::Upload(cmd) => cmd.execute(&root, format).await,
        Commands::Remove(cmd) => cmd.execute(&root, format).await,
        Commands::Download(cmd) => cmd.execute(&root, format).await,
        Commands::Watch(cmd) => cmd.execute(&root, format).await,
        Commands::Open(cmd) => cmd.execute(&root, format).await,
    }
}
