//! Watch command - mirror local edits to the store as they happen

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tracing::{debug, info};

use weft_core::config::CONFIG_FILE;
use weft_sync::lister::LocalTheme;
use weft_sync::watcher::{DebouncedEventQueue, ThemeEvent, ThemeWatcher};

use crate::commands::{build_engine, load_config};
use crate::output::OutputFormat;

/// Quiet period before a changed file is considered settled.
const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// How often the settled queue is drained.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Args)]
pub struct WatchCommand {}

impl WatchCommand {
    pub async fn execute(&self, root: &Path, format: OutputFormat) -> Result<()> {
        let mut config = load_config(root)?;
        let mut engine = build_engine(root, &config)?;

        let theme = LocalTheme::new(root);
        let (_watcher, mut events) = ThemeWatcher::new(&theme)?;
        let mut queue = DebouncedEventQueue::new(DEBOUNCE_DELAY);
        let mut ticker = tokio::time::interval(POLL_INTERVAL);

        format.success(&format!("Watching {} (Ctrl-C to stop)", root.display()));
        info!(root = %root.display(), "Watch mode started");

        loop {
            tokio::select! {
                event = events.recv() => {
                    match event {
                        Some(event) => queue.push(event),
                        None => break,
                    }
                }
                _ = ticker.tick() => {
                    for event in queue.poll() {
                        // Edits to config.yml change the rules, not the
                        // theme; pick them up for subsequent events.
                        if event.key() == CONFIG_FILE {
                            config = load_config(root)?;
                            engine = build_engine(root, &config)?;
                            format.detail("Reloaded config.yml");
                            continue;
                        }
                        self.handle_event(&engine, &event, format).await;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Watch mode stopped");
                    break;
                }
            }
        }

        Ok(())
    }

    async fn handle_event(
        &self,
        engine: &weft_sync::engine::SyncEngine,
        event: &ThemeEvent,
        format: OutputFormat,
    ) {
        let key = event.key();
        if !engine.is_eligible(key) {
            debug!(key, "Skipping ineligible file");
            return;
        }

        match event {
            ThemeEvent::Updated(_) => match engine.upload_one(key).await {
                Ok(()) => format.success(&format!("Uploaded {key}")),
                Err(e) => format.failure(&format!("Upload of {key} failed: {e:#}")),
            },
            ThemeEvent::Removed(_) => match engine.remove_remote(key).await {
                Ok(()) => format.success(&format!("Removed {key}")),
                Err(e) => format.failure(&format!("Removal of {key} failed: {e:#}")),
            },
        }
    }
}
