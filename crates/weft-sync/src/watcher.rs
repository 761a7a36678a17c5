//! Theme directory watching and debounced change queue
//!
//! Wraps the `notify` crate to monitor a theme root, converting raw OS
//! events into [`ThemeEvent`] values keyed by relative asset paths.
//!
//! The [`DebouncedEventQueue`] coalesces rapid-fire events so watch mode
//! only reacts to the final state of a key after it has been quiet for a
//! debounce window. Editors that write through temp files otherwise
//! produce create/modify/rename storms for a single save.

use std::collections::HashMap;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use notify::event::{ModifyKind, RenameMode};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::lister::LocalTheme;

// ============================================================================
// ThemeEvent
// ============================================================================

/// A settled change to a theme asset, keyed by its relative path.
///
/// Creation and modification collapse into `Updated`: watch mode reacts
/// to both by uploading the current content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeEvent {
    /// The asset exists locally and should be pushed to the store.
    Updated(String),
    /// The asset disappeared locally and should be removed from the store.
    Removed(String),
}

impl ThemeEvent {
    /// The asset key this event concerns.
    pub fn key(&self) -> &str {
        match self {
            ThemeEvent::Updated(key) => key,
            ThemeEvent::Removed(key) => key,
        }
    }
}

// ============================================================================
// ThemeWatcher
// ============================================================================

/// Watches a theme root for changes using the OS-native mechanism.
///
/// Events are translated to relative asset keys via the [`LocalTheme`]
/// adapter and sent through an mpsc channel.
///
/// ## Usage
///
/// ```ignore
/// let (watcher, mut rx) = ThemeWatcher::new(&theme)?;
/// while let Some(event) = rx.recv().await {
///     // push into a DebouncedEventQueue
/// }
/// drop(watcher); // stops watching
/// ```
pub struct ThemeWatcher {
    /// The underlying notify watcher; dropping it stops the watch.
    _watcher: RecommendedWatcher,
}

impl ThemeWatcher {
    /// Starts watching the theme root recursively.
    ///
    /// # Errors
    /// Returns an error if the OS watcher cannot be created or the root
    /// cannot be watched (missing directory, inotify limit).
    pub fn new(theme: &LocalTheme) -> Result<(Self, mpsc::Receiver<ThemeEvent>)> {
        let (event_tx, event_rx) = mpsc::channel::<ThemeEvent>(1024);
        let root = theme.root().to_path_buf();

        info!(root = %root.display(), "Starting theme watch");

        let mapper = theme.clone();
        let mut watcher = RecommendedWatcher::new(
            move |res: std::result::Result<notify::Event, notify::Error>| match res {
                Ok(event) => {
                    for change in map_notify_event(&mapper, &event) {
                        if let Err(e) = event_tx.blocking_send(change) {
                            warn!(error = %e, "Failed to send change event (receiver dropped)");
                        }
                    }
                }
                Err(err) => {
                    error!(error = %err, "Theme watcher error");
                }
            },
            notify::Config::default(),
        )
        .context("Failed to create theme watcher")?;

        watcher
            .watch(&root, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch theme root: {}", root.display()))?;

        Ok((Self { _watcher: watcher }, event_rx))
    }
}

/// Converts a `notify::Event` into zero or more [`ThemeEvent`]s.
///
/// - `Create(*)` and `Modify(Data | Metadata | ..)` → `Updated`
/// - `Remove(*)` → `Removed`
/// - `Modify(Name(Both))` with two paths → `Removed(old)` + `Updated(new)`
/// - access events, paths outside the root, and hidden files → nothing
fn map_notify_event(theme: &LocalTheme, event: &notify::Event) -> Vec<ThemeEvent> {
    let key_of = |path: &Path| -> Option<String> {
        let key = theme.relative_key(path)?;
        // Hidden files (including config.yml backups written by editors
        // as dotfiles) never reach the store.
        if key.rsplit('/').next().is_some_and(|name| name.starts_with('.')) {
            return None;
        }
        Some(key)
    };

    match &event.kind {
        EventKind::Create(_) => {
            let Some(key) = event.paths.first().and_then(|p| key_of(p)) else {
                return Vec::new();
            };
            debug!(key, "Mapped Create event");
            vec![ThemeEvent::Updated(key)]
        }

        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) if event.paths.len() >= 2 => {
            let old = key_of(&event.paths[0]);
            let new = key_of(&event.paths[1]);
            debug!(?old, ?new, "Mapped Rename event");
            old.map(ThemeEvent::Removed)
                .into_iter()
                .chain(new.map(ThemeEvent::Updated))
                .collect()
        }

        EventKind::Modify(_) => {
            let Some(key) = event.paths.first().and_then(|p| key_of(p)) else {
                return Vec::new();
            };
            debug!(key, "Mapped Modify event");
            vec![ThemeEvent::Updated(key)]
        }

        EventKind::Remove(_) => {
            let Some(key) = event.paths.first().and_then(|p| key_of(p)) else {
                return Vec::new();
            };
            debug!(key, "Mapped Remove event");
            vec![ThemeEvent::Removed(key)]
        }

        _ => Vec::new(),
    }
}

// ============================================================================
// DebouncedEventQueue
// ============================================================================

/// Coalesces rapid changes to the same key into one settled event.
///
/// When multiple events arrive for a key in quick succession, only the
/// latest is kept and its timestamp reset. [`poll`](Self::poll) releases
/// an event only after its key has been quiet for the debounce window.
pub struct DebouncedEventQueue {
    /// Pending changes keyed by asset key, with the latest event and its
    /// arrival time
    pending: HashMap<String, (ThemeEvent, Instant)>,
    /// Minimum quiet period before a change is considered settled
    debounce_delay: Duration,
}

impl DebouncedEventQueue {
    /// Creates a queue with the given debounce window.
    pub fn new(debounce_delay: Duration) -> Self {
        Self {
            pending: HashMap::new(),
            debounce_delay,
        }
    }

    /// Inserts or updates the pending event for a key, resetting its
    /// quiet-period timer.
    pub fn push(&mut self, event: ThemeEvent) {
        let key = event.key().to_string();
        debug!(key, ?event, "Enqueuing change event");
        self.pending.insert(key, (event, Instant::now()));
    }

    /// Removes and returns all events quiet for longer than the window.
    pub fn poll(&mut self) -> Vec<ThemeEvent> {
        let now = Instant::now();
        let settled_keys: Vec<String> = self
            .pending
            .iter()
            .filter(|(_, (_, at))| now.duration_since(*at) >= self.debounce_delay)
            .map(|(key, _)| key.clone())
            .collect();

        let settled: Vec<ThemeEvent> = settled_keys
            .iter()
            .filter_map(|key| self.pending.remove(key).map(|(event, _)| event))
            .collect();

        if !settled.is_empty() {
            debug!(count = settled.len(), "Polled settled change events");
        }
        settled
    }

    /// Number of events still inside their debounce window.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// True when nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn theme() -> LocalTheme {
        LocalTheme::new("/themes/site")
    }

    fn notify_event(kind: EventKind, paths: &[&str]) -> notify::Event {
        notify::Event {
            kind,
            paths: paths.iter().map(PathBuf::from).collect(),
            attrs: Default::default(),
        }
    }

    // ------------------------------------------------------------------
    // Event mapping
    // ------------------------------------------------------------------

    #[test]
    fn test_map_create_event() {
        let event = notify_event(
            EventKind::Create(notify::event::CreateKind::File),
            &["/themes/site/assets/app.js"],
        );
        assert_eq!(
            map_notify_event(&theme(), &event),
            vec![ThemeEvent::Updated("assets/app.js".to_string())]
        );
    }

    #[test]
    fn test_map_modify_event() {
        let event = notify_event(
            EventKind::Modify(ModifyKind::Data(notify::event::DataChange::Content)),
            &["/themes/site/layout/theme.liquid"],
        );
        assert_eq!(
            map_notify_event(&theme(), &event),
            vec![ThemeEvent::Updated("layout/theme.liquid".to_string())]
        );
    }

    #[test]
    fn test_map_remove_event() {
        let event = notify_event(
            EventKind::Remove(notify::event::RemoveKind::File),
            &["/themes/site/assets/old.css"],
        );
        assert_eq!(
            map_notify_event(&theme(), &event),
            vec![ThemeEvent::Removed("assets/old.css".to_string())]
        );
    }

    #[test]
    fn test_map_rename_event() {
        let event = notify_event(
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            &["/themes/site/assets/a.css", "/themes/site/assets/b.css"],
        );
        assert_eq!(
            map_notify_event(&theme(), &event),
            vec![
                ThemeEvent::Removed("assets/a.css".to_string()),
                ThemeEvent::Updated("assets/b.css".to_string()),
            ]
        );
    }

    #[test]
    fn test_map_ignores_paths_outside_root() {
        let event = notify_event(
            EventKind::Create(notify::event::CreateKind::File),
            &["/elsewhere/app.js"],
        );
        assert!(map_notify_event(&theme(), &event).is_empty());
    }

    #[test]
    fn test_map_ignores_hidden_files() {
        let event = notify_event(
            EventKind::Modify(ModifyKind::Data(notify::event::DataChange::Content)),
            &["/themes/site/assets/.app.js.swp"],
        );
        assert!(map_notify_event(&theme(), &event).is_empty());
    }

    #[test]
    fn test_map_ignores_access_events() {
        let event = notify_event(
            EventKind::Access(notify::event::AccessKind::Read),
            &["/themes/site/assets/app.js"],
        );
        assert!(map_notify_event(&theme(), &event).is_empty());
    }

    // ------------------------------------------------------------------
    // DebouncedEventQueue
    // ------------------------------------------------------------------

    #[test]
    fn test_queue_coalesces_same_key() {
        let mut queue = DebouncedEventQueue::new(Duration::from_millis(0));
        queue.push(ThemeEvent::Updated("assets/app.js".to_string()));
        queue.push(ThemeEvent::Removed("assets/app.js".to_string()));

        assert_eq!(queue.pending_count(), 1);
        std::thread::sleep(Duration::from_millis(10));
        let settled = queue.poll();
        assert_eq!(settled, vec![ThemeEvent::Removed("assets/app.js".to_string())]);
    }

    #[test]
    fn test_queue_holds_recent_events() {
        let mut queue = DebouncedEventQueue::new(Duration::from_secs(60));
        queue.push(ThemeEvent::Updated("assets/app.js".to_string()));

        assert!(queue.poll().is_empty());
        assert_eq!(queue.pending_count(), 1);
    }

    #[test]
    fn test_queue_releases_settled_events_once() {
        let mut queue = DebouncedEventQueue::new(Duration::from_millis(0));
        queue.push(ThemeEvent::Updated("assets/app.js".to_string()));

        std::thread::sleep(Duration::from_millis(10));
        assert_eq!(queue.poll().len(), 1);
        assert!(queue.poll().is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_queue_partial_settlement() {
        let mut queue = DebouncedEventQueue::new(Duration::from_millis(50));

        queue.push(ThemeEvent::Updated("assets/old.js".to_string()));
        std::thread::sleep(Duration::from_millis(60));
        queue.push(ThemeEvent::Updated("assets/new.js".to_string()));

        let settled = queue.poll();
        assert_eq!(settled, vec![ThemeEvent::Updated("assets/old.js".to_string())]);
        assert_eq!(queue.pending_count(), 1);
    }

    #[test]
    fn test_coalescing_resets_timestamp() {
        let mut queue = DebouncedEventQueue::new(Duration::from_millis(50));

        queue.push(ThemeEvent::Updated("assets/app.js".to_string()));
        std::thread::sleep(Duration::from_millis(30));
        queue.push(ThemeEvent::Updated("assets/app.js".to_string()));

        // 30ms after the update: still within the fresh window.
        std::thread::sleep(Duration::from_millis(30));
        assert!(queue.poll().is_empty());

        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(queue.poll().len(), 1);
    }
}
