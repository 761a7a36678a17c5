//! Weft Sync - orchestration between the local theme and the remote store
//!
//! - [`lister::LocalTheme`] - the local theme directory adapter
//!   (listing, reading, atomic writing)
//! - [`engine::SyncEngine`] - upload/remove/download batches with
//!   per-file failure tolerance
//! - [`watcher::ThemeWatcher`] - notify-based change events plus a
//!   debounced coalescing queue for watch mode

pub mod engine;
pub mod lister;
pub mod watcher;
