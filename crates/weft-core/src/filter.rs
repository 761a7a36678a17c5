//! Eligibility resolution
//!
//! Transforms the raw list of local file paths plus the whitelist/ignore
//! configuration into the authoritative set of asset keys a sync action
//! operates on. Pure: no I/O, no panics, and an empty result is a normal
//! outcome, not an error.
//!
//! ## Pattern rule
//!
//! A pattern matches a path when the path equals the pattern or begins with
//! it, character-wise. Matching is deliberately NOT segment-boundary aware:
//! the pattern `assets/application.js` also matches
//! `assets/application.js.map`. Existing configurations depend on this.

use std::collections::HashSet;

use glob::Pattern;

use crate::config::Config;

/// Theme directories that are eligible when no whitelist is configured.
///
/// A non-empty `whitelist_files` replaces this set entirely; it does not
/// extend it.
pub const DEFAULT_WHITELIST: &[&str] = &[
    "layout/",
    "assets/",
    "config/",
    "snippets/",
    "templates/",
    "locales/",
];

/// Prefix-or-literal match shared by whitelist and ignore patterns.
fn pattern_matches(pattern: &str, path: &str) -> bool {
    path == pattern || path.starts_with(pattern)
}

/// Resolve the ordered, duplicate-free set of asset keys eligible for a
/// sync action.
///
/// The pipeline, in order:
/// 1. whitelist (configured list, or [`DEFAULT_WHITELIST`] when empty) -
///    a non-empty whitelist flips the default from allow to deny;
/// 2. ignore list - removes matches even when whitelisted;
/// 3. optional glob filter from the CLI (`upload assets/*`).
///
/// Input order is preserved and no path is invented; the result is always
/// a subset of `local_files`. Resolution is recomputed on every call since
/// both the file list and the configuration may change between actions.
pub fn local_assets_list(
    local_files: &[String],
    config: &Config,
    only: Option<&Pattern>,
) -> Vec<String> {
    let whitelist: Vec<&str> = if config.whitelist_files.is_empty() {
        DEFAULT_WHITELIST.to_vec()
    } else {
        config.whitelist_files.iter().map(String::as_str).collect()
    };

    let mut seen = HashSet::new();

    local_files
        .iter()
        .map(String::as_str)
        .filter(|path| whitelist.iter().any(|w| pattern_matches(w, path)))
        .filter(|path| !config.ignore_files.iter().any(|i| pattern_matches(i, path)))
        .filter(|path| only.map_or(true, |glob| glob.matches(path)))
        .filter(|path| seen.insert(path.to_string()))
        .map(str::to_owned)
        .collect()
}
