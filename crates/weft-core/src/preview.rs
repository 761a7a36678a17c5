//! Preview URL construction
//!
//! Builds the human-facing URL for viewing a theme on its store. Pure
//! string formatting; the store host is passed through without validation.

use crate::domain::newtypes::ThemeId;

/// Build the preview URL for a theme.
///
/// With a present, non-empty theme id the store renders that theme via the
/// `preview_theme_id` query parameter; otherwise the store host is returned
/// unchanged (the store then serves its published theme).
pub fn preview_url(store: &str, theme_id: Option<&ThemeId>) -> String {
    match theme_id {
        Some(id) if !id.is_empty() => format!("{store}?preview_theme_id={id}"),
        _ => store.to_string(),
    }
}
