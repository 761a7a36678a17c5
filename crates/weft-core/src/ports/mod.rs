//! Port definitions (trait interfaces implemented by adapter crates)

pub mod local_theme;
pub mod theme_store;
