//! Domain error types
//!
//! Errors for values that fail validation at construction time. Filtering
//! and classification never raise; an empty eligible set or an unknown
//! extension is a legitimate outcome, not an error.

use thiserror::Error;

/// Errors that can occur in domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Asset key escapes the theme root or is otherwise malformed
    #[error("Invalid asset key: {0}")]
    InvalidAssetKey(String),

    /// Theme id is empty or contains whitespace
    #[error("Invalid theme id: {0}")]
    InvalidThemeId(String),
}
