//! Domain newtypes with validation
//!
//! Strongly-typed wrappers for domain identifiers. Each newtype ensures
//! data validity at construction time.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

// ============================================================================
// ThemeId
// ============================================================================

/// Identifier of a theme in the remote store.
///
/// The configuration file historically accepted the id either as a string
/// or as a bare integer, so deserialization accepts both and normalizes to
/// a string. An empty id is representable (it round-trips through config
/// files written by other tools) and is treated as absent by the preview
/// URL builder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ThemeId(String);

impl ThemeId {
    /// Create a ThemeId without validation.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True if the id is the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for ThemeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ThemeId {
    type Err = DomainError;

    /// Parse a user-supplied theme id, rejecting empty or whitespace-bearing
    /// values. Deserialization from config files is laxer on purpose.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidThemeId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl From<u64> for ThemeId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ThemeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct IdVisitor;

        impl serde::de::Visitor<'_> for IdVisitor {
            type Value = ThemeId;

            fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str("a theme id as a string or an integer")
            }

            fn visit_str<E>(self, v: &str) -> Result<ThemeId, E>
            where
                E: serde::de::Error,
            {
                Ok(ThemeId(v.to_string()))
            }

            fn visit_u64<E>(self, v: u64) -> Result<ThemeId, E>
            where
                E: serde::de::Error,
            {
                Ok(ThemeId(v.to_string()))
            }

            fn visit_i64<E>(self, v: i64) -> Result<ThemeId, E>
            where
                E: serde::de::Error,
            {
                Ok(ThemeId(v.to_string()))
            }
        }

        deserializer.deserialize_any(IdVisitor)
    }
}
