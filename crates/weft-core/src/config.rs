//! Configuration module for Weft.
//!
//! Provides the typed model of the `config.yml` file found at a theme root,
//! with loading, saving, validation, and a builder for programmatic use.
//!
//! Configuration is always passed explicitly into resolver and engine
//! calls; there is no process-wide configuration object. Callers reload
//! (or rebuild) it per action, so the most recently loaded value wins.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::newtypes::ThemeId;

/// Name of the configuration file at the theme root.
pub const CONFIG_FILE: &str = "config.yml";

/// The `config.yml` model.
///
/// Unrecognized keys (legacy auth fields and the like) are ignored on load
/// and dropped on save.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Store host, e.g. `somethingfancy.example.com`. Required for any
    /// remote operation.
    #[serde(default)]
    pub store: String,

    /// Opaque credential sent with every store API request.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub access_token: String,

    /// Theme to operate on. Accepts a YAML string or integer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme_id: Option<ThemeId>,

    /// When non-empty, only paths matching one of these patterns (prefix or
    /// literal) are eligible; replaces the default theme-directory whitelist.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub whitelist_files: Vec<String>,

    /// Paths matching any of these patterns are excluded, applied after
    /// the whitelist.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_files: Vec<String>,
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Serialize the configuration back to YAML at `path`.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Path of the configuration file under a theme root.
    pub fn default_path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }
}

/// A single validation error found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Name of the offending field, e.g. `"store"`.
    pub field: String,
    /// Human-readable explanation.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return all errors found.
    ///
    /// An empty vector means the configuration is valid.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.store.trim().is_empty() {
            errors.push(ValidationError {
                field: "store".into(),
                message: "must not be empty".into(),
            });
        }

        if let Some(id) = &self.theme_id {
            if id.as_str().chars().any(char::is_whitespace) {
                errors.push(ValidationError {
                    field: "theme_id".into(),
                    message: format!("must not contain whitespace: '{id}'"),
                });
            }
        }

        for (i, pattern) in self.whitelist_files.iter().enumerate() {
            if pattern.is_empty() {
                errors.push(ValidationError {
                    field: format!("whitelist_files[{i}]"),
                    message: "empty pattern matches everything".into(),
                });
            }
        }
        for (i, pattern) in self.ignore_files.iter().enumerate() {
            if pattern.is_empty() {
                errors.push(ValidationError {
                    field: format!("ignore_files[{i}]"),
                    message: "empty pattern matches everything".into(),
                });
            }
        }

        errors
    }
}

/// Builder for constructing a [`Config`] programmatically.
///
/// # Example
///
/// ```rust
/// use weft_core::config::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .store("somethingfancy.example.com")
///     .theme_id("12345")
///     .whitelist_files(["assets/", "layout/"])
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder initialised with [`Config::default`] values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(mut self, store: impl Into<String>) -> Self {
        self.config.store = store.into();
        self
    }

    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.config.access_token = token.into();
        self
    }

    pub fn theme_id(mut self, id: impl Into<String>) -> Self {
        self.config.theme_id = Some(ThemeId::new(id));
        self
    }

    pub fn whitelist_files<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.whitelist_files = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn ignore_files<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.ignore_files = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Consume the builder and return the finished [`Config`].
    pub fn build(self) -> Config {
        self.config
    }

    /// Build and validate in one step. Returns `Err` with the list of
    /// validation errors if the configuration is invalid.
    pub fn build_validated(self) -> Result<Config, Vec<ValidationError>> {
        let config = self.build();
        let errors = config.validate();
        if errors.is_empty() {
            Ok(config)
        } else {
            Err(errors)
        }
    }
}
