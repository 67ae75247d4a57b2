#![deny(unsafe_code)]

//! Configuration loading and validation for the AOI assist tooling.
//!
//! Loads TOML configuration files and validates them against expected schemas.
//! Provides the [`AppConfig`] type as the central configuration structure.
//! Every section is optional; an empty file yields the defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Syntax highlighting configuration.
    #[serde(default)]
    pub highlight: HighlightConfig,

    /// Catalog override files.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Help assistant configuration.
    #[serde(default)]
    pub assistant: AssistantConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Syntax highlighting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Color theme: "dark" or "light".
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
        }
    }
}

fn default_theme() -> String {
    "dark".to_string()
}

/// Optional replacement files for the embedded catalogs.
///
/// Any path left unset falls back to the catalog shipped with the binary.
///
/// ## TOML Example
///
/// ```toml
/// [catalog]
/// vocabulary_path = "/etc/aoi/vocabulary.toml"
/// knowledge_path = "/etc/aoi/knowledge.toml"
/// ```
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Keyword and builtin-function sets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary_path: Option<String>,

    /// Completion catalog.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completions_path: Option<String>,

    /// FAQ catalog for the help assistant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_path: Option<String>,
}

/// Help assistant configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Whether unmatched questions are escalated to the fallback service.
    #[serde(default = "default_escalate")]
    pub escalate: bool,

    /// Upper bound on a single fallback call, in seconds.
    #[serde(default = "default_fallback_timeout_secs")]
    pub fallback_timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            escalate: default_escalate(),
            fallback_timeout_secs: default_fallback_timeout_secs(),
        }
    }
}

fn default_escalate() -> bool {
    true
}

fn default_fallback_timeout_secs() -> u64 {
    30
}

impl AppConfig {
    /// Load configuration from a TOML file at the given path using async I/O.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "loading configuration");
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "logging.level must be one of {:?}, got {:?}",
                valid_levels, self.logging.level
            )));
        }

        let valid_themes = ["dark", "light"];
        if !valid_themes.contains(&self.highlight.theme.as_str()) {
            return Err(ConfigError::Validation(format!(
                "highlight.theme must be one of {:?}, got {:?}",
                valid_themes, self.highlight.theme
            )));
        }

        let overrides = [
            ("catalog.vocabulary_path", &self.catalog.vocabulary_path),
            ("catalog.completions_path", &self.catalog.completions_path),
            ("catalog.knowledge_path", &self.catalog.knowledge_path),
        ];
        for (key, path) in overrides {
            if path.as_deref().is_some_and(str::is_empty) {
                return Err(ConfigError::Validation(format!(
                    "{key} must not be empty when set"
                )));
            }
        }

        if self.assistant.fallback_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "assistant.fallback_timeout_secs must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}
