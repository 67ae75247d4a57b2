//! Configuration builders for tests.
//!
//! Use [`TestConfigBuilder`] to create customised [`AppConfig`] values without
//! repeating boilerplate across crate boundaries, and [`TestConfigFile`] when
//! the code under test reads configuration or catalogs from disk.

use std::path::{Path, PathBuf};

use aoi_config::AppConfig;
use tempfile::TempDir;

/// Fluent builder for [`AppConfig`] in tests.
///
/// # Example
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .theme("light")
///     .escalate(false)
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: AppConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.config.logging.level = level.to_string();
        self
    }

    pub fn theme(mut self, theme: &str) -> Self {
        self.config.highlight.theme = theme.to_string();
        self
    }

    pub fn escalate(mut self, escalate: bool) -> Self {
        self.config.assistant.escalate = escalate;
        self
    }

    pub fn fallback_timeout_secs(mut self, secs: u64) -> Self {
        self.config.assistant.fallback_timeout_secs = secs;
        self
    }

    pub fn vocabulary_path(mut self, path: &Path) -> Self {
        self.config.catalog.vocabulary_path = Some(path.display().to_string());
        self
    }

    pub fn completions_path(mut self, path: &Path) -> Self {
        self.config.catalog.completions_path = Some(path.display().to_string());
        self
    }

    pub fn knowledge_path(mut self, path: &Path) -> Self {
        self.config.catalog.knowledge_path = Some(path.display().to_string());
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A temporary directory holding config and catalog files.
///
/// The directory is deleted when this value is dropped, even on panic.
pub struct TestConfigFile {
    pub config_path: PathBuf,
    temp_dir: TempDir,
}

impl TestConfigFile {
    /// Write `toml_content` to `aoi.toml` in a fresh temp directory.
    pub async fn with_toml(toml_content: &str) -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("aoi.toml");
        tokio::fs::write(&config_path, toml_content)
            .await
            .expect("failed to write test config");

        Self {
            config_path,
            temp_dir,
        }
    }

    /// Write an extra file next to the config and return its path.
    pub async fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        tokio::fs::write(&path, content)
            .await
            .expect("failed to write test file");
        path
    }

    /// Load and validate the config file.
    pub async fn load(&self) -> AppConfig {
        AppConfig::load(&self.config_path)
            .await
            .expect("failed to parse test config")
    }
}
