//! Configuration Management
//!
//! Handles persistent configuration storage for cloudhydrate.

use crate::model::{ArrayMismatch, HydrateOptions};
use crate::payload::Format;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_pretty() -> bool {
    true
}

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Handling of non-sequence values given to array attributes
    #[serde(default)]
    pub array_mismatch: ArrayMismatch,
    /// Output format for hydrated models
    #[serde(default)]
    pub output: Format,
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
    /// Last hydrated model
    #[serde(default)]
    pub last_model: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            array_mismatch: ArrayMismatch::default(),
            output: Format::default(),
            pretty: default_pretty(),
            last_model: None,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cloudhydrate").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load from an explicit path; a missing or unreadable file yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective hydration options (CLI > config)
    pub fn effective_options(&self, reject_non_sequence: bool) -> HydrateOptions {
        HydrateOptions {
            array_mismatch: if reject_non_sequence {
                ArrayMismatch::Reject
            } else {
                self.array_mismatch
            },
        }
    }

    /// Get effective output format (CLI > config > json)
    pub fn effective_output(&self, cli: Option<Format>) -> Format {
        cli.unwrap_or(self.output)
    }

    /// Get effective model name (CLI > last used)
    pub fn effective_model(&self, cli: Option<&str>) -> Option<String> {
        cli.map(str::to_string).or_else(|| self.last_model.clone())
    }

    /// Set last model and save
    pub fn set_last_model(&mut self, name: &str) -> Result<()> {
        self.last_model = Some(name.to_string());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(tag: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("cloudhydrate-test-{}-{}", tag, std::process::id()))
            .join("config.json")
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.array_mismatch, ArrayMismatch::Skip);
        assert_eq!(config.output, Format::Json);
        assert!(config.pretty);
        assert!(config.last_model.is_none());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/cloudhydrate/config.json"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_config("partial");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"array_mismatch": "reject"}"#).unwrap();

        let config = Config::load_from(&path);
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();

        assert_eq!(config.array_mismatch, ArrayMismatch::Reject);
        assert!(config.pretty);
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_config("roundtrip");
        let config = Config {
            output: Format::Yaml,
            pretty: false,
            last_model: Some("Instance".to_string()),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = Config {
            output: Format::Yaml,
            last_model: Some("Project".to_string()),
            ..Config::default()
        };
        assert_eq!(config.effective_output(None), Format::Yaml);
        assert_eq!(config.effective_output(Some(Format::Json)), Format::Json);
        assert_eq!(config.effective_model(None).as_deref(), Some("Project"));
        assert_eq!(config.effective_model(Some("Instance")).as_deref(), Some("Instance"));
        assert_eq!(
            config.effective_options(true).array_mismatch,
            ArrayMismatch::Reject
        );
        assert_eq!(
            config.effective_options(false).array_mismatch,
            ArrayMismatch::Skip
        );
    }
}
