//! Configuration schema (reqschema.toml)

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_locale() -> String {
    "en".to_string()
}

fn default_fallback_locale() -> String {
    "ja".to_string()
}

/// Extra rule identifiers for the rule-type registry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Alias name to registered rule-type name
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Locale used for generated labels
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Locale consulted when the active one lacks a message
    #[serde(default = "default_fallback_locale")]
    pub fallback_locale: String,

    /// Per-locale message template overrides, keyed by message key
    #[serde(default)]
    pub messages: BTreeMap<String, BTreeMap<String, String>>,

    /// Rule-type registry settings
    #[serde(default)]
    pub rules: RuleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            fallback_locale: default_fallback_locale(),
            messages: BTreeMap::new(),
            rules: RuleConfig::default(),
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::from_toml(&contents)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Save config to TOML file
    pub fn save_to_file(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path, toml)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
