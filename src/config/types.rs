use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// Normalize a rule section name or option key.
///
/// Rule names such as `md101` are upper-cased; everything else (aliases, option keys) is
/// lower-cased kebab-case so `list_items` and `List-Items` compare equal.
pub fn normalize_key(key: &str) -> String {
    if key.len() == 5 && key.to_ascii_lowercase().starts_with("md") && key[2..].chars().all(|c| c.is_ascii_digit()) {
        key.to_ascii_uppercase()
    } else {
        key.replace('_', "-").to_ascii_lowercase()
    }
}

/// Represents a rule-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RuleConfig {
    /// Configuration values for the rule
    #[serde(flatten)]
    pub values: BTreeMap<String, toml::Value>,
}

/// Configuration loaded from TOML, one table per rule.
///
/// ```toml
/// [MD101]
/// list_items = false
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Rule sections keyed by normalized rule name or alias
    #[serde(flatten)]
    pub rules: BTreeMap<String, RuleConfig>,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: Config = toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        let mut config = Config::default();
        for (name, rule_config) in raw.rules {
            config
                .rules
                .entry(normalize_key(&name))
                .or_default()
                .values
                .extend(rule_config.values);
        }
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            source,
            path: path.display().to_string(),
        })?;
        log::debug!("Loaded config file: {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Merged options for a rule known by any of `names`.
    ///
    /// Earlier names take precedence, so a rule's primary name overrides its alias.
    pub fn rule_config(&self, names: &[&str]) -> Option<RuleConfig> {
        let mut merged: Option<RuleConfig> = None;
        for name in names.iter().rev() {
            if let Some(section) = self.rules.get(&normalize_key(name)) {
                merged.get_or_insert_with(RuleConfig::default).values.extend(
                    section
                        .values
                        .iter()
                        .map(|(key, value)| (normalize_key(key), value.clone())),
                );
            }
        }
        merged
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file
    #[error("Failed to read config file at {path}: {source}")]
    IoError { source: io::Error, path: String },

    /// Failed to parse the configuration content
    #[error("Failed to parse config: {0}")]
    ParseError(String),
}
