/// Serde-based configuration system for rules
///
/// Each configurable rule owns a typed config struct implementing [`RuleConfig`]. The
/// struct is deserialized from the rule's TOML section, so defaults and key aliases live
/// in serde attributes rather than hand-written lookups.
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Trait for rule configurations
pub trait RuleConfig: Serialize + DeserializeOwned + Default + Clone {
    /// The rule name (e.g., "MD101")
    const RULE_NAME: &'static str;

    /// The rule's descriptive alias (e.g., "math-surrounded-by-blank-lines")
    const RULE_ALIAS: &'static str;
}

/// Helper to load rule configuration from the global config
///
/// Sections named after the rule or its alias are merged, the rule name winning. Invalid
/// values are logged and the rule falls back to its defaults.
pub fn load_rule_config<T: RuleConfig>(config: &crate::config::Config) -> T {
    config
        .rule_config(&[T::RULE_NAME, T::RULE_ALIAS])
        .and_then(|rule_config| {
            let table: toml::map::Map<String, toml::Value> = rule_config
                .values
                .into_iter()
                .map(|(key, value)| (key.replace('-', "_"), value))
                .collect();
            let toml_table = toml::Value::Table(table);

            match toml_table.try_into::<T>() {
                Ok(config) => Some(config),
                Err(e) => {
                    log::warn!("Invalid configuration for rule {}: {}", T::RULE_NAME, e);
                    log::warn!("Using default values for rule {}.", T::RULE_NAME);
                    None
                }
            }
        })
        .unwrap_or_default()
}

/// Default configuration of a rule as a `(name, table)` section
pub fn default_config_section<T: RuleConfig>() -> Option<(String, toml::Value)> {
    match toml::Value::try_from(T::default()) {
        Ok(value @ toml::Value::Table(_)) => Some((T::RULE_NAME.to_string(), value)),
        Ok(_) => None,
        Err(e) => {
            log::debug!("Could not serialize default config for {}: {}", T::RULE_NAME, e);
            None
        }
    }
}
