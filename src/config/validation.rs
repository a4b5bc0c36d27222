use super::registry::RuleRegistry;
use super::types::{Config, normalize_key};

/// A problem found in configuration that does not stop linting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValidationWarning {
    pub message: String,
    pub rule: Option<String>,
    pub key: Option<String>,
}

/// Report unknown rule sections and unknown option keys.
///
/// Unknown entries are ignored when rules are built, so these are warnings only.
pub fn validate_config(config: &Config, registry: &RuleRegistry) -> Vec<ConfigValidationWarning> {
    let mut warnings = Vec::new();

    for (section, rule_config) in &config.rules {
        let Some(rule_name) = registry.resolve_rule_name(section) else {
            warnings.push(ConfigValidationWarning {
                message: format!("Unknown rule in config: {section}"),
                rule: Some(section.clone()),
                key: None,
            });
            continue;
        };

        let valid_keys = registry.config_keys_for(&rule_name).unwrap_or_default();
        for key in rule_config.values.keys() {
            if !valid_keys.contains(&normalize_key(key)) {
                warnings.push(ConfigValidationWarning {
                    message: format!("Unknown option for rule {rule_name}: {key}"),
                    rule: Some(rule_name.clone()),
                    key: Some(key.clone()),
                });
            }
        }
    }

    for warning in &warnings {
        log::warn!("{}", warning.message);
    }
    warnings
}
