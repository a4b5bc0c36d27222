use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use crate::rule::Rule;

use super::types::normalize_key;

/// Lazily-initialized default `RuleRegistry` built from rules with default config.
static DEFAULT_REGISTRY: LazyLock<RuleRegistry> = LazyLock::new(|| {
    let default_config = super::types::Config::default();
    let rules = crate::rules::all_rules(&default_config);
    RuleRegistry::from_rules(&rules)
});

/// Returns a reference to the lazily-initialized default `RuleRegistry`.
pub fn default_registry() -> &'static RuleRegistry {
    &DEFAULT_REGISTRY
}

/// Registry of all known rules and their config schemas
pub struct RuleRegistry {
    /// Map of rule name (e.g. "MD101") to its valid config keys and default values
    pub rule_schemas: BTreeMap<String, toml::map::Map<String, toml::Value>>,
    /// Map of normalized alias (e.g. "math-surrounded-by-blank-lines") to rule name
    pub rule_aliases: HashMap<String, String>,
}

impl RuleRegistry {
    /// Build a registry from a list of rules
    pub fn from_rules(rules: &[Box<dyn Rule>]) -> Self {
        let mut rule_schemas = BTreeMap::new();
        let mut rule_aliases = HashMap::new();

        for rule in rules {
            let norm_name = normalize_key(rule.name());
            let schema = match rule.default_config_section() {
                Some((_, toml::Value::Table(table))) => table,
                _ => toml::map::Map::new(),
            };
            rule_schemas.insert(norm_name.clone(), schema);

            for alias in rule.names().iter().skip(1) {
                rule_aliases.insert(normalize_key(alias), norm_name.clone());
            }
        }

        RuleRegistry {
            rule_schemas,
            rule_aliases,
        }
    }

    /// Get all known rule names
    pub fn rule_names(&self) -> BTreeSet<String> {
        self.rule_schemas.keys().cloned().collect()
    }

    /// Resolve a section name (rule name or alias, any case) to the rule name
    pub fn resolve_rule_name(&self, name: &str) -> Option<String> {
        let norm = normalize_key(name);
        if self.rule_schemas.contains_key(&norm) {
            return Some(norm);
        }
        self.rule_aliases.get(&norm).cloned()
    }

    /// Get the valid configuration keys for a rule, normalized
    pub fn config_keys_for(&self, rule: &str) -> Option<BTreeSet<String>> {
        self.rule_schemas
            .get(rule)
            .map(|schema| schema.keys().map(|key| normalize_key(key)).collect())
    }
}
