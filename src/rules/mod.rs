mod md101_math_surrounded_by_blank_lines;
pub use md101_math_surrounded_by_blank_lines::{MD101Config, MD101MathSurroundedByBlankLines};

mod md102_no_entirely_strong_heading;
pub use md102_no_entirely_strong_heading::MD102NoEntirelyStrongHeading;

use crate::config::{Config, normalize_key};
use crate::rule::Rule;

/// Type alias for rule constructor functions
type RuleCtor = fn(&Config) -> Box<dyn Rule>;

/// Entry in the rule registry
struct RuleEntry {
    name: &'static str,
    alias: &'static str,
    ctor: RuleCtor,
}

/// Registry of all available rules with their constructor functions
const RULES: &[RuleEntry] = &[
    RuleEntry {
        name: "MD101",
        alias: "math-surrounded-by-blank-lines",
        ctor: MD101MathSurroundedByBlankLines::from_config,
    },
    RuleEntry {
        name: "MD102",
        alias: "no-entirely-strong-heading",
        ctor: MD102NoEntirelyStrongHeading::from_config,
    },
];

/// Returns every rule, configured from `config`
pub fn all_rules(config: &Config) -> Vec<Box<dyn Rule>> {
    RULES.iter().map(|entry| (entry.ctor)(config)).collect()
}

/// Creates a single rule by name or alias (case-insensitive) with the given config
///
/// Returns None if the rule name is not found.
pub fn create_rule_by_name(name: &str, config: &Config) -> Option<Box<dyn Rule>> {
    let norm = normalize_key(name);
    RULES
        .iter()
        .find(|entry| entry.name == norm || entry.alias == norm)
        .map(|entry| (entry.ctor)(config))
}
