use crate::rule_config_serde::RuleConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MD101Config {
    /// Whether math blocks nested inside list items are checked
    #[serde(default = "default_list_items", alias = "list-items")]
    pub list_items: bool,
}

impl Default for MD101Config {
    fn default() -> Self {
        Self {
            list_items: default_list_items(),
        }
    }
}

fn default_list_items() -> bool {
    true
}

impl RuleConfig for MD101Config {
    const RULE_NAME: &'static str = "MD101";
    const RULE_ALIAS: &'static str = "math-surrounded-by-blank-lines";
}
