use super::*;
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_normalize_key() {
    assert_eq!(normalize_key("md101"), "MD101");
    assert_eq!(normalize_key("MD102"), "MD102");
    assert_eq!(normalize_key("Math_Surrounded_By_Blank_Lines"), "math-surrounded-by-blank-lines");
    assert_eq!(normalize_key("list_items"), "list-items");
    assert_eq!(normalize_key("md10x"), "md10x");
}

#[test]
fn test_sections_are_normalized_and_merged() {
    let config = Config::from_toml_str(
        r#"
[md101]
list_items = false

[MD101]
other = 1
"#,
    )
    .unwrap();
    assert_eq!(config.rules.len(), 1);
    let section = &config.rules["MD101"];
    assert_eq!(section.values.get("list_items"), Some(&toml::Value::Boolean(false)));
    assert_eq!(section.values.get("other"), Some(&toml::Value::Integer(1)));
}

#[test]
fn test_rule_name_wins_over_alias() {
    let config = Config::from_toml_str(
        r#"
[math-surrounded-by-blank-lines]
list_items = true

[MD101]
list-items = false
"#,
    )
    .unwrap();
    let merged = config.rule_config(&["MD101", "math-surrounded-by-blank-lines"]).unwrap();
    assert_eq!(merged.values.get("list-items"), Some(&toml::Value::Boolean(false)));
    assert!(config.rule_config(&["MD102"]).is_none());
}

#[test]
fn test_load_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("lint.toml");
    fs::write(&path, "[MD101]\nlist_items = false\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert!(config.rules.contains_key("MD101"));
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::IoError { .. }));
    assert!(err.to_string().contains("missing.toml"));
}

#[test]
fn test_parse_error() {
    let err = Config::from_toml_str("[MD101\nlist_items = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn test_default_registry_knows_both_rules() {
    let registry = default_registry();
    let names: Vec<String> = registry.rule_names().into_iter().collect();
    assert_eq!(names, vec!["MD101".to_string(), "MD102".to_string()]);
    assert_eq!(
        registry.resolve_rule_name("no_entirely_strong_heading"),
        Some("MD102".to_string())
    );
    assert_eq!(
        registry.config_keys_for("MD101").unwrap().into_iter().collect::<Vec<_>>(),
        vec!["list-items".to_string()]
    );
    assert!(registry.config_keys_for("MD102").unwrap().is_empty());
}

#[test]
fn test_validate_config_reports_unknown_entries() {
    let config = Config::from_toml_str(
        r#"
[MD101]
list_items = false
fences = true

[MD999]
enabled = true
"#,
    )
    .unwrap();
    let warnings = validate_config(&config, default_registry());
    assert_eq!(warnings.len(), 2);
    assert_eq!(warnings[0].rule.as_deref(), Some("MD101"));
    assert_eq!(warnings[0].key.as_deref(), Some("fences"));
    assert_eq!(warnings[1].rule.as_deref(), Some("MD999"));
    assert_eq!(warnings[1].key, None);
}

#[test]
fn test_validate_config_accepts_aliases() {
    let config = Config::from_toml_str("[math-surrounded-by-blank-lines]\nlist-items = true\n").unwrap();
    assert!(validate_config(&config, default_registry()).is_empty());
}
