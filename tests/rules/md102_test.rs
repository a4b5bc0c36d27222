use mdlint_rules::config::Config;
use mdlint_rules::lint_context::LintContext;
use mdlint_rules::rule::{ErrorRange, Fix, Rule};
use mdlint_rules::rules::{MD102NoEntirelyStrongHeading, all_rules};
use mdlint_rules::{fix, lint};
use pretty_assertions::assert_eq;

fn check(content: &str) -> Vec<mdlint_rules::Diagnostic> {
    let ctx = LintContext::new(content);
    MD102NoEntirelyStrongHeading::new().check_all(&ctx)
}

#[test]
fn test_entirely_bold_heading() {
    let result = check("# **Important**\n");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].line, 1);
    assert_eq!(result[0].detail, "**Important**");
    assert_eq!(result[0].range, Some(ErrorRange::new(3, 13)));
    assert_eq!(
        result[0].fix,
        Some(Fix::Replace {
            edit_column: 3,
            delete_count: 13,
            insert_text: "Important".to_string(),
        })
    );
}

#[test]
fn test_partially_bold_heading() {
    assert!(check("# **Done** for now\n").is_empty());
    assert!(check("## Plain heading\n").is_empty());
}

#[test]
fn test_underscore_strong_inside_italic() {
    let result = check("### *__Note__*\n");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].range, Some(ErrorRange::new(6, 8)));
}

#[test]
fn test_closed_atx_heading() {
    let result = check("## **Title** ##\n");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].range, Some(ErrorRange::new(4, 9)));
}

#[test]
fn test_setext_heading_is_ignored() {
    assert!(check("**Title**\n=========\n").is_empty());
}

#[test]
fn test_fix_is_idempotent() {
    let rules = all_rules(&Config::default());
    let fixed = fix("# **Important**\n\nBody\n", &rules).unwrap();
    assert_eq!(fixed, "# Important\n\nBody\n");
    assert!(lint(&fixed, &rules).is_empty());
    assert_eq!(fix(&fixed, &rules).unwrap(), fixed);
}

#[test]
fn test_heading_inside_list_item_is_linted() {
    let rules = all_rules(&Config::default());
    for content in ["- # **Important**\n", "1. # **Important**\n"] {
        let diagnostics = lint(content, &rules);
        let lines: Vec<(&str, usize)> = diagnostics.iter().map(|d| (d.rule_name.as_str(), d.line)).collect();
        assert_eq!(lines, vec![("MD102", 1)], "content: {content:?}");
    }
    assert_eq!(fix("- # **Important**\n", &rules).unwrap(), "- # Important\n");
}
