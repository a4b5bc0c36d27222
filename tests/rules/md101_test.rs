use mdlint_rules::config::Config;
use mdlint_rules::lint_context::LintContext;
use mdlint_rules::rule::{Fix, Rule};
use mdlint_rules::rules::{MD101MathSurroundedByBlankLines, create_rule_by_name};
use pretty_assertions::assert_eq;

fn check(content: &str) -> Vec<mdlint_rules::Diagnostic> {
    let ctx = LintContext::new(content);
    MD101MathSurroundedByBlankLines::default().check_all(&ctx)
}

#[test]
fn test_math_block_after_text() {
    let result = check("Some text\n$$x=1$$\n");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].rule_name, "MD101");
    assert_eq!(result[0].line, 2);
    assert_eq!(result[0].detail, "$$x=1$$");
    assert_eq!(
        result[0].fix,
        Some(Fix::InsertLine {
            insert_at_line: 2,
            text: String::new()
        })
    );
}

#[test]
fn test_surrounded_math_block() {
    assert!(check("Some text\n\n$$x=1$$\n\nMore text\n").is_empty());
}

#[test]
fn test_math_block_at_document_edges() {
    assert!(check("$$x=1$$\n").is_empty());
    assert!(check("$$x=1$$").is_empty());
}

#[test]
fn test_math_block_before_text() {
    let result = check("Intro\n\n$$x=1$$\nAfter\n");
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].line, 3);
    assert_eq!(
        result[0].fix,
        Some(Fix::InsertLine {
            insert_at_line: 4,
            text: String::new()
        })
    );
}

#[test]
fn test_inline_display_math_is_not_a_block() {
    assert!(check("Euler wrote $$e^{i\\pi}=-1$$ once\n").is_empty());
}

#[test]
fn test_math_block_in_block_quote() {
    let result = check("> Quoted text\n> $$x=1$$\n");
    assert_eq!(result.len(), 1);
    assert_eq!(
        result[0].fix,
        Some(Fix::InsertLine {
            insert_at_line: 2,
            text: ">".to_string()
        })
    );
}

#[test]
fn test_list_items_disabled_by_config() {
    let content = "- item\n  $$x=1$$\n";
    let ctx = LintContext::new(content);

    let default_rule = create_rule_by_name("MD101", &Config::default()).unwrap();
    assert_eq!(default_rule.check_all(&ctx).len(), 1);

    let config = Config::from_toml_str("[MD101]\nlist_items = false\n").unwrap();
    let configured = create_rule_by_name("math-surrounded-by-blank-lines", &config).unwrap();
    assert!(configured.check_all(&ctx).is_empty());
}

#[test]
fn test_invalid_config_falls_back_to_default() {
    let config = Config::from_toml_str("[MD101]\nlist_items = \"sometimes\"\n").unwrap();
    let rule = create_rule_by_name("MD101", &config).unwrap();
    let ctx = LintContext::new("- item\n  $$x=1$$\n");
    assert_eq!(rule.check_all(&ctx).len(), 1);
}

#[test]
fn test_display_math_in_heading_is_not_a_block() {
    assert!(check("Intro\n# $$x$$\nBody\n").is_empty());
    assert!(check("Intro\n# $$E=mc^2$$\nBody\n").is_empty());
}
