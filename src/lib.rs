pub mod config;
pub mod fix_coordinator;
pub mod lint_context;
pub mod markdown;
pub mod rule;
pub mod rule_config_serde;
pub mod rules;
pub mod token;
pub mod utils;

pub use rules::*;

pub use crate::fix_coordinator::{FixError, apply_fixes};
pub use crate::lint_context::{ContentCharacteristics, LintContext};
pub use crate::rule::{Diagnostic, ErrorRange, Fix, Rule, RuleCategory, add_error_context};
pub use crate::token::{Span, TokenNode, TokenRef, TokenTree, TokenType};

/// Lint a document with the given rules, returning diagnostics ordered by line.
pub fn lint(content: &str, rules: &[Box<dyn Rule>]) -> Vec<Diagnostic> {
    if content.is_empty() {
        return Vec::new();
    }
    let ctx = LintContext::new(content);
    lint_context(&ctx, rules)
}

/// Run `rules` over an already-built context.
///
/// Rules whose `should_skip` fast path fires are not run. Diagnostics keep the order each
/// rule emitted them within a line.
pub fn lint_context(ctx: &LintContext, rules: &[Box<dyn Rule>]) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for rule in rules {
        if rule.should_skip(ctx) {
            log::trace!("Skipping rule {}: content has nothing it checks", rule.name());
            continue;
        }
        let before = diagnostics.len();
        rule.check(ctx, &mut |diagnostic| diagnostics.push(diagnostic));
        log::debug!("Rule {} reported {} issue(s)", rule.name(), diagnostics.len() - before);
    }
    diagnostics.sort_by_key(|d| d.line);
    diagnostics
}

/// Lint many documents, in parallel when the `parallel` feature is enabled.
#[cfg(feature = "parallel")]
pub fn lint_documents(documents: &[&str], rules: &[Box<dyn Rule>]) -> Vec<Vec<Diagnostic>> {
    use rayon::prelude::*;

    documents.par_iter().map(|content| lint(content, rules)).collect()
}

#[cfg(not(feature = "parallel"))]
pub fn lint_documents(documents: &[&str], rules: &[Box<dyn Rule>]) -> Vec<Vec<Diagnostic>> {
    documents.iter().map(|content| lint(content, rules)).collect()
}

/// Lint `content` and apply every proposed fix.
pub fn fix(content: &str, rules: &[Box<dyn Rule>]) -> Result<String, FixError> {
    let diagnostics = lint(content, rules);
    if diagnostics.iter().all(|d| d.fix.is_none()) {
        return Ok(content.to_string());
    }
    apply_fixes(content, &diagnostics)
}
