use crate::lint_context::LintContext;
use serde::{Deserialize, Serialize};

/// Maximum context length before `display_context` shortens it
const MAX_CONTEXT_LENGTH: usize = 30;

/// A proposed minimal edit resolving one diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fix {
    /// Insert `text` as a new line before line `insert_at_line`
    InsertLine {
        #[serde(rename = "insertAtLine")]
        insert_at_line: usize,
        text: String,
    },
    /// Replace `delete_count` characters starting at `edit_column` on the diagnostic's line
    Replace {
        #[serde(rename = "editColumn")]
        edit_column: usize,
        #[serde(rename = "deleteCount")]
        delete_count: usize,
        #[serde(rename = "insertText")]
        insert_text: String,
    },
}

/// Sub-span of a line: 1-based column and length in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorRange {
    pub column: usize,
    pub length: usize,
}

impl ErrorRange {
    pub const fn new(column: usize, length: usize) -> Self {
        Self { column, length }
    }
}

/// One reported rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub rule_name: String,
    pub line: usize,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<ErrorRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Fix>,
}

impl Diagnostic {
    /// Context shortened for display, keeping the first characters
    pub fn display_context(&self) -> String {
        if self.detail.chars().count() <= MAX_CONTEXT_LENGTH {
            self.detail.clone()
        } else {
            let head: String = self.detail.chars().take(MAX_CONTEXT_LENGTH).collect();
            format!("{head}...")
        }
    }
}

/// Builds a diagnostic stamped with its location and context, then hands it to `on_error`.
///
/// `context` is trimmed here so rules can pass raw line text.
pub fn add_error_context(
    on_error: &mut dyn FnMut(Diagnostic),
    rule_name: &str,
    line: usize,
    context: &str,
    range: Option<ErrorRange>,
    fix: Option<Fix>,
) {
    on_error(Diagnostic {
        rule_name: rule_name.to_string(),
        line,
        detail: context.trim().to_string(),
        range,
        fix,
    });
}

/// Serialize diagnostics in the shape hosts consume
pub fn diagnostics_to_json(diagnostics: &[Diagnostic]) -> serde_json::Result<String> {
    serde_json::to_string(diagnostics)
}

/// Token format a rule expects from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserKind {
    Micromark,
}

/// Type of rule for selective processing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    Heading,
    Math,
    Other,
}

pub trait Rule: Send + Sync {
    /// Primary name followed by aliases, e.g. `["MD101", "math-surrounded-by-blank-lines"]`
    fn names(&self) -> &'static [&'static str];

    fn name(&self) -> &'static str {
        self.names().first().copied().unwrap_or("")
    }

    fn description(&self) -> &'static str;

    fn tags(&self) -> &'static [&'static str];

    fn parser(&self) -> ParserKind {
        ParserKind::Micromark
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Other
    }

    /// Report every violation in `ctx` through `on_error`, in document order
    fn check(&self, ctx: &LintContext, on_error: &mut dyn FnMut(Diagnostic));

    /// Collect the diagnostics `check` reports
    fn check_all(&self, ctx: &LintContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        self.check(ctx, &mut |diagnostic| diagnostics.push(diagnostic));
        diagnostics
    }

    /// Check if this rule can be skipped for the given content
    fn should_skip(&self, _ctx: &LintContext) -> bool {
        false
    }

    /// Default options as a `[name]` TOML section, if the rule has any
    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        None
    }

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized;
}
