use crate::lint_context::LintContext;
use crate::rule::{Diagnostic, Fix, Rule, RuleCategory, add_error_context};
use crate::rule_config_serde::{RuleConfig, default_config_section, load_rule_config};
use crate::token::TokenType;
use crate::utils::blank_lines::is_blank_line;
use crate::utils::regex_cache::MATH_BLOCK_PREFIX_REGEX;

mod md101_config;
pub use md101_config::MD101Config;

const LIST_TYPES: [TokenType; 2] = [TokenType::ListOrdered, TokenType::ListUnordered];

/// Rule MD101: Math blocks should be surrounded by blank lines
///
/// Flags `mathFlow` blocks whose neighbouring lines hold content, and proposes inserting a
/// blank line that keeps any block quote markers of the offending line.
///
/// ## Examples
///
/// ### Correct
///
/// ```markdown
/// Some text
///
/// $$
/// x = 1
/// $$
///
/// More text
/// ```
///
/// ### Incorrect
///
/// ```markdown
/// Some text
/// $$
/// x = 1
/// $$
/// More text
/// ```
///
/// ## Configuration
///
/// ```toml
/// [MD101]
/// list_items = true  # also check math blocks nested in lists (default: true)
/// ```
///
/// A block starting on the first line has nothing above it to check, and a block ending on
/// the last line has nothing below.
#[derive(Debug, Clone, Default)]
pub struct MD101MathSurroundedByBlankLines {
    config: MD101Config,
}

impl MD101MathSurroundedByBlankLines {
    pub fn new(list_items: bool) -> Self {
        Self {
            config: MD101Config { list_items },
        }
    }

    pub const fn from_config_struct(config: MD101Config) -> Self {
        Self { config }
    }

    /// Report the top or bottom edge of a math block at `line_number`.
    fn report(&self, ctx: &LintContext, on_error: &mut dyn FnMut(Diagnostic), line_number: usize, top: bool) {
        let Some(line) = ctx.line(line_number) else {
            log::trace!("MD101: math block edge at line {line_number} is outside the document");
            return;
        };
        let fix = MATH_BLOCK_PREFIX_REGEX
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|prefix| Fix::InsertLine {
                insert_at_line: if top { line_number } else { line_number + 1 },
                text: blank_line_for_prefix(prefix.as_str()),
            });
        add_error_context(on_error, self.name(), line_number, line, None, fix);
    }
}

/// Blank line preserving the block quote nesting of `prefix`.
fn blank_line_for_prefix(prefix: &str) -> String {
    prefix
        .chars()
        .map(|c| if c == '>' { '>' } else { ' ' })
        .collect::<String>()
        .trim()
        .to_string()
}

impl Rule for MD101MathSurroundedByBlankLines {
    fn names(&self) -> &'static [&'static str] {
        &["MD101", "math-surrounded-by-blank-lines"]
    }

    fn description(&self) -> &'static str {
        "Math Blocks should be surrounded by blank lines"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["math", "blank_lines"]
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Math
    }

    fn check(&self, ctx: &LintContext, on_error: &mut dyn FnMut(Diagnostic)) {
        for math_block in ctx.tokens.filter_by_types(&[TokenType::MathFlow]) {
            if !self.config.list_items && math_block.parent_of_type(&LIST_TYPES).is_some() {
                log::trace!("MD101: skipping math block in list at line {}", math_block.span().start_line);
                continue;
            }

            let span = math_block.span();
            if !is_blank_line(ctx.line(span.start_line.saturating_sub(1))) {
                self.report(ctx, on_error, span.start_line, true);
            }
            if !is_blank_line(ctx.line(span.end_line + 1)) && !is_blank_line(ctx.line(span.end_line)) {
                self.report(ctx, on_error, span.end_line, false);
            }
        }
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.likely_has_math()
    }

    fn default_config_section(&self) -> Option<(String, toml::Value)> {
        default_config_section::<MD101Config>()
    }

    fn from_config(config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        let rule_config: MD101Config = load_rule_config(config);
        log::debug!("{} list_items = {}", MD101Config::RULE_NAME, rule_config.list_items);
        Box::new(Self::from_config_struct(rule_config))
    }
}
