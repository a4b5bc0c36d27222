use crate::lint_context::LintContext;
use crate::rule::{Diagnostic, ErrorRange, Fix, Rule, RuleCategory, add_error_context};
use crate::token::{TokenRef, TokenType};

/// Rule MD102: Heading text should not be entirely bold
///
/// A heading is already emphasized by its level, so wrapping the whole text in `**` adds
/// nothing. The fix unwraps the bold run and leaves any surrounding italic markers alone.
///
/// Matches `# **Heading**`, `# *__Heading__*` and `# **_Heading_**`, but not
/// `# **Heading** text` or `# **Bold** *and italic*`.
#[derive(Debug, Clone, Default)]
pub struct MD102NoEntirelyStrongHeading;

impl MD102NoEntirelyStrongHeading {
    pub fn new() -> Self {
        Self
    }
}

/// The `strong` token making up the whole heading text, looking through at most one
/// italic layer.
fn entirely_strong<'t>(heading: TokenRef<'t>) -> Option<TokenRef<'t>> {
    let heading_text = heading.find_child(&TokenType::AtxHeadingText)?;
    let mut token = heading_text.single_child()?;
    if token.kind() == &TokenType::Emphasis {
        token = token.find_child(&TokenType::EmphasisText)?.single_child()?;
    }
    (token.kind() == &TokenType::Strong).then_some(token)
}

impl Rule for MD102NoEntirelyStrongHeading {
    fn names(&self) -> &'static [&'static str] {
        &["MD102", "no-entirely-strong-heading"]
    }

    fn description(&self) -> &'static str {
        "Heading text should not be entirely bold"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["headings", "atx", "atx_closed", "emphasis"]
    }

    fn category(&self) -> RuleCategory {
        RuleCategory::Heading
    }

    fn check(&self, ctx: &LintContext, on_error: &mut dyn FnMut(Diagnostic)) {
        for heading in ctx.tokens.filter_by_types(&[TokenType::AtxHeading]) {
            let Some(strong) = entirely_strong(heading) else {
                continue;
            };
            let Some(strong_text) = strong.find_child(&TokenType::StrongText) else {
                log::trace!("MD102: strong token without text at line {}", strong.span().start_line);
                continue;
            };

            let span = strong.span();
            let length = span.end_column.saturating_sub(span.start_column);
            add_error_context(
                on_error,
                self.name(),
                span.start_line,
                strong.text(),
                Some(ErrorRange::new(span.start_column, length)),
                Some(Fix::Replace {
                    edit_column: span.start_column,
                    delete_count: length,
                    insert_text: strong_text.text().to_string(),
                }),
            );
        }
    }

    fn should_skip(&self, ctx: &LintContext) -> bool {
        !ctx.likely_has_headings() || !ctx.likely_has_emphasis()
    }

    fn from_config(_config: &crate::config::Config) -> Box<dyn Rule>
    where
        Self: Sized,
    {
        Box::new(MD102NoEntirelyStrongHeading::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Span, TokenNode, TokenTree};
    use pretty_assertions::assert_eq;

    /// `**text**` starting at `column` on `line`
    fn strong(line: usize, column: usize, text: &str) -> TokenNode {
        let width = text.chars().count();
        let end = column + width + 4;
        TokenNode::new("strong", Span::new(line, column, line, end), format!("**{text}**")).with_children(vec![
            TokenNode::new("strongSequence", Span::new(line, column, line, column + 2), "**"),
            TokenNode::new("strongText", Span::new(line, column + 2, line, end - 2), text).with_children(vec![
                TokenNode::new("data", Span::new(line, column + 2, line, end - 2), text),
            ]),
            TokenNode::new("strongSequence", Span::new(line, end - 2, line, end), "**"),
        ])
    }

    fn heading(line: usize, end_column: usize, inline: Vec<TokenNode>) -> TokenNode {
        let mut children = vec![TokenNode::new("atxHeadingSequence", Span::new(line, 1, line, 2), "#")];
        if let (Some(first), Some(last)) = (inline.first(), inline.last()) {
            let span = Span::new(line, first.span.start_column, line, last.span.end_column);
            children.push(TokenNode::new("atxHeadingText", span, "").with_children(inline));
        }
        TokenNode::new("atxHeading", Span::new(line, 1, line, end_column), "").with_children(children)
    }

    fn run(lines: &[&str], roots: Vec<TokenNode>) -> Vec<Diagnostic> {
        let ctx = LintContext::from_parts(lines.to_vec(), TokenTree::new(roots));
        MD102NoEntirelyStrongHeading.check_all(&ctx)
    }

    #[test]
    fn test_entirely_bold_heading() {
        let lines = ["# **Important**"];
        let result = run(&lines, vec![heading(1, 16, vec![strong(1, 3, "Important")])]);
        assert_eq!(
            result,
            vec![Diagnostic {
                rule_name: "MD102".to_string(),
                line: 1,
                detail: "**Important**".to_string(),
                range: Some(ErrorRange::new(3, 13)),
                fix: Some(Fix::Replace {
                    edit_column: 3,
                    delete_count: 13,
                    insert_text: "Important".to_string(),
                }),
            }]
        );
    }

    #[test]
    fn test_bold_with_trailing_text_is_allowed() {
        let lines = ["# **Done** for now"];
        let trailing = TokenNode::new("data", Span::new(1, 11, 1, 19), " for now");
        let result = run(&lines, vec![heading(1, 19, vec![strong(1, 3, "Done"), trailing])]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_italic_only_heading_is_allowed() {
        let lines = ["# *Important*"];
        let emphasis = TokenNode::new("emphasis", Span::new(1, 3, 1, 14), "*Important*").with_children(vec![
            TokenNode::new("emphasisSequence", Span::new(1, 3, 1, 4), "*"),
            TokenNode::new("emphasisText", Span::new(1, 4, 1, 13), "Important").with_children(vec![TokenNode::new(
                "data",
                Span::new(1, 4, 1, 13),
                "Important",
            )]),
            TokenNode::new("emphasisSequence", Span::new(1, 13, 1, 14), "*"),
        ]);
        let result = run(&lines, vec![heading(1, 14, vec![emphasis])]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_italic_wrapping_bold_is_flagged() {
        // # *__Note__*
        let lines = ["# *__Note__*"];
        let inner = TokenNode::new("strong", Span::new(1, 4, 1, 12), "__Note__").with_children(vec![
            TokenNode::new("strongSequence", Span::new(1, 4, 1, 6), "__"),
            TokenNode::new("strongText", Span::new(1, 6, 1, 10), "Note"),
            TokenNode::new("strongSequence", Span::new(1, 10, 1, 12), "__"),
        ]);
        let emphasis = TokenNode::new("emphasis", Span::new(1, 3, 1, 13), "*__Note__*").with_children(vec![
            TokenNode::new("emphasisSequence", Span::new(1, 3, 1, 4), "*"),
            TokenNode::new("emphasisText", Span::new(1, 4, 1, 12), "__Note__").with_children(vec![inner]),
            TokenNode::new("emphasisSequence", Span::new(1, 12, 1, 13), "*"),
        ]);
        let result = run(&lines, vec![heading(1, 13, vec![emphasis])]);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].range, Some(ErrorRange::new(4, 8)));
        assert_eq!(
            result[0].fix,
            Some(Fix::Replace {
                edit_column: 4,
                delete_count: 8,
                insert_text: "Note".to_string(),
            })
        );
    }

    #[test]
    fn test_bold_wrapping_italic_is_flagged() {
        let lines = ["# **_Note_**"];
        let italic = TokenNode::new("emphasis", Span::new(1, 5, 1, 11), "_Note_");
        let outer = TokenNode::new("strong", Span::new(1, 3, 1, 13), "**_Note_**").with_children(vec![
            TokenNode::new("strongSequence", Span::new(1, 3, 1, 5), "**"),
            TokenNode::new("strongText", Span::new(1, 5, 1, 11), "_Note_").with_children(vec![italic]),
            TokenNode::new("strongSequence", Span::new(1, 11, 1, 13), "**"),
        ]);
        let result = run(&lines, vec![heading(1, 13, vec![outer])]);
        // Unwrapping keeps the italic markers
        assert_eq!(result.len(), 1);
        assert_eq!(
            result[0].fix,
            Some(Fix::Replace {
                edit_column: 3,
                delete_count: 10,
                insert_text: "_Note_".to_string(),
            })
        );
    }

    #[test]
    fn test_two_italic_layers_are_not_looked_through() {
        let lines = ["# *_**x**_*"];
        let inner = TokenNode::new("emphasis", Span::new(1, 4, 1, 11), "_**x**_").with_children(vec![
            TokenNode::new("emphasisText", Span::new(1, 5, 1, 10), "**x**").with_children(vec![strong(1, 5, "x")]),
        ]);
        let outer = TokenNode::new("emphasis", Span::new(1, 3, 1, 12), "*_**x**_*").with_children(vec![
            TokenNode::new("emphasisText", Span::new(1, 4, 1, 11), "_**x**_").with_children(vec![inner]),
        ]);
        assert!(run(&lines, vec![heading(1, 12, vec![outer])]).is_empty());
    }

    #[test]
    fn test_emphasis_with_several_children_is_allowed() {
        let lines = ["# *__a__ b*"];
        let emphasis = TokenNode::new("emphasis", Span::new(1, 3, 1, 12), "*__a__ b*").with_children(vec![
            TokenNode::new("emphasisText", Span::new(1, 4, 1, 11), "__a__ b").with_children(vec![
                strong(1, 4, "a"),
                TokenNode::new("data", Span::new(1, 9, 1, 11), " b"),
            ]),
        ]);
        assert!(run(&lines, vec![heading(1, 12, vec![emphasis])]).is_empty());
    }

    #[test]
    fn test_malformed_shapes_are_skipped() {
        let lines = ["#", "# **x**"];
        // Heading without text
        let empty = heading(1, 2, Vec::new());
        // Strong without a strongText child
        let bare_strong = TokenNode::new("strong", Span::new(2, 3, 2, 8), "**x**");
        let malformed = heading(2, 8, vec![bare_strong]);
        // Emphasis without an emphasisText child
        let bare_emphasis = TokenNode::new("emphasis", Span::new(2, 3, 2, 8), "*x*");
        let malformed_emphasis = heading(2, 8, vec![bare_emphasis]);
        assert!(run(&lines, vec![empty, malformed, malformed_emphasis]).is_empty());
    }

    #[test]
    fn test_setext_heading_is_ignored() {
        let ctx = LintContext::new("**Title**\n=========\n");
        assert!(MD102NoEntirelyStrongHeading.check_all(&ctx).is_empty());
    }

    #[test]
    fn test_tokenized_heading() {
        let ctx = LintContext::new("# **Important**\n\n## Plain\n");
        let result = MD102NoEntirelyStrongHeading.check_all(&ctx);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].line, 1);
        assert_eq!(result[0].range, Some(ErrorRange::new(3, 13)));
    }

    #[test]
    fn test_should_skip() {
        let rule = MD102NoEntirelyStrongHeading;
        assert!(rule.should_skip(&LintContext::new("plain **bold** text\n")));
        assert!(rule.should_skip(&LintContext::new("# Heading\n")));
        assert!(!rule.should_skip(&LintContext::new("# **Heading**\n")));
    }
}
