use crate::markdown;
use crate::token::TokenTree;

/// Content characteristics for efficient rule filtering
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ContentCharacteristics {
    pub has_headings: bool, // # or setext underline
    pub has_emphasis: bool, // * or _
    pub has_math: bool,     // $
}

impl ContentCharacteristics {
    pub fn analyze<'l>(lines: impl IntoIterator<Item = &'l str>) -> Self {
        let mut chars = Self::default();
        for line in lines {
            // Any `#` counts, so headings nested in list items or block quotes are not missed
            let trimmed = line.trim_start_matches(|c: char| c.is_whitespace() || c == '>');
            if !chars.has_headings
                && (line.contains('#')
                    || (trimmed.len() > 1 && trimmed.trim_end().chars().all(|c| c == '=' || c == '-')))
            {
                chars.has_headings = true;
            }
            if !chars.has_emphasis && (line.contains('*') || line.contains('_')) {
                chars.has_emphasis = true;
            }
            if !chars.has_math && line.contains('$') {
                chars.has_math = true;
            }
        }
        chars
    }
}

/// One document under analysis: its source lines plus the token tree describing them.
///
/// Read-only for the whole pass, so a single context can be shared by every rule.
#[derive(Debug, Clone)]
pub struct LintContext<'a> {
    lines: Vec<&'a str>,
    pub tokens: TokenTree,
    characteristics: ContentCharacteristics,
}

impl<'a> LintContext<'a> {
    /// Tokenize `content` with the pulldown-cmark adapter.
    pub fn new(content: &'a str) -> Self {
        let tokens = markdown::tokenize(content);
        Self::from_parts(content.lines().collect(), tokens)
    }

    /// Wrap lines and a token tree produced by an external parser.
    pub fn from_parts(lines: Vec<&'a str>, tokens: TokenTree) -> Self {
        let characteristics = ContentCharacteristics::analyze(lines.iter().copied());
        Self {
            lines,
            tokens,
            characteristics,
        }
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Line by 1-based number; `None` outside the document (including line 0).
    pub fn line(&self, line_number: usize) -> Option<&'a str> {
        line_number.checked_sub(1).and_then(|idx| self.lines.get(idx).copied())
    }

    pub fn characteristics(&self) -> ContentCharacteristics {
        self.characteristics
    }

    pub fn likely_has_headings(&self) -> bool {
        self.characteristics.has_headings
    }

    pub fn likely_has_emphasis(&self) -> bool {
        self.characteristics.has_emphasis
    }

    pub fn likely_has_math(&self) -> bool {
        self.characteristics.has_math
    }
}
