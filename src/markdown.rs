//! Adapter from pulldown-cmark events to the micromark-style token tree.
//!
//! pulldown-cmark does the parsing; this module only renames its constructs and adds the
//! wrapper tokens (`atxHeadingText`, `strongText`, sequences) the rules navigate through.
//! Display math is promoted to a `mathFlow` block when it occupies whole lines of its
//! paragraph, which is how math fences read in the source.

use crate::token::{Span, TokenNode, TokenTree, TokenType};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

/// Byte offsets of line starts, for converting ranges into 1-based line/column pairs.
struct LineIndex<'a> {
    content: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(content: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { content, line_starts }
    }

    fn line_start_for(&self, byte_offset: usize) -> (usize, usize) {
        let idx = self
            .line_starts
            .partition_point(|&start| start <= byte_offset)
            .saturating_sub(1);
        (idx + 1, self.line_starts.get(idx).copied().unwrap_or(0))
    }

    fn column(&self, line_start: usize, byte_offset: usize) -> usize {
        self.content
            .get(line_start..byte_offset)
            .map_or(0, |prefix| prefix.chars().count())
            + 1
    }

    fn span(&self, start: usize, end: usize) -> Span {
        let (start_line, start_line_byte) = self.line_start_for(start);
        let start_column = self.column(start_line_byte, start);
        if end <= start {
            return Span::new(start_line, start_column, start_line, start_column);
        }
        // End is exclusive, so the last covered byte decides the line
        let (end_line, end_line_byte) = self.line_start_for(end - 1);
        let end_column = self.column(end_line_byte, end);
        Span::new(start_line, start_column, end_line, end_column)
    }
}

/// Token under construction, positioned by byte offsets
#[derive(Debug)]
struct PendingNode {
    kind: TokenType,
    start: usize,
    end: usize,
    children: Vec<PendingNode>,
}

impl PendingNode {
    fn new(kind: TokenType, start: usize, end: usize) -> Self {
        Self {
            kind,
            start,
            end,
            children: Vec::new(),
        }
    }

    fn into_token(self, index: &LineIndex) -> TokenNode {
        let text = index.content.get(self.start..self.end).unwrap_or_default();
        TokenNode::new(self.kind, index.span(self.start, self.end), text)
            .with_children(self.children.into_iter().map(|child| child.into_token(index)).collect())
    }
}

struct TreeBuilder<'a> {
    content: &'a str,
    stack: Vec<PendingNode>,
    roots: Vec<PendingNode>,
    /// Whether the next inline event begins a line of its paragraph, heading or list item
    at_line_start: bool,
}

impl<'a> TreeBuilder<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            content,
            stack: Vec::new(),
            roots: Vec::new(),
            at_line_start: false,
        }
    }

    fn siblings(&mut self) -> &mut Vec<PendingNode> {
        match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.roots,
        }
    }

    fn trimmed_end(&self, start: usize, mut end: usize) -> usize {
        let bytes = self.content.as_bytes();
        while end > start && matches!(bytes.get(end - 1), Some(b'\n' | b'\r')) {
            end -= 1;
        }
        end
    }

    fn ends_line(&self, end: usize) -> bool {
        let rest = self.content.get(end..).unwrap_or_default();
        rest.split('\n').next().unwrap_or_default().trim().is_empty()
    }

    fn open(&mut self, kind: TokenType, start: usize, end: usize) {
        let end = self.trimmed_end(start, end);
        self.stack.push(PendingNode::new(kind, start, end));
    }

    fn close(&mut self) {
        let Some(mut node) = self.stack.pop() else {
            log::trace!("Unbalanced end event ignored");
            return;
        };
        match node.kind {
            TokenType::AtxHeading => {
                if let Some(text) = wrap_children(&mut node.children, TokenType::AtxHeadingText) {
                    node.children.push(text);
                }
            }
            TokenType::Strong => wrap_delimited(&mut node, TokenType::StrongSequence, TokenType::StrongText),
            TokenType::Emphasis => wrap_delimited(&mut node, TokenType::EmphasisSequence, TokenType::EmphasisText),
            _ => {}
        }
        self.at_line_start = false;
        self.siblings().push(node);
    }

    fn leaf(&mut self, kind: TokenType, start: usize, end: usize) {
        self.at_line_start = false;
        self.siblings().push(PendingNode::new(kind, start, end));
    }

    fn text(&mut self, start: usize, end: usize) {
        self.at_line_start = false;
        let siblings = self.siblings();
        if let Some(last) = siblings.last_mut()
            && last.kind == TokenType::Data
            && last.end == start
        {
            last.end = end;
            return;
        }
        siblings.push(PendingNode::new(TokenType::Data, start, end));
    }

    fn display_math(&mut self, start: usize, end: usize) {
        // Flow math only exists at block level, never inside a heading or inline span.
        // Tight list items carry their text without a paragraph event.
        let in_block = self
            .stack
            .last()
            .is_some_and(|node| matches!(node.kind, TokenType::Paragraph | TokenType::ListItem));
        let kind = if in_block && self.at_line_start && self.ends_line(end) {
            TokenType::MathFlow
        } else {
            TokenType::MathText
        };
        self.leaf(kind, start, end);
    }

    fn start_tag(&mut self, tag: &Tag, start: usize, end: usize) {
        let kind = match tag {
            Tag::Paragraph => TokenType::Paragraph,
            Tag::Heading { .. } => {
                let source = self.content.get(start..).unwrap_or_default();
                if source.trim_start().starts_with('#') {
                    TokenType::AtxHeading
                } else {
                    TokenType::SetextHeading
                }
            }
            Tag::BlockQuote(_) => TokenType::BlockQuote,
            Tag::CodeBlock(CodeBlockKind::Fenced(_)) => TokenType::Other("codeFenced".to_string()),
            Tag::CodeBlock(CodeBlockKind::Indented) => TokenType::Other("codeIndented".to_string()),
            Tag::HtmlBlock => TokenType::Other("htmlFlow".to_string()),
            Tag::List(Some(_)) => TokenType::ListOrdered,
            Tag::List(None) => TokenType::ListUnordered,
            Tag::Item => TokenType::ListItem,
            Tag::Emphasis => TokenType::Emphasis,
            Tag::Strong => TokenType::Strong,
            Tag::Strikethrough => TokenType::Other("strikethrough".to_string()),
            Tag::Link { .. } => TokenType::Other("link".to_string()),
            Tag::Image { .. } => TokenType::Other("image".to_string()),
            Tag::Table(_) => TokenType::Other("table".to_string()),
            other => TokenType::Other(tag_name(other)),
        };
        self.open(kind, start, end);
        if matches!(tag, Tag::Paragraph | Tag::Heading { .. } | Tag::Item) {
            self.at_line_start = true;
        }
    }

    fn event(&mut self, event: Event, start: usize, end: usize) {
        match event {
            Event::Start(tag) => self.start_tag(&tag, start, end),
            Event::End(_) => self.close(),
            Event::Text(_) => self.text(start, end),
            Event::Code(_) => self.leaf(TokenType::CodeText, start, end),
            Event::InlineMath(_) => self.leaf(TokenType::MathText, start, end),
            Event::DisplayMath(_) => self.display_math(start, end),
            Event::SoftBreak | Event::HardBreak => {
                self.leaf(TokenType::LineEnding, start, end);
                self.at_line_start = true;
            }
            Event::Html(_) => self.leaf(TokenType::Other("htmlFlowData".to_string()), start, end),
            Event::InlineHtml(_) => self.leaf(TokenType::Other("htmlText".to_string()), start, end),
            Event::Rule => self.leaf(TokenType::Other("thematicBreak".to_string()), start, end),
            other => {
                let name = format!("{other:?}");
                let name = name.split(['(', ' ', '{']).next().unwrap_or_default().to_string();
                self.leaf(TokenType::Other(name), start, end);
            }
        }
    }

    fn finish(mut self) -> Vec<PendingNode> {
        while !self.stack.is_empty() {
            self.close();
        }
        self.roots
    }
}

fn tag_name(tag: &Tag) -> String {
    let name = format!("{tag:?}");
    name.split(['(', ' ', '{']).next().unwrap_or_default().to_string()
}

/// Moves all of `children` into a new wrapper token spanning them.
fn wrap_children(children: &mut Vec<PendingNode>, kind: TokenType) -> Option<PendingNode> {
    let start = children.first()?.start;
    let end = children.last()?.end;
    let mut wrapper = PendingNode::new(kind, start, end);
    wrapper.children = std::mem::take(children);
    Some(wrapper)
}

/// Splits a strong/emphasis node into opening sequence, text body and closing sequence.
fn wrap_delimited(node: &mut PendingNode, sequence: TokenType, body: TokenType) {
    let Some(text) = wrap_children(&mut node.children, body) else {
        return;
    };
    let opening = PendingNode::new(sequence.clone(), node.start, text.start);
    let closing = PendingNode::new(sequence, text.end, node.end);
    node.children = vec![opening, text, closing];
}

/// Parse `content` with pulldown-cmark (math enabled) into a token tree.
pub fn tokenize(content: &str) -> TokenTree {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_MATH);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let mut builder = TreeBuilder::new(content);
    for (event, range) in Parser::new_ext(content, options).into_offset_iter() {
        builder.event(event, range.start, range.end);
    }

    let index = LineIndex::new(content);
    let roots = builder
        .finish()
        .into_iter()
        .map(|node| node.into_token(&index))
        .collect();
    TokenTree::new(roots)
}
