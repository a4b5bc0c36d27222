//! Token tree model shared by all rules.
//!
//! Tokens live in a flat arena (`TokenTree`) and are addressed by `TokenId`. Each token owns
//! its ordered children; the `parent` index is a non-owning back-reference used only for
//! ancestor queries. Hosts describe a tree as nested `TokenNode` values and hand it to
//! `TokenTree::new`, which flattens it once per document.

use std::fmt;

/// Syntactic category of a token, using micromark's tag names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenType {
    AtxHeading,
    AtxHeadingText,
    BlockQuote,
    CodeText,
    Data,
    Emphasis,
    EmphasisSequence,
    EmphasisText,
    LineEnding,
    ListItem,
    ListOrdered,
    ListUnordered,
    MathFlow,
    MathText,
    Paragraph,
    SetextHeading,
    Strong,
    StrongSequence,
    StrongText,
    /// Any tag the rules in this crate never match on
    Other(String),
}

impl TokenType {
    pub fn as_str(&self) -> &str {
        match self {
            TokenType::AtxHeading => "atxHeading",
            TokenType::AtxHeadingText => "atxHeadingText",
            TokenType::BlockQuote => "blockQuote",
            TokenType::CodeText => "codeText",
            TokenType::Data => "data",
            TokenType::Emphasis => "emphasis",
            TokenType::EmphasisSequence => "emphasisSequence",
            TokenType::EmphasisText => "emphasisText",
            TokenType::LineEnding => "lineEnding",
            TokenType::ListItem => "listItem",
            TokenType::ListOrdered => "listOrdered",
            TokenType::ListUnordered => "listUnordered",
            TokenType::MathFlow => "mathFlow",
            TokenType::MathText => "mathText",
            TokenType::Paragraph => "paragraph",
            TokenType::SetextHeading => "setextHeading",
            TokenType::Strong => "strong",
            TokenType::StrongSequence => "strongSequence",
            TokenType::StrongText => "strongText",
            TokenType::Other(name) => name,
        }
    }
}

impl From<&str> for TokenType {
    fn from(s: &str) -> Self {
        match s {
            "atxHeading" => TokenType::AtxHeading,
            "atxHeadingText" => TokenType::AtxHeadingText,
            "blockQuote" => TokenType::BlockQuote,
            "codeText" => TokenType::CodeText,
            "data" => TokenType::Data,
            "emphasis" => TokenType::Emphasis,
            "emphasisSequence" => TokenType::EmphasisSequence,
            "emphasisText" => TokenType::EmphasisText,
            "lineEnding" => TokenType::LineEnding,
            "listItem" => TokenType::ListItem,
            "listOrdered" => TokenType::ListOrdered,
            "listUnordered" => TokenType::ListUnordered,
            "mathFlow" => TokenType::MathFlow,
            "mathText" => TokenType::MathText,
            "paragraph" => TokenType::Paragraph,
            "setextHeading" => TokenType::SetextHeading,
            "strong" => TokenType::Strong,
            "strongSequence" => TokenType::StrongSequence,
            "strongText" => TokenType::StrongText,
            other => TokenType::Other(other.to_string()),
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 1-indexed source span of a token. Lines are inclusive, `end_column` is exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start_line: usize,
    pub start_column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl Span {
    pub const fn new(start_line: usize, start_column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }
}

/// Owned description of a token and its subtree, as supplied by a host parser.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenNode {
    pub kind: TokenType,
    pub span: Span,
    pub text: String,
    pub children: Vec<TokenNode>,
}

impl TokenNode {
    pub fn new(kind: impl Into<TokenType>, span: Span, text: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            span,
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<TokenNode>) -> Self {
        self.children = children;
        self
    }
}

/// Index of a token inside its `TokenTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(usize);

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenType,
    pub span: Span,
    pub text: String,
    children: Vec<TokenId>,
    parent: Option<TokenId>,
}

impl Token {
    pub fn start_line(&self) -> usize {
        self.span.start_line
    }

    pub fn end_line(&self) -> usize {
        self.span.end_line
    }

    pub fn start_column(&self) -> usize {
        self.span.start_column
    }

    pub fn end_column(&self) -> usize {
        self.span.end_column
    }
}

/// Arena holding every token of one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenTree {
    tokens: Vec<Token>,
    roots: Vec<TokenId>,
}

impl TokenTree {
    /// Flatten host-supplied nodes into an arena, recording parent links.
    pub fn new(roots: Vec<TokenNode>) -> Self {
        let mut tree = TokenTree::default();
        for node in roots {
            let id = tree.insert(node, None);
            tree.roots.push(id);
        }
        tree
    }

    fn insert(&mut self, node: TokenNode, parent: Option<TokenId>) -> TokenId {
        let id = TokenId(self.tokens.len());
        self.tokens.push(Token {
            kind: node.kind,
            span: node.span,
            text: node.text,
            children: Vec::with_capacity(node.children.len()),
            parent,
        });
        for child in node.children {
            let child_id = self.insert(child, Some(id));
            self.tokens[id.0].children.push(child_id);
        }
        id
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, id: TokenId) -> TokenRef<'_> {
        TokenRef { tree: self, id }
    }

    pub fn roots(&self) -> impl Iterator<Item = TokenRef<'_>> {
        self.roots.iter().map(|&id| self.get(id))
    }

    /// All tokens whose type is one of `types`, depth-first in pre-order (document order).
    pub fn filter_by_types<'t>(&'t self, types: &[TokenType]) -> Vec<TokenRef<'t>> {
        let mut matches = Vec::new();
        let mut stack: Vec<TokenId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let token = &self.tokens[id.0];
            if types.contains(&token.kind) {
                matches.push(self.get(id));
            }
            stack.extend(token.children.iter().rev().copied());
        }
        matches
    }
}

/// Borrowed view of one token that can navigate to its relatives.
#[derive(Clone, Copy)]
pub struct TokenRef<'t> {
    tree: &'t TokenTree,
    id: TokenId,
}

impl<'t> TokenRef<'t> {
    pub fn id(&self) -> TokenId {
        self.id
    }

    pub fn token(&self) -> &'t Token {
        &self.tree.tokens[self.id.0]
    }

    pub fn kind(&self) -> &'t TokenType {
        &self.token().kind
    }

    pub fn text(&self) -> &'t str {
        &self.token().text
    }

    pub fn span(&self) -> Span {
        self.token().span
    }

    pub fn children(&self) -> impl ExactSizeIterator<Item = TokenRef<'t>> + use<'t> {
        let tree = self.tree;
        self.token().children.iter().map(move |&id| tree.get(id))
    }

    pub fn child_count(&self) -> usize {
        self.token().children.len()
    }

    /// The only child of this token, or `None` unless there is exactly one.
    pub fn single_child(&self) -> Option<TokenRef<'t>> {
        match self.token().children.as_slice() {
            [only] => Some(self.tree.get(*only)),
            _ => None,
        }
    }

    /// First direct child of the given type.
    pub fn find_child(&self, kind: &TokenType) -> Option<TokenRef<'t>> {
        self.children().find(|child| child.kind() == kind)
    }

    pub fn parent(&self) -> Option<TokenRef<'t>> {
        self.token().parent.map(|id| self.tree.get(id))
    }

    /// Nearest ancestor whose type is one of `types`.
    pub fn parent_of_type(&self, types: &[TokenType]) -> Option<TokenRef<'t>> {
        let mut current = self.parent();
        while let Some(token) = current {
            if types.contains(token.kind()) {
                return Some(token);
            }
            current = token.parent();
        }
        None
    }
}

impl fmt::Debug for TokenRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRef")
            .field("id", &self.id)
            .field("kind", self.kind())
            .field("span", &self.span())
            .finish()
    }
}
