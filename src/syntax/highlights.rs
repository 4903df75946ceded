//! Syntax highlighting data structures
//!
//! Defines token kinds and the spans produced by a single highlight pass.

use std::ops::Range;

use serde::Serialize;

/// Classification of a span. Each language uses a subset of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Comment,
    Doctype,
    String,
    Keyword,
    Tag,
    Function,
    Property,
    Value,
    Number,
    Plain,
}

impl TokenKind {
    /// Suffix used in the `token-*` CSS class of the wrapper element
    pub fn class_name(&self) -> &'static str {
        match self {
            TokenKind::Comment => "comment",
            TokenKind::Doctype => "doctype",
            TokenKind::String => "string",
            TokenKind::Keyword => "keyword",
            TokenKind::Tag => "tag",
            TokenKind::Function => "function",
            TokenKind::Property => "property",
            TokenKind::Value => "value",
            TokenKind::Number => "number",
            TokenKind::Plain => "plain",
        }
    }
}

/// A classified, half-open byte range of the source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    pub kind: TokenKind,
    /// Copy of `source[start..end]`
    pub text: String,
}

impl Span {
    /// Build a span over `source[range]`
    pub fn new(source: &str, range: Range<usize>, kind: TokenKind) -> Self {
        Self {
            text: source[range.clone()].to_string(),
            start: range.start,
            end: range.end,
            kind,
        }
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether `pos` falls inside this span
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }
}
