//! HTML scanners and the tag sub-tokenizer
//!
//! The top-level pass only finds comments, doctype declarations and whole
//! tags. Tags are broken into name / attribute / value parts later, when the
//! compositor renders them, by [`split_tag`].

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::highlights::{Span, TokenKind};
use super::tokenizer::{Scanner, SpanCollector, Tokenizer};

const COMMENT: &str = r"(?s)<!--.*?-->";
const DOCTYPE: &str = r"(?i)<!doctype\s+[^>]*>";
const TAG: &str = r#"</?\w[\w\s="'./:;#-]*/?>"#;

#[derive(Debug)]
pub struct HtmlTokenizer {
    scanners: [Scanner; 3],
}

impl HtmlTokenizer {
    pub fn new() -> Self {
        Self {
            scanners: [
                Scanner::new(COMMENT, TokenKind::Comment),
                Scanner::new(DOCTYPE, TokenKind::Doctype),
                Scanner::new(TAG, TokenKind::Tag),
            ],
        }
    }
}

impl Default for HtmlTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for HtmlTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Span> {
        let mut collector = SpanCollector::new(text);
        for scanner in &self.scanners {
            scanner.run(&mut collector);
        }
        let spans = collector.into_spans();
        tracing::trace!(spans = spans.len(), "tokenized html");
        spans
    }
}

/// Role of one piece of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPartKind {
    /// Brackets, slashes, `=`, whitespace and anything unrecognised
    Text,
    Name,
    Attribute,
    Value,
}

/// A piece of a tag, as a byte range relative to the tag start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPart {
    pub kind: TagPartKind,
    pub range: Range<usize>,
}

struct TagSplitter {
    shape: Regex,
    attribute: Regex,
}

impl TagSplitter {
    fn new() -> Self {
        Self {
            shape: Regex::new(r"(?s)^<(/)?([\w-]+)(.*?)(/?)>$").expect("tag shape pattern"),
            attribute: Regex::new(r#"(\s+)([\w-]+)(?:=("[^"]*"|'[^']*'|[^\s>]+))?"#)
                .expect("tag attribute pattern"),
        }
    }

    fn split(&self, tag: &str) -> Option<Vec<TagPart>> {
        let caps = self.shape.captures(tag)?;
        let name = caps.get(2)?;
        let attrs = caps.get(3)?;
        let close = caps.get(4)?;

        let mut parts = Parts::default();
        parts.push(TagPartKind::Text, 0..name.start());
        parts.push(TagPartKind::Name, name.range());

        // Every byte between recognised attributes is kept as text, so odd
        // spacing survives unchanged.
        let base = attrs.start();
        let mut cursor = base;
        for attr in self.attribute.captures_iter(attrs.as_str()) {
            let (Some(ws), Some(attr_name)) = (attr.get(1), attr.get(2)) else {
                continue;
            };
            parts.push(TagPartKind::Text, cursor..base + ws.end());
            parts.push(
                TagPartKind::Attribute,
                base + attr_name.start()..base + attr_name.end(),
            );
            cursor = base + attr_name.end();
            if let Some(value) = attr.get(3) {
                parts.push(TagPartKind::Text, cursor..base + value.start());
                parts.push(TagPartKind::Value, base + value.start()..base + value.end());
                cursor = base + value.end();
            }
        }
        parts.push(TagPartKind::Text, cursor..close.start());
        parts.push(TagPartKind::Text, close.start()..tag.len());

        Some(parts.0)
    }
}

/// Part list that merges adjacent text and skips empty ranges
#[derive(Default)]
struct Parts(Vec<TagPart>);

impl Parts {
    fn push(&mut self, kind: TagPartKind, range: Range<usize>) {
        if range.is_empty() {
            return;
        }
        if let Some(last) = self.0.last_mut() {
            if kind == TagPartKind::Text
                && last.kind == TagPartKind::Text
                && last.range.end == range.start
            {
                last.range.end = range.end;
                return;
            }
        }
        self.0.push(TagPart { kind, range });
    }
}

static SPLITTER: LazyLock<TagSplitter> = LazyLock::new(TagSplitter::new);

/// Break a whole tag (`<a href="x">`) into classified parts.
///
/// The parts tile the tag exactly: concatenating their text reproduces the
/// input byte for byte. Returns `None` when the text is not tag-shaped.
pub fn split_tag(tag: &str) -> Option<Vec<TagPart>> {
    SPLITTER.split(tag)
}
