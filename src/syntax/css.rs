//! CSS scanners
//!
//! Priority: comment > string > at-rule > property/value.

use regex::Regex;

use super::highlights::{Span, TokenKind};
use super::tokenizer::{Scanner, SpanCollector, Tokenizer};

const COMMENT: &str = r"(?s)/\*.*?\*/";
const STRING: &str = r#""(?:\\[^\r\n]|[^"\\\r\n])*"|'(?:\\[^\r\n]|[^'\\\r\n])*'"#;
const AT_RULE: &str = r"@[\w-]+";
const DECLARATION: &str = r"(?i)([a-z-]+)\s*:\s*([^;{}]+);?";

#[derive(Debug)]
pub struct CssTokenizer {
    scanners: [Scanner; 3],
    declaration: Regex,
}

impl CssTokenizer {
    pub fn new() -> Self {
        Self {
            scanners: [
                Scanner::new(COMMENT, TokenKind::Comment),
                Scanner::new(STRING, TokenKind::String),
                Scanner::new(AT_RULE, TokenKind::Keyword),
            ],
            declaration: Regex::new(DECLARATION).expect("css declaration pattern"),
        }
    }

    /// Split each `property: value;` match into a property span and a value
    /// span. The value excludes surrounding whitespace and the semicolon.
    fn scan_declarations(&self, collector: &mut SpanCollector<'_>) {
        let source = collector.source();
        for caps in self.declaration.captures_iter(source) {
            let (Some(property), Some(value)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            collector.offer(property.range(), TokenKind::Property);

            let raw = value.as_str();
            let leading = raw.len() - raw.trim_start().len();
            let trimmed = raw.trim();
            let start = value.start() + leading;
            collector.offer(start..start + trimmed.len(), TokenKind::Value);
        }
    }
}

impl Default for CssTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for CssTokenizer {
    fn tokenize(&self, text: &str) -> Vec<Span> {
        let mut collector = SpanCollector::new(text);
        for scanner in &self.scanners {
            scanner.run(&mut collector);
        }
        self.scan_declarations(&mut collector);
        let spans = collector.into_spans();
        tracing::trace!(spans = spans.len(), "tokenized css");
        spans
    }
}
