//! Tokenizer capability and the shared span-acceptance logic
//!
//! Every language runs a fixed list of regex scanners in priority order over
//! the raw source. A scanner's match is offered to a [`SpanCollector`], which
//! rejects it when its start lies inside a span accepted earlier.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::css::CssTokenizer;
use super::highlights::{Span, TokenKind};
use super::html::HtmlTokenizer;
use super::javascript::JavaScriptTokenizer;
use super::languages::LanguageId;

/// Produces a sorted, non-overlapping span decomposition of raw text.
///
/// Implementations must be pure: the same input always yields the same spans.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<Span>;
}

/// Tokenizer for languages without scanners; everything stays plain.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTokenizer;

impl Tokenizer for PlainTokenizer {
    fn tokenize(&self, _text: &str) -> Vec<Span> {
        Vec::new()
    }
}

/// One compiled scanner per token kind.
#[derive(Debug)]
pub(crate) struct Scanner {
    pub regex: Regex,
    pub kind: TokenKind,
    /// Capture group whose range becomes the span (0 = whole match)
    pub group: usize,
}

impl Scanner {
    pub fn new(pattern: &str, kind: TokenKind) -> Self {
        Self::with_group(pattern, kind, 0)
    }

    pub fn with_group(pattern: &str, kind: TokenKind, group: usize) -> Self {
        let regex = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid {:?} scanner pattern: {}", kind, e));
        Self { regex, kind, group }
    }

    /// Offer every match of this scanner to the collector
    pub fn run(&self, collector: &mut SpanCollector<'_>) {
        if self.group == 0 {
            for m in self.regex.find_iter(collector.source) {
                collector.offer(m.range(), self.kind);
            }
        } else {
            for caps in self.regex.captures_iter(collector.source) {
                if let Some(m) = caps.get(self.group) {
                    collector.offer(m.range(), self.kind);
                }
            }
        }
    }
}

/// Accumulates accepted spans for one pass, keyed by start offset.
pub(crate) struct SpanCollector<'a> {
    source: &'a str,
    accepted: BTreeMap<usize, (usize, TokenKind)>,
}

impl<'a> SpanCollector<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            accepted: BTreeMap::new(),
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// Whether `pos` falls inside an accepted span
    pub fn is_covered(&self, pos: usize) -> bool {
        self.accepted
            .range(..=pos)
            .next_back()
            .is_some_and(|(_, &(end, _))| end > pos)
    }

    /// Offer a candidate span. Returns whether it was accepted.
    ///
    /// A candidate starting inside an accepted span is dropped whole. One
    /// that starts in a gap but runs into the next accepted span is clipped
    /// to end where that span begins. Empty candidates are ignored.
    pub fn offer(&mut self, range: Range<usize>, kind: TokenKind) -> bool {
        if range.start >= range.end || self.is_covered(range.start) {
            return false;
        }

        let end = match self.accepted.range(range.start + 1..).next() {
            Some((&next_start, _)) => range.end.min(next_start),
            None => range.end,
        };

        self.accepted.insert(range.start, (end, kind));
        true
    }

    /// Accepted spans in ascending start order
    pub fn into_spans(self) -> Vec<Span> {
        let source = self.source;
        self.accepted
            .into_iter()
            .map(|(start, (end, kind))| Span::new(source, start..end, kind))
            .collect()
    }
}

/// Owns one tokenizer per supported language.
///
/// Compiling the scanners is the expensive part, so a session builds this
/// once and reuses it for every pass.
pub struct Tokenizers {
    javascript: JavaScriptTokenizer,
    html: HtmlTokenizer,
    css: CssTokenizer,
    plain: PlainTokenizer,
}

impl Tokenizers {
    pub fn new() -> Self {
        Self {
            javascript: JavaScriptTokenizer::new(),
            html: HtmlTokenizer::new(),
            css: CssTokenizer::new(),
            plain: PlainTokenizer,
        }
    }

    /// Tokenizer responsible for `language`
    pub fn get(&self, language: LanguageId) -> &dyn Tokenizer {
        match language {
            LanguageId::JavaScript => &self.javascript,
            LanguageId::Html => &self.html,
            LanguageId::Css => &self.css,
            LanguageId::Python | LanguageId::PlainText => &self.plain,
        }
    }

    pub fn tokenize(&self, text: &str, language: LanguageId) -> Vec<Span> {
        self.get(language).tokenize(text)
    }
}

impl Default for Tokenizers {
    fn default() -> Self {
        Self::new()
    }
}

static SHARED: LazyLock<Tokenizers> = LazyLock::new(Tokenizers::new);

/// The process-wide tokenizer set, compiled on first use
pub fn shared_tokenizers() -> &'static Tokenizers {
    &SHARED
}

/// Shared tokenizer registry, compiled on first use
pub fn tokenizer_for(language: LanguageId) -> &'static dyn Tokenizer {
    SHARED.get(language)
}

/// Tokenize `text` as `language` using the shared registry
pub fn tokenize(text: &str, language: LanguageId) -> Vec<Span> {
    SHARED.tokenize(text, language)
}
