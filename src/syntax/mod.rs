//! Syntax highlighting module
//!
//! Provides regex based syntax highlighting with:
//! - Language detection from file names
//! - Per-language scanners behind the [`Tokenizer`] trait
//! - A compositor turning spans into escaped `token-*` markup
//!
//! ## Architecture
//!
//! ```text
//! Text edit → Cmd::Debounce(Highlight, 150ms) → Msg::Syntax(HighlightReady)
//!           → tokenize → compose → overlay markup + scroll sync
//! ```
//!
//! Every pass re-scans the whole buffer; nothing is cached between passes.
//!
//! ## Supported Languages
//!
//! - JavaScript (also TypeScript, JSX and JSON files)
//! - HTML
//! - CSS (also SCSS/Sass files)

mod compose;
mod css;
mod highlights;
mod html;
mod javascript;
mod languages;
mod tokenizer;

pub use compose::{compose, escape_html, markup_text, unescape_html};
pub use css::CssTokenizer;
pub use highlights::{Span, TokenKind};
pub use html::{split_tag, HtmlTokenizer, TagPart, TagPartKind};
pub use javascript::{JavaScriptTokenizer, KEYWORDS as JAVASCRIPT_KEYWORDS};
pub use languages::LanguageId;
pub use tokenizer::{
    shared_tokenizers, tokenize, tokenizer_for, PlainTokenizer, Tokenizer, Tokenizers,
};

/// Tokenize and compose in one step using the shared tokenizers
pub fn highlight(text: &str, language: LanguageId) -> String {
    compose(text, &tokenize(text, language))
}
